//! Named trigger sets evaluated inside the dispatch loop

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::Error;
use crate::event::{Event, LowLevelEventHandler};

use super::param::InputParam;
use super::trigger::{InputTrigger, TriggerMemento};
use super::variants::trigger_from_memento;

/// One semantic input that fired during the current tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerSignal {
    pub name: String,
    pub param: InputParam,
}

struct Binding {
    name: String,
    trigger: Box<dyn InputTrigger>,
}

/// An ordered set of named triggers that participates in dispatch as a
/// [`LowLevelEventHandler`].
///
/// Each tick, every drained event is evaluated against every binding;
/// firings accumulate until the next tick's `begin_tick` and are consumed
/// with [`take_fired`](Self::take_fired) after `dispatch_tick` returns.
///
/// The whole set saves and restores as a mapping of binding names to
/// per-trigger mementos, which is also the on-disk bindings format.
#[derive(Default)]
pub struct TriggerSet {
    bindings: Vec<Binding>,
    fired: Vec<TriggerSignal>,
}

impl TriggerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `trigger`, replacing any existing binding of the
    /// same name in place (evaluation order is first-bind order).
    pub fn bind(&mut self, name: impl Into<String>, trigger: Box<dyn InputTrigger>) {
        let name = name.into();
        if let Some(existing) = self.bindings.iter_mut().find(|b| b.name == name) {
            existing.trigger = trigger;
        } else {
            self.bindings.push(Binding { name, trigger });
        }
    }

    /// Removes a binding; unknown names are a no-op.
    pub fn unbind(&mut self, name: &str) {
        self.bindings.retain(|b| b.name != name);
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if no triggers are bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Signals fired during the current tick so far.
    pub fn fired(&self) -> &[TriggerSignal] {
        &self.fired
    }

    /// Takes the signals fired during the current tick.
    pub fn take_fired(&mut self) -> Vec<TriggerSignal> {
        std::mem::take(&mut self.fired)
    }

    /// Snapshot of every binding's configuration, keyed by name.
    pub fn memento(&self) -> TriggerMemento {
        let map: serde_json::Map<String, serde_json::Value> = self
            .bindings
            .iter()
            .map(|b| (b.name.clone(), b.trigger.memento().0))
            .collect();
        TriggerMemento(serde_json::Value::Object(map))
    }

    /// Restores bindings from a set-level memento.
    ///
    /// Names present in the snapshot replace or create bindings of the
    /// matching variant; bindings absent from the snapshot are left as-is.
    pub fn restore(&mut self, memento: &TriggerMemento) -> Result<(), Error> {
        let map = memento
            .0
            .as_object()
            .ok_or_else(|| Error::memento("trigger set memento is not a name map"))?;
        for (name, value) in map {
            let entry = TriggerMemento(value.clone());
            match self.bindings.iter_mut().find(|b| b.name == *name) {
                Some(binding) => binding.trigger.restore(&entry)?,
                None => self.bind(name.clone(), trigger_from_memento(&entry)?),
            }
        }
        Ok(())
    }

    /// Loads bindings from a JSON file written by
    /// [`save_to_file`](Self::save_to_file).
    pub fn restore_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::Bindings {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let memento: TriggerMemento =
            serde_json::from_str(&text).map_err(|e| Error::Bindings {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        self.restore(&memento)?;
        debug!(path = %path.display(), bindings = self.len(), "loaded input bindings");
        Ok(())
    }

    /// Writes the current bindings to a JSON file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let text = serde_json::to_string_pretty(&self.memento()).map_err(|e| Error::Bindings {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        fs::write(path, text).map_err(|e| Error::Bindings {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

impl LowLevelEventHandler for TriggerSet {
    fn begin_tick(&mut self) {
        self.fired.clear();
    }

    fn handle_event(&mut self, event: &Event) {
        for binding in &mut self.bindings {
            if let Some(param) = binding.trigger.evaluate(event) {
                self.fired.push(TriggerSignal {
                    name: binding.name.clone(),
                    param,
                });
            }
        }
    }
}
