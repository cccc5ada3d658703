//! Input trigger contract and configuration mementos

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::event::{Event, Key, PointerButton};

use super::param::InputParam;

/// A stateful predicate mapping raw events to semantic application inputs.
///
/// [`evaluate`](Self::evaluate) is a pure function of the trigger's current
/// configuration and the event; variants may keep internal edge-detection
/// state but never mutate configuration. Events of unrelated kinds are
/// non-matches, not errors.
///
/// Configuration is saved and restored through an opaque
/// [`TriggerMemento`]; restoring is the exact inverse of saving, so
/// `t.restore(&m)` followed by `t.memento()` yields `m` again. This split
/// lets the same trigger objects be evaluated every tick inside the
/// dispatch loop while remaining independently save/restorable for
/// user-rebindable controls.
pub trait InputTrigger {
    /// Evaluates one event, returning a parameter record iff it matches
    /// this trigger's configured condition.
    fn evaluate(&mut self, event: &Event) -> Option<InputParam>;

    /// Snapshot of this trigger's configuration (not its transient runtime
    /// state).
    fn memento(&self) -> TriggerMemento;

    /// Restores configuration from a snapshot. Fails with
    /// [`Error::Memento`] if the snapshot belongs to a different variant.
    fn restore(&mut self, memento: &TriggerMemento) -> Result<(), Error>;
}

/// Opaque, serializable snapshot of a trigger's configuration.
///
/// Structurally a mapping of named fields to primitive values; produced and
/// consumed only by matching trigger variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerMemento(pub(crate) serde_json::Value);

/// Wire shape shared by all built-in trigger variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum MementoRepr {
    Null,
    KeyPress { key: Key },
    PointerButton { button: PointerButton },
    AxisThreshold { stick: u32, axis: u32, threshold: f32 },
}

impl TriggerMemento {
    pub(crate) fn encode(repr: &MementoRepr) -> Self {
        // An internally-tagged enum of primitives always serializes.
        let value = serde_json::to_value(repr).expect("trigger memento serializes");
        Self(value)
    }

    pub(crate) fn decode(&self) -> Result<MementoRepr, Error> {
        serde_json::from_value(self.0.clone())
            .map_err(|e| Error::memento(format!("unrecognized trigger memento: {}", e)))
    }

    /// The variant tag stored in this memento, if any.
    pub fn kind(&self) -> Option<&str> {
        self.0.get("kind").and_then(|v| v.as_str())
    }
}
