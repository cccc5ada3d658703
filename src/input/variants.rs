//! Built-in trigger variants

use crate::error::Error;
use crate::event::{Event, EventKind, Key, PointerButton};

use super::param::InputParam;
use super::trigger::{InputTrigger, MementoRepr, TriggerMemento};

fn variant_mismatch(expected: &str, got: &MementoRepr) -> Error {
    Error::memento(format!("expected a {expected} memento, got {got:?}"))
}

/// Placeholder trigger that never fires.
///
/// Useful as the default binding before a control is assigned.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTrigger;

impl InputTrigger for NullTrigger {
    fn evaluate(&mut self, _event: &Event) -> Option<InputParam> {
        None
    }

    fn memento(&self) -> TriggerMemento {
        TriggerMemento::encode(&MementoRepr::Null)
    }

    fn restore(&mut self, memento: &TriggerMemento) -> Result<(), Error> {
        match memento.decode()? {
            MementoRepr::Null => Ok(()),
            other => Err(variant_mismatch("null", &other)),
        }
    }
}

/// Fires on the down-transition of a specific key.
#[derive(Debug, Clone, Copy)]
pub struct KeyPressTrigger {
    key: Key,
}

impl KeyPressTrigger {
    pub fn new(key: Key) -> Self {
        Self { key }
    }

    pub fn key(&self) -> Key {
        self.key
    }
}

impl InputTrigger for KeyPressTrigger {
    fn evaluate(&mut self, event: &Event) -> Option<InputParam> {
        match event.kind {
            EventKind::KeyDown { key } if key == self.key => Some(InputParam::pressed()),
            _ => None,
        }
    }

    fn memento(&self) -> TriggerMemento {
        TriggerMemento::encode(&MementoRepr::KeyPress { key: self.key })
    }

    fn restore(&mut self, memento: &TriggerMemento) -> Result<(), Error> {
        match memento.decode()? {
            MementoRepr::KeyPress { key } => {
                self.key = key;
                Ok(())
            }
            other => Err(variant_mismatch("key_press", &other)),
        }
    }
}

/// Fires on the down-transition of a specific pointer button, carrying the
/// pointer position.
#[derive(Debug, Clone, Copy)]
pub struct PointerButtonTrigger {
    button: PointerButton,
}

impl PointerButtonTrigger {
    pub fn new(button: PointerButton) -> Self {
        Self { button }
    }

    pub fn button(&self) -> PointerButton {
        self.button
    }
}

impl InputTrigger for PointerButtonTrigger {
    fn evaluate(&mut self, event: &Event) -> Option<InputParam> {
        match event.kind {
            EventKind::PointerButtonDown { button, x, y } if button == self.button => {
                Some(InputParam::at([x, y]))
            }
            _ => None,
        }
    }

    fn memento(&self) -> TriggerMemento {
        TriggerMemento::encode(&MementoRepr::PointerButton {
            button: self.button,
        })
    }

    fn restore(&mut self, memento: &TriggerMemento) -> Result<(), Error> {
        match memento.decode()? {
            MementoRepr::PointerButton { button } => {
                self.button = button;
                Ok(())
            }
            other => Err(variant_mismatch("pointer_button", &other)),
        }
    }
}

/// Fires when a joystick axis magnitude crosses a threshold.
///
/// Edge-detecting: a held deflection fires once; the axis must fall back
/// below the threshold before the trigger can fire again. The last-sample
/// state is transient and excluded from the memento.
#[derive(Debug, Clone, Copy)]
pub struct AxisThresholdTrigger {
    stick: u32,
    axis: u32,
    threshold: f32,
    /// Magnitude of the previous matching sample.
    last: f32,
}

impl AxisThresholdTrigger {
    pub fn new(stick: u32, axis: u32, threshold: f32) -> Self {
        Self {
            stick,
            axis,
            threshold,
            last: 0.0,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}

impl InputTrigger for AxisThresholdTrigger {
    fn evaluate(&mut self, event: &Event) -> Option<InputParam> {
        match event.kind {
            EventKind::JoystickAxis { stick, axis, value }
                if stick == self.stick && axis == self.axis =>
            {
                let crossed = self.last < self.threshold && value.abs() >= self.threshold;
                self.last = value.abs();
                crossed.then(|| InputParam::axis(value))
            }
            _ => None,
        }
    }

    fn memento(&self) -> TriggerMemento {
        TriggerMemento::encode(&MementoRepr::AxisThreshold {
            stick: self.stick,
            axis: self.axis,
            threshold: self.threshold,
        })
    }

    fn restore(&mut self, memento: &TriggerMemento) -> Result<(), Error> {
        match memento.decode()? {
            MementoRepr::AxisThreshold {
                stick,
                axis,
                threshold,
            } => {
                self.stick = stick;
                self.axis = axis;
                self.threshold = threshold;
                self.last = 0.0;
                Ok(())
            }
            other => Err(variant_mismatch("axis_threshold", &other)),
        }
    }
}

/// Reconstructs a boxed trigger of the variant a memento belongs to.
pub fn trigger_from_memento(memento: &TriggerMemento) -> Result<Box<dyn InputTrigger>, Error> {
    let mut trigger: Box<dyn InputTrigger> = match memento.decode()? {
        MementoRepr::Null => Box::new(NullTrigger),
        MementoRepr::KeyPress { key } => Box::new(KeyPressTrigger::new(key)),
        MementoRepr::PointerButton { button } => Box::new(PointerButtonTrigger::new(button)),
        MementoRepr::AxisThreshold {
            stick,
            axis,
            threshold,
        } => Box::new(AxisThresholdTrigger::new(stick, axis, threshold)),
    };
    trigger.restore(memento)?;
    Ok(trigger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::SourceId;

    fn key_down(key: Key) -> Event {
        Event {
            source: SourceId::KEYBOARD,
            timestamp: 0.0,
            kind: EventKind::KeyDown { key },
        }
    }

    fn axis(value: f32) -> Event {
        Event {
            source: SourceId::JOYSTICK,
            timestamp: 0.0,
            kind: EventKind::JoystickAxis {
                stick: 0,
                axis: 0,
                value,
            },
        }
    }

    #[test]
    fn test_key_press_matches_configured_key_only() {
        let mut trigger = KeyPressTrigger::new(Key::Space);
        assert!(trigger.evaluate(&key_down(Key::Space)).is_some());
        assert!(trigger.evaluate(&key_down(Key::A)).is_none());

        // Unrelated event kinds are non-matches, not errors.
        let up = Event {
            source: SourceId::KEYBOARD,
            timestamp: 0.0,
            kind: EventKind::KeyUp { key: Key::Space },
        };
        assert!(trigger.evaluate(&up).is_none());
    }

    #[test]
    fn test_null_trigger_never_fires() {
        let mut trigger = NullTrigger;
        assert!(trigger.evaluate(&key_down(Key::Space)).is_none());
        assert!(trigger.evaluate(&axis(1.0)).is_none());
    }

    #[test]
    fn test_axis_trigger_fires_on_crossing_only() {
        let mut trigger = AxisThresholdTrigger::new(0, 0, 0.5);

        assert!(trigger.evaluate(&axis(0.2)).is_none());
        let fired = trigger.evaluate(&axis(0.7)).unwrap();
        assert_eq!(fired.value, 0.7);
        // Held past the threshold: no re-fire.
        assert!(trigger.evaluate(&axis(0.9)).is_none());
        // Fall back below, cross again.
        assert!(trigger.evaluate(&axis(0.1)).is_none());
        assert!(trigger.evaluate(&axis(-0.8)).is_some());
    }

    #[test]
    fn test_memento_round_trip_exact() {
        let mut trigger = KeyPressTrigger::new(Key::A);
        let snapshot = KeyPressTrigger::new(Key::Enter).memento();
        trigger.restore(&snapshot).unwrap();
        assert_eq!(trigger.memento(), snapshot);
        assert_eq!(trigger.key(), Key::Enter);
    }

    #[test]
    fn test_restore_rejects_foreign_memento() {
        let mut trigger = KeyPressTrigger::new(Key::A);
        let foreign = NullTrigger.memento();
        assert!(trigger.restore(&foreign).is_err());
        // Configuration untouched on failure.
        assert_eq!(trigger.key(), Key::A);
    }

    #[test]
    fn test_trigger_from_memento_reconstructs_variant() {
        let snapshot = AxisThresholdTrigger::new(1, 2, 0.25).memento();
        let rebuilt = trigger_from_memento(&snapshot).unwrap();
        assert_eq!(rebuilt.memento(), snapshot);
    }
}
