//! Input trigger health check

use crate::event::{Key, PointerButton};
use crate::health::check::{CheckResult, SystemCheck};
use crate::input::{
    AxisThresholdTrigger, InputTrigger, KeyPressTrigger, NullTrigger, PointerButtonTrigger,
    trigger_from_memento,
};

/// Checks memento round-trip fidelity for every built-in trigger variant.
pub struct TriggerCheck;

impl TriggerCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TriggerCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for TriggerCheck {
    fn name(&self) -> &'static str {
        "Input triggers"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates memento round-trips for all trigger variants")
    }

    fn check(&self) -> CheckResult {
        let variants: Vec<(&str, Box<dyn InputTrigger>)> = vec![
            ("null", Box::new(NullTrigger)),
            ("key_press", Box::new(KeyPressTrigger::new(Key::Space))),
            (
                "pointer_button",
                Box::new(PointerButtonTrigger::new(PointerButton::Left)),
            ),
            (
                "axis_threshold",
                Box::new(AxisThresholdTrigger::new(0, 1, 0.5)),
            ),
        ];

        let mut details = Vec::new();
        for (label, trigger) in &variants {
            let snapshot = trigger.memento();
            match trigger_from_memento(&snapshot) {
                Ok(rebuilt) if rebuilt.memento() == snapshot => {
                    details.push(format!("  ✓ {}: round-trip exact", label));
                }
                Ok(_) => {
                    return CheckResult::fail(format!("{}: memento round-trip drifted", label))
                        .with_details(details.join("\n"));
                }
                Err(e) => {
                    return CheckResult::fail(format!("{}: {}", label, e))
                        .with_details(details.join("\n"));
                }
            }
        }

        CheckResult::pass(format!("{} variants round-trip", variants.len()))
            .with_details(details.join("\n"))
    }
}
