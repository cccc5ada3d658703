//! Event dispatch health check

use std::cell::RefCell;
use std::rc::Rc;

use crate::event::{
    Event, EventKind, EventManager, Key, LowLevelEventHandler, RegisteredHandler, SourceId,
};
use crate::health::check::{CheckResult, SystemCheck};

/// Records the dispatch callbacks it receives.
#[derive(Default)]
struct Probe {
    log: Rc<RefCell<Vec<String>>>,
}

impl LowLevelEventHandler for Probe {
    fn begin_tick(&mut self) {
        self.log.borrow_mut().push("begin".into());
    }
    fn handle_event(&mut self, event: &Event) {
        self.log.borrow_mut().push(format!("{:?}", event.kind));
    }
    fn end_tick(&mut self) {
        self.log.borrow_mut().push("end".into());
    }
}

/// Checks that an event manager can be constructed, driven one tick, and
/// finalized, and that the tick brackets every delivery.
pub struct DispatchCheck;

impl DispatchCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DispatchCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for DispatchCheck {
    fn name(&self) -> &'static str {
        "Event dispatch"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Constructs a manager, dispatches one tick, verifies bracketing")
    }

    fn check(&self) -> CheckResult {
        let mut manager = EventManager::new();
        let ctx = manager.context();

        let log = Rc::new(RefCell::new(Vec::new()));
        let probe = RegisteredHandler::new(&ctx, Probe { log: log.clone() });

        manager.push_event(SourceId::KEYBOARD, EventKind::KeyDown { key: Key::A });
        manager.dispatch_tick(1.0 / 60.0);

        let entries = log.borrow().clone();
        drop(probe);
        manager.finalize();

        // One key event plus the tick event, bracketed.
        let expected_len = 4;
        if entries.len() != expected_len {
            return CheckResult::fail(format!(
                "expected {} dispatch callbacks, saw {}",
                expected_len,
                entries.len()
            ))
            .with_details(entries.join("\n"));
        }
        if entries.first().map(String::as_str) != Some("begin")
            || entries.last().map(String::as_str) != Some("end")
        {
            return CheckResult::fail("tick brackets missing or out of order")
                .with_details(entries.join("\n"));
        }

        CheckResult::pass("dispatch pass delivered and bracketed events")
    }
}
