//! Integration tests for the event dispatch core

use std::cell::RefCell;
use std::rc::Rc;

use tidepool::event::{
    Event, EventContext, EventKind, EventManager, HandlerId, Key, LowLevelEventHandler,
    RegisteredHandler, SourceId,
};

type Log = Rc<RefCell<Vec<String>>>;

/// Appends every callback it receives to a shared log.
struct Recorder {
    name: &'static str,
    log: Log,
}

impl Recorder {
    fn new(name: &'static str, log: &Log) -> Self {
        Self {
            name,
            log: log.clone(),
        }
    }

    fn note(&self, entry: String) {
        self.log.borrow_mut().push(entry);
    }
}

impl LowLevelEventHandler for Recorder {
    fn begin_tick(&mut self) {
        self.note(format!("{}.begin", self.name));
    }

    fn handle_event(&mut self, event: &Event) {
        let label = match event.kind {
            EventKind::KeyDown { key } => format!("key({:?})", key),
            EventKind::PointerMove { x, y } => format!("move({},{})", x, y),
            EventKind::Tick { .. } => "tick".to_string(),
            EventKind::Custom { payload } => format!("custom({})", payload),
            ref other => format!("{:?}", other),
        };
        self.note(format!("{}.handle({})", self.name, label));
    }

    fn end_tick(&mut self) {
        self.note(format!("{}.end", self.name));
    }
}

#[test]
fn test_dispatch_ordering_scenario() {
    // Three queued events, two handlers, full begin/end bracket.
    let mut manager = EventManager::new();
    let ctx = manager.context();
    let log: Log = Rc::new(RefCell::new(Vec::new()));

    let _h1 = RegisteredHandler::new(&ctx, Recorder::new("h1", &log));
    let _h2 = RegisteredHandler::new(&ctx, Recorder::new("h2", &log));

    manager.push_event(SourceId::KEYBOARD, EventKind::KeyDown { key: Key::A });
    manager.push_event(SourceId::POINTER, EventKind::PointerMove { x: 5.0, y: 5.0 });
    manager.dispatch_tick(0.016);

    assert_eq!(
        *log.borrow(),
        vec![
            "h1.begin",
            "h2.begin",
            "h1.handle(key(A))",
            "h2.handle(key(A))",
            "h1.handle(move(5,5))",
            "h2.handle(move(5,5))",
            "h1.handle(tick)",
            "h2.handle(tick)",
            "h1.end",
            "h2.end",
        ]
    );
}

#[test]
fn test_begin_end_bracket_empty_tick() {
    let mut manager = EventManager::new();
    let ctx = manager.context();
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let _h = RegisteredHandler::new(&ctx, Recorder::new("h", &log));

    // No device events: the tick event is still delivered, bracketed.
    manager.dispatch_tick(0.5);
    assert_eq!(*log.borrow(), vec!["h.begin", "h.handle(tick)", "h.end"]);
}

#[test]
fn test_tick_event_carries_dt() {
    struct DtProbe {
        seen: Rc<RefCell<Option<f64>>>,
    }
    impl LowLevelEventHandler for DtProbe {
        fn handle_event(&mut self, event: &Event) {
            if let Some(dt) = event.tick_dt() {
                *self.seen.borrow_mut() = Some(dt);
            }
        }
    }

    let mut manager = EventManager::new();
    let ctx = manager.context();
    let seen = Rc::new(RefCell::new(None));
    let _h = RegisteredHandler::new(&ctx, DtProbe { seen: seen.clone() });

    manager.dispatch_tick(0.25);
    assert_eq!(*seen.borrow(), Some(0.25));
}

#[test]
fn test_n_constructions_mean_n_registrations() {
    let manager = EventManager::new();
    let ctx = manager.context();
    let log: Log = Rc::new(RefCell::new(Vec::new()));

    let guards: Vec<_> = (0..5)
        .map(|_| RegisteredHandler::new(&ctx, Recorder::new("h", &log)))
        .collect();
    assert_eq!(manager.handler_count(), 5);

    drop(guards);
    assert_eq!(manager.handler_count(), 0);
}

#[test]
fn test_dropped_handler_gets_no_further_callbacks() {
    let mut manager = EventManager::new();
    let ctx = manager.context();
    let log: Log = Rc::new(RefCell::new(Vec::new()));

    let h1 = RegisteredHandler::new(&ctx, Recorder::new("h1", &log));
    let _h2 = RegisteredHandler::new(&ctx, Recorder::new("h2", &log));

    manager.dispatch_tick(0.016);
    drop(h1);
    log.borrow_mut().clear();

    manager.dispatch_tick(0.016);
    assert_eq!(*log.borrow(), vec!["h2.begin", "h2.handle(tick)", "h2.end"]);
}

/// Adds a new recorder to the handler set from inside `handle_event`.
struct Adder {
    ctx: EventContext,
    log: Log,
    added: Rc<RefCell<Option<Rc<RefCell<Recorder>>>>>,
}

impl LowLevelEventHandler for Adder {
    fn handle_event(&mut self, _event: &Event) {
        if self.added.borrow().is_some() {
            return;
        }
        let late = Rc::new(RefCell::new(Recorder::new("late", &self.log)));
        self.ctx
            .add_handler(late.clone() as Rc<RefCell<dyn LowLevelEventHandler>>);
        *self.added.borrow_mut() = Some(late);
    }
}

#[test]
fn test_handler_added_during_dispatch_starts_next_tick() {
    let mut manager = EventManager::new();
    let ctx = manager.context();
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let added = Rc::new(RefCell::new(None));

    let _adder = RegisteredHandler::new(
        &ctx,
        Adder {
            ctx: ctx.clone(),
            log: log.clone(),
            added: added.clone(),
        },
    );

    manager.dispatch_tick(0.016);
    // The late handler saw nothing from the tick in which it registered.
    assert!(log.borrow().iter().all(|e| !e.starts_with("late.")));
    assert!(added.borrow().is_some());

    log.borrow_mut().clear();
    manager.dispatch_tick(0.016);
    assert_eq!(*log.borrow(), vec!["late.begin", "late.handle(tick)", "late.end"]);
}

/// Removes a victim handler from inside `handle_event`.
struct Remover {
    ctx: EventContext,
    victim: HandlerId,
    done: bool,
}

impl LowLevelEventHandler for Remover {
    fn handle_event(&mut self, _event: &Event) {
        if !self.done {
            self.ctx.remove_handler(self.victim);
            self.done = true;
        }
    }
}

#[test]
fn test_handler_removed_during_dispatch_finishes_the_tick() {
    let mut manager = EventManager::new();
    let ctx = manager.context();
    let log: Log = Rc::new(RefCell::new(Vec::new()));

    let victim = Rc::new(RefCell::new(Recorder::new("victim", &log)));
    let victim_id = manager.add_handler(victim.clone() as Rc<RefCell<dyn LowLevelEventHandler>>);

    let _remover = RegisteredHandler::new(
        &ctx,
        Remover {
            ctx: ctx.clone(),
            victim: victim_id,
            done: false,
        },
    );

    manager.push_event(SourceId::KEYBOARD, EventKind::KeyDown { key: Key::A });
    manager.dispatch_tick(0.016);

    // Present at tick start: the victim still saw the whole tick.
    assert!(log.borrow().contains(&"victim.handle(tick)".to_string()));
    assert!(log.borrow().contains(&"victim.end".to_string()));

    log.borrow_mut().clear();
    manager.dispatch_tick(0.016);
    assert!(log.borrow().iter().all(|e| !e.starts_with("victim.")));
}

/// Pushes a software event from inside a callback.
struct Pusher {
    ctx: EventContext,
    pushed: bool,
}

impl LowLevelEventHandler for Pusher {
    fn handle_event(&mut self, _event: &Event) {
        if !self.pushed {
            self.ctx.push_custom(99);
            self.pushed = true;
        }
    }
}

#[test]
fn test_events_pushed_during_dispatch_belong_to_next_tick() {
    let mut manager = EventManager::new();
    let ctx = manager.context();
    let log: Log = Rc::new(RefCell::new(Vec::new()));

    let _pusher = RegisteredHandler::new(
        &ctx,
        Pusher {
            ctx: ctx.clone(),
            pushed: false,
        },
    );
    let _recorder = RegisteredHandler::new(&ctx, Recorder::new("r", &log));

    manager.dispatch_tick(0.016);
    assert!(!log.borrow().contains(&"r.handle(custom(99))".to_string()));

    manager.dispatch_tick(0.016);
    assert!(log.borrow().contains(&"r.handle(custom(99))".to_string()));
}

#[test]
fn test_user_source_registration_lifecycle() {
    use tidepool::event::SourceKind;

    let mut manager = EventManager::new();
    let display_source = SourceId::user(0);
    manager.register_source(display_source, SourceKind::Software);
    manager.push_event(display_source, EventKind::Custom { payload: 7 });

    let ctx = manager.context();
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let _h = RegisteredHandler::new(&ctx, Recorder::new("h", &log));

    manager.dispatch_tick(0.016);
    assert!(log.borrow().contains(&"h.handle(custom(7))".to_string()));

    // The owning subsystem unregisters its source before teardown.
    manager.unregister_source(display_source);
    manager.finalize();
}

#[test]
#[should_panic(expected = "after finalize")]
fn test_dispatch_after_finalize_panics() {
    let mut manager = EventManager::new();
    manager.finalize();
    manager.dispatch_tick(0.016);
}

#[test]
#[should_panic(expected = "finalized twice")]
fn test_double_finalize_panics() {
    let mut manager = EventManager::new();
    manager.finalize();
    manager.finalize();
}
