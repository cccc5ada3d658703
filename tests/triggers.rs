//! Integration tests for triggers evaluated through real dispatch

use tidepool::event::{EventKind, EventManager, Key, PointerButton, RegisteredHandler, SourceId};
use tidepool::input::{
    AxisThresholdTrigger, KeyPressTrigger, NullTrigger, PointerButtonTrigger, TriggerSet,
};

#[test]
fn test_trigger_set_fires_through_dispatch() {
    let mut manager = EventManager::new();
    let ctx = manager.context();

    let mut set = TriggerSet::new();
    set.bind("jump", Box::new(KeyPressTrigger::new(Key::Space)));
    set.bind("fire", Box::new(PointerButtonTrigger::new(PointerButton::Left)));
    set.bind("placeholder", Box::new(NullTrigger));
    let triggers = RegisteredHandler::new(&ctx, set);

    manager.push_event(SourceId::KEYBOARD, EventKind::KeyDown { key: Key::Space });
    manager.push_event(
        SourceId::POINTER,
        EventKind::PointerButtonDown {
            button: PointerButton::Left,
            x: 10.0,
            y: 20.0,
        },
    );
    // Non-matching noise.
    manager.push_event(SourceId::KEYBOARD, EventKind::KeyDown { key: Key::B });

    manager.dispatch_tick(0.016);

    let fired = triggers.borrow_mut().take_fired();
    assert_eq!(fired.len(), 2);
    assert_eq!(fired[0].name, "jump");
    assert_eq!(fired[1].name, "fire");
    assert_eq!(fired[1].param.pos, Some([10.0, 20.0]));
}

#[test]
fn test_firings_clear_at_next_tick() {
    let mut manager = EventManager::new();
    let ctx = manager.context();

    let mut set = TriggerSet::new();
    set.bind("jump", Box::new(KeyPressTrigger::new(Key::Space)));
    let triggers = RegisteredHandler::new(&ctx, set);

    manager.push_event(SourceId::KEYBOARD, EventKind::KeyDown { key: Key::Space });
    manager.dispatch_tick(0.016);
    assert_eq!(triggers.borrow().fired().len(), 1);

    // Nothing queued: the previous firing must not leak into this tick.
    manager.dispatch_tick(0.016);
    assert!(triggers.borrow().fired().is_empty());
}

#[test]
fn test_axis_trigger_edge_detection_through_dispatch() {
    let mut manager = EventManager::new();
    let ctx = manager.context();

    let mut set = TriggerSet::new();
    set.bind("steer", Box::new(AxisThresholdTrigger::new(0, 0, 0.5)));
    let triggers = RegisteredHandler::new(&ctx, set);

    let axis = |value| EventKind::JoystickAxis {
        stick: 0,
        axis: 0,
        value,
    };

    // Below threshold, crossing, then held: exactly one firing.
    manager.push_event(SourceId::JOYSTICK, axis(0.2));
    manager.push_event(SourceId::JOYSTICK, axis(0.8));
    manager.push_event(SourceId::JOYSTICK, axis(0.9));
    manager.dispatch_tick(0.016);

    let fired = triggers.borrow_mut().take_fired();
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].param.value, 0.8);
}

#[test]
fn test_rebinding_survives_memento_round_trip() {
    let mut set = TriggerSet::new();
    set.bind("jump", Box::new(KeyPressTrigger::new(Key::Space)));

    // User rebinds jump to Enter; snapshot; restore into a fresh set.
    set.bind("jump", Box::new(KeyPressTrigger::new(Key::Enter)));
    let snapshot = set.memento();

    let mut fresh = TriggerSet::new();
    fresh.bind("jump", Box::new(KeyPressTrigger::new(Key::Space)));
    fresh.restore(&snapshot).unwrap();
    assert_eq!(fresh.memento(), snapshot);
}
