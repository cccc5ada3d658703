//! Event records and source identities

use serde::{Deserialize, Serialize};

/// Identity of a producer registered into the event queue.
///
/// The framework reserves four well-known sources; applications may mint
/// additional software sources via [`SourceId::user`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId(pub(crate) u32);

impl SourceId {
    /// Pointer hardware source (mouse, touchpad).
    pub const POINTER: SourceId = SourceId(0);
    /// Keyboard hardware source.
    pub const KEYBOARD: SourceId = SourceId(1);
    /// Joystick hardware source.
    pub const JOYSTICK: SourceId = SourceId(2);
    /// The single built-in software source for tick and custom events.
    pub const SOFTWARE: SourceId = SourceId(3);

    /// Mints an application-defined software source identity.
    ///
    /// `n` is an application-chosen index; user sources start after the
    /// reserved range.
    pub fn user(n: u32) -> Self {
        SourceId(4 + n)
    }
}

/// Kind of event source, used for registration bookkeeping and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Pointer,
    Keyboard,
    Joystick,
    Software,
}

/// Pointer button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    Left,
    Right,
    Middle,
}

/// Key identifier, normalized away from any windowing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Space,
    Enter,
    Escape,
    Backspace,
    Tab,

    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,

    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    Left,
    Right,
    Up,
    Down,

    Other,
}

/// Source-specific payload of an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventKind {
    KeyDown { key: Key },
    KeyUp { key: Key },
    PointerMove { x: f32, y: f32 },
    PointerButtonDown { button: PointerButton, x: f32, y: f32 },
    PointerButtonUp { button: PointerButton, x: f32, y: f32 },
    JoystickButtonDown { stick: u32, button: u32 },
    JoystickButtonUp { stick: u32, button: u32 },
    JoystickAxis { stick: u32, axis: u32, value: f32 },
    /// Frame tick carrying the frame delta-time in seconds.
    Tick { dt: f64 },
    /// Application-defined payload pushed through a software source.
    Custom { payload: u64 },
}

/// A single event record: which source produced it, when, and what happened.
///
/// Immutable once queued.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    pub source: SourceId,
    /// Seconds since the owning queue was created.
    pub timestamp: f64,
    pub kind: EventKind,
}

impl Event {
    /// Returns the tick delta-time if this is a tick event.
    pub fn tick_dt(&self) -> Option<f64> {
        match self.kind {
            EventKind::Tick { dt } => Some(dt),
            _ => None,
        }
    }
}
