//! Parameters carried by a fired trigger

/// Payload delivered alongside a trigger firing.
///
/// `value` is 1.0 for button-like triggers and the raw axis sample for axis
/// triggers; `pos` is populated for pointer-driven triggers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputParam {
    pub value: f32,
    pub pos: Option<[f32; 2]>,
}

impl InputParam {
    /// Parameter for a plain button-style firing.
    pub fn pressed() -> Self {
        Self {
            value: 1.0,
            pos: None,
        }
    }

    /// Parameter carrying an axis sample.
    pub fn axis(value: f32) -> Self {
        Self { value, pos: None }
    }

    /// Parameter carrying a pointer position.
    pub fn at(pos: [f32; 2]) -> Self {
        Self {
            value: 1.0,
            pos: Some(pos),
        }
    }
}
