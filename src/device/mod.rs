//! Device boundary: raw backend events in, queue pushes out
//!
//! ```text
//! winit WindowEvent ──→ DeviceCollector ──→ pointer/keyboard sources
//! joystick driver   ──→ report API      ──→ joystick source
//! ```

mod collector;
mod keys;
mod window;

pub use collector::DeviceCollector;
pub use window::window_attributes_from_config;
