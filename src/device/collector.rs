//! Raw device-event collection feeding the hardware sources

use winit::event::{ElementState, WindowEvent};

use crate::event::{EventContext, EventKind, Key, PointerButton, SourceId};

/// Translates the windowing backend's raw events into queue pushes on the
/// pointer and keyboard hardware sources.
///
/// Joysticks are not surfaced by the windowing backend; whatever driver owns
/// them feeds reports through [`joystick_button`](Self::joystick_button) and
/// [`joystick_axis`](Self::joystick_axis) instead.
pub struct DeviceCollector {
    ctx: EventContext,
    scale_factor: f32,
    /// Last known pointer position in logical pixels, for button events.
    pointer_pos: Option<[f32; 2]>,
}

impl DeviceCollector {
    /// Creates a collector pushing into the manager behind `ctx`.
    pub fn new(ctx: EventContext) -> Self {
        Self {
            ctx,
            scale_factor: 1.0,
            pointer_pos: None,
        }
    }

    /// Update scale factor (DPI scaling)
    pub fn set_scale_factor(&mut self, scale_factor: f32) {
        self.scale_factor = scale_factor;
    }

    /// Handle a winit window event
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let pos = [
                    position.x as f32 / self.scale_factor,
                    position.y as f32 / self.scale_factor,
                ];
                self.pointer_pos = Some(pos);
                self.ctx.push_event(
                    SourceId::POINTER,
                    EventKind::PointerMove {
                        x: pos[0],
                        y: pos[1],
                    },
                );
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let button = match button {
                    winit::event::MouseButton::Left => PointerButton::Left,
                    winit::event::MouseButton::Right => PointerButton::Right,
                    winit::event::MouseButton::Middle => PointerButton::Middle,
                    _ => return,
                };
                let [x, y] = self.pointer_pos.unwrap_or([0.0, 0.0]);
                let kind = match state {
                    ElementState::Pressed => EventKind::PointerButtonDown { button, x, y },
                    ElementState::Released => EventKind::PointerButtonUp { button, x, y },
                };
                self.ctx.push_event(SourceId::POINTER, kind);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                // Key repeats are an OS text-input convenience, not a
                // device transition.
                if event.repeat {
                    return;
                }
                let key = match event.physical_key {
                    winit::keyboard::PhysicalKey::Code(code) => Key::from(code),
                    winit::keyboard::PhysicalKey::Unidentified(_) => Key::Other,
                };
                let kind = match event.state {
                    ElementState::Pressed => EventKind::KeyDown { key },
                    ElementState::Released => EventKind::KeyUp { key },
                };
                self.ctx.push_event(SourceId::KEYBOARD, kind);
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.scale_factor = *scale_factor as f32;
            }

            _ => {}
        }
    }

    /// Feed a joystick button transition from an external driver.
    pub fn joystick_button(&mut self, stick: u32, button: u32, pressed: bool) {
        let kind = if pressed {
            EventKind::JoystickButtonDown { stick, button }
        } else {
            EventKind::JoystickButtonUp { stick, button }
        };
        self.ctx.push_event(SourceId::JOYSTICK, kind);
    }

    /// Feed a joystick axis sample from an external driver.
    pub fn joystick_axis(&mut self, stick: u32, axis: u32, value: f32) {
        self.ctx
            .push_event(SourceId::JOYSTICK, EventKind::JoystickAxis { stick, axis, value });
    }

    /// Last known pointer position in logical pixels.
    pub fn pointer_pos(&self) -> Option<[f32; 2]> {
        self.pointer_pos
    }
}
