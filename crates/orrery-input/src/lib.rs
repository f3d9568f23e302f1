//! Input mapping: winit mouse and keyboard events turned into camera and animation commands.

pub mod command;
pub mod keyboard;
pub mod mouse;

pub use command::ControlCommand;
pub use keyboard::{KeyboardState, RawKeyEvent};
pub use mouse::MouseState;

use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta};

/// Collects commands from both devices between frames.
///
/// Forward winit events through the `on_*` methods, then call
/// [`drain`](Self::drain) once per frame and apply the result in order.
#[derive(Debug, Default)]
pub struct InputState {
    mouse: MouseState,
    keyboard: KeyboardState,
    pending: Vec<ControlCommand>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        self.mouse.on_cursor_moved(x, y, &mut self.pending);
    }

    pub fn on_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.mouse.on_button(button, state);
    }

    pub fn on_scroll(&mut self, delta: MouseScrollDelta) {
        self.mouse.on_scroll(delta, &mut self.pending);
    }

    pub fn on_key(&mut self, event: &KeyEvent) {
        self.on_raw_key(RawKeyEvent::from(event));
    }

    pub fn on_raw_key(&mut self, event: RawKeyEvent) {
        self.keyboard.process_raw(event, &mut self.pending);
    }

    pub fn mouse(&self) -> &MouseState {
        &self.mouse
    }

    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    /// Number of commands waiting for the next [`drain`](Self::drain).
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Take every command produced since the last call, oldest first.
    pub fn drain(&mut self) -> Vec<ControlCommand> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::{KeyCode, PhysicalKey};

    fn key(code: KeyCode, state: ElementState) -> RawKeyEvent {
        RawKeyEvent {
            key: PhysicalKey::Code(code),
            state,
            repeat: false,
        }
    }

    #[test]
    fn test_drain_preserves_order_and_empties() {
        let mut input = InputState::new();
        input.on_raw_key(key(KeyCode::Space, ElementState::Pressed));
        input.on_scroll(MouseScrollDelta::LineDelta(0.0, 2.0));
        input.on_raw_key(key(KeyCode::Escape, ElementState::Pressed));
        assert_eq!(input.pending(), 3);

        let commands = input.drain();
        assert_eq!(
            commands,
            vec![
                ControlCommand::ToggleAnimation,
                ControlCommand::Zoom(2.0),
                ControlCommand::Quit,
            ]
        );
        assert!(input.drain().is_empty());
    }

    #[test]
    fn test_right_drag_produces_orbit() {
        let mut input = InputState::new();
        input.on_cursor_moved(100.0, 100.0);
        input.on_mouse_button(MouseButton::Right, ElementState::Pressed);
        input.on_cursor_moved(110.0, 95.0);
        input.on_mouse_button(MouseButton::Right, ElementState::Released);
        input.on_cursor_moved(200.0, 200.0);
        assert_eq!(
            input.drain(),
            vec![ControlCommand::Orbit { dx: 10.0, dy: -5.0 }]
        );
    }

    #[test]
    fn test_mouse_without_buttons_is_silent() {
        let mut input = InputState::new();
        input.on_cursor_moved(10.0, 10.0);
        input.on_cursor_moved(50.0, 80.0);
        assert_eq!(input.pending(), 0);
        assert_eq!(input.mouse().position(), glam::Vec2::new(50.0, 80.0));
    }
}
