//! Mouse drag tracking.
//!
//! [`MouseState`] remembers the last cursor position and which buttons are
//! held. While the left button is held a cursor move becomes a pan; otherwise,
//! while the right button is held, it becomes an orbit. Scroll becomes zoom.

use glam::Vec2;
use tracing::trace;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

use crate::ControlCommand;

/// Pixels per scroll line for touchpads that report pixel deltas.
pub const PIXELS_PER_LINE: f64 = 40.0;

#[derive(Debug, Clone, Default)]
pub struct MouseState {
    position: Option<Vec2>,
    left: bool,
    right: bool,
}

impl MouseState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a `CursorMoved` event. The first event only records a position.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64, out: &mut Vec<ControlCommand>) {
        let new_pos = Vec2::new(x as f32, y as f32);
        let Some(prev) = self.position.replace(new_pos) else {
            return;
        };
        let delta = new_pos - prev;
        if delta == Vec2::ZERO {
            return;
        }
        if self.left {
            trace!(dx = delta.x, dz = -delta.y, "pan drag");
            out.push(ControlCommand::Pan {
                dx: delta.x,
                dz: -delta.y,
            });
        } else if self.right {
            trace!(dx = delta.x, dy = delta.y, "orbit drag");
            out.push(ControlCommand::Orbit {
                dx: delta.x,
                dy: delta.y,
            });
        }
    }

    /// Process a `MouseInput` event. Other buttons are ignored.
    pub fn on_button(&mut self, button: MouseButton, state: ElementState) {
        let pressed = state == ElementState::Pressed;
        match button {
            MouseButton::Left => self.left = pressed,
            MouseButton::Right => self.right = pressed,
            _ => {}
        }
    }

    /// Process a `MouseWheel` event.
    pub fn on_scroll(&mut self, delta: MouseScrollDelta, out: &mut Vec<ControlCommand>) {
        let lines = match delta {
            MouseScrollDelta::LineDelta(_x, y) => y,
            MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_LINE) as f32,
        };
        if lines != 0.0 {
            out.push(ControlCommand::Zoom(lines));
        }
    }

    /// Last known cursor position, or zero before the first move.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position.unwrap_or(Vec2::ZERO)
    }

    #[must_use]
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Right => self.right,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_first_move_has_no_delta() {
        let mut ms = MouseState::new();
        let mut out = Vec::new();
        ms.on_button(MouseButton::Left, ElementState::Pressed);
        ms.on_cursor_moved(300.0, 400.0, &mut out);
        assert!(out.is_empty());
        assert_eq!(ms.position(), Vec2::new(300.0, 400.0));
    }

    #[test]
    fn test_left_drag_pans_with_inverted_y() {
        let mut ms = MouseState::new();
        let mut out = Vec::new();
        ms.on_cursor_moved(100.0, 200.0, &mut out);
        ms.on_button(MouseButton::Left, ElementState::Pressed);
        ms.on_cursor_moved(110.0, 195.0, &mut out);
        assert_eq!(out, vec![ControlCommand::Pan { dx: 10.0, dz: 5.0 }]);
    }

    #[test]
    fn test_right_drag_orbits() {
        let mut ms = MouseState::new();
        let mut out = Vec::new();
        ms.on_cursor_moved(100.0, 200.0, &mut out);
        ms.on_button(MouseButton::Right, ElementState::Pressed);
        ms.on_cursor_moved(90.0, 210.0, &mut out);
        assert_eq!(out, vec![ControlCommand::Orbit { dx: -10.0, dy: 10.0 }]);
    }

    #[test]
    fn test_both_buttons_held_pan_wins() {
        let mut ms = MouseState::new();
        let mut out = Vec::new();
        ms.on_cursor_moved(0.0, 0.0, &mut out);
        ms.on_button(MouseButton::Left, ElementState::Pressed);
        ms.on_button(MouseButton::Right, ElementState::Pressed);
        ms.on_cursor_moved(1.0, 2.0, &mut out);
        assert_eq!(out, vec![ControlCommand::Pan { dx: 1.0, dz: -2.0 }]);

        ms.on_button(MouseButton::Left, ElementState::Released);
        ms.on_cursor_moved(2.0, 2.0, &mut out);
        assert_eq!(out[1], ControlCommand::Orbit { dx: 1.0, dy: 0.0 });
    }

    #[test]
    fn test_release_stops_drag() {
        let mut ms = MouseState::new();
        let mut out = Vec::new();
        ms.on_cursor_moved(0.0, 0.0, &mut out);
        ms.on_button(MouseButton::Right, ElementState::Pressed);
        ms.on_button(MouseButton::Right, ElementState::Released);
        ms.on_cursor_moved(5.0, 5.0, &mut out);
        assert!(out.is_empty());
        assert!(!ms.is_button_pressed(MouseButton::Right));
    }

    #[test]
    fn test_middle_button_ignored() {
        let mut ms = MouseState::new();
        let mut out = Vec::new();
        ms.on_cursor_moved(0.0, 0.0, &mut out);
        ms.on_button(MouseButton::Middle, ElementState::Pressed);
        ms.on_cursor_moved(5.0, 5.0, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_scroll_lines_and_pixels() {
        let mut ms = MouseState::new();
        let mut out = Vec::new();
        ms.on_scroll(MouseScrollDelta::LineDelta(0.0, -1.5), &mut out);
        ms.on_scroll(
            MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 80.0)),
            &mut out,
        );
        ms.on_scroll(MouseScrollDelta::LineDelta(3.0, 0.0), &mut out);
        assert_eq!(out, vec![ControlCommand::Zoom(-1.5), ControlCommand::Zoom(2.0)]);
    }
}
