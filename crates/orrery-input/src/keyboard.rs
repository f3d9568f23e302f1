//! Keyboard mapping onto animation and lifecycle commands.
//!
//! Physical key codes are used so the bindings stay put on any layout:
//! Space toggles animation, F is held for fast-forward, Escape quits.

use std::collections::HashSet;

use tracing::debug;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::ControlCommand;

/// Minimal description of a key event for processing.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    pub key: PhysicalKey,
    pub state: ElementState,
    pub repeat: bool,
}

impl From<&KeyEvent> for RawKeyEvent {
    fn from(event: &KeyEvent) -> Self {
        Self {
            key: event.physical_key,
            state: event.state,
            repeat: event.repeat,
        }
    }
}

/// Tracks held keys and emits commands on transitions.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: HashSet<PhysicalKey>,
}

impl KeyboardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Repeat events are ignored so holding Space does not flicker the animation.
    pub fn process_raw(&mut self, event: RawKeyEvent, out: &mut Vec<ControlCommand>) {
        if event.repeat {
            return;
        }
        let command = match event.state {
            ElementState::Pressed => {
                self.pressed.insert(event.key);
                match event.key {
                    PhysicalKey::Code(KeyCode::Space) => Some(ControlCommand::ToggleAnimation),
                    PhysicalKey::Code(KeyCode::KeyF) => Some(ControlCommand::SetFastForward(true)),
                    PhysicalKey::Code(KeyCode::Escape) => Some(ControlCommand::Quit),
                    _ => None,
                }
            }
            ElementState::Released => {
                self.pressed.remove(&event.key);
                match event.key {
                    PhysicalKey::Code(KeyCode::KeyF) => {
                        Some(ControlCommand::SetFastForward(false))
                    }
                    _ => None,
                }
            }
        };
        if let Some(command) = command {
            debug!(?command, "key command");
            out.push(command);
        }
    }

    /// Returns `true` while the key is held down.
    #[must_use]
    pub fn is_pressed(&self, key: PhysicalKey) -> bool {
        self.pressed.contains(&key)
    }
}
