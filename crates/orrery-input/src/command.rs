/// A discrete action derived from raw input, applied to the camera or the animated system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlCommand {
    /// Right-drag: azimuth and polar deltas in pixels.
    Orbit { dx: f32, dy: f32 },
    /// Left-drag: horizontal and screen-up deltas in pixels.
    Pan { dx: f32, dz: f32 },
    /// Scroll amount in lines; positive moves the camera in.
    Zoom(f32),
    ToggleAnimation,
    SetFastForward(bool),
    Quit,
}

impl ControlCommand {
    /// Camera commands are continuous; the rest change animation or lifecycle state.
    pub fn is_camera(&self) -> bool {
        matches!(
            self,
            ControlCommand::Orbit { .. } | ControlCommand::Pan { .. } | ControlCommand::Zoom(_)
        )
    }
}
