//! Orrery application: window, event handling and the per-frame draw of the solar system.

pub mod assets;
pub mod controls;
pub mod error;
pub mod platform;
pub mod window;

pub use controls::{CommandOutcome, animation_settings, apply_command};
pub use error::AppError;
pub use platform::{PlatformDirs, PlatformError};
pub use window::{AppState, run_with_config};
