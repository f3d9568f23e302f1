//! Orrery configuration.
//!
//! Settings persist to disk as a RON file and can be overridden from the
//! command line via clap. Every section tolerates missing and unknown fields.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    AnimationConfig, CONFIG_FILE_NAME, CameraConfig, Config, DebugConfig, RenderConfig,
    SceneConfig, WindowConfig,
};
pub use error::ConfigError;
