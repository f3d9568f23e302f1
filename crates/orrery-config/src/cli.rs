//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Orrery command-line arguments.
///
/// CLI values override settings loaded from `orrery.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "orrery", about = "Animated sun, earth and moon with an orbit camera")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Start in fullscreen.
    #[arg(long)]
    pub fullscreen: Option<bool>,

    /// Directory containing the body textures.
    #[arg(long)]
    pub texture_dir: Option<PathBuf>,

    /// Fail instead of generating a texture when a file is missing.
    #[arg(long)]
    pub require_textures: Option<bool>,

    /// Start with animation paused.
    #[arg(long)]
    pub paused: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(fs) = args.fullscreen {
            self.window.fullscreen = fs;
        }
        if let Some(ref dir) = args.texture_dir {
            self.scene.texture_dir = dir.clone();
        }
        if let Some(required) = args.require_textures {
            self.scene.require_textures = required;
        }
        if args.paused {
            self.animation.start_animated = false;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            width: Some(1920),
            texture_dir: Some(PathBuf::from("/srv/textures")),
            paused: true,
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.scene.texture_dir, PathBuf::from("/srv/textures"));
        assert!(!config.animation.start_animated);
        // Non-overridden fields retain defaults
        assert_eq!(config.window.height, 1024);
        assert!(!config.scene.require_textures);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::parse_from([
            "orrery",
            "--height",
            "600",
            "--require-textures",
            "true",
            "--log-level",
            "debug",
            "--config",
            "/tmp/orrery",
        ]);
        assert_eq!(args.height, Some(600));
        assert_eq!(args.require_textures, Some(true));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.config, Some(PathBuf::from("/tmp/orrery")));
        assert!(!args.paused);
    }
}
