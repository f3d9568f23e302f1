//! Configuration structs with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const CONFIG_FILE_NAME: &str = "orrery.ron";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub animation: AnimationConfig,
    pub render: RenderConfig,
    pub scene: SceneConfig,
    pub debug: DebugConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Inner width in physical pixels.
    pub width: u32,
    /// Inner height in physical pixels.
    pub height: u32,
    pub fullscreen: bool,
    /// Enable vsync (PresentMode::Fifo).
    pub vsync: bool,
    pub title: String,
}

/// Multipliers applied to raw mouse deltas before they reach the camera.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub orbit_sensitivity: f32,
    pub pan_sensitivity: f32,
    pub zoom_sensitivity: f32,
    /// Flip the vertical drag direction for orbit and pan.
    pub invert_y: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    pub start_animated: bool,
    /// Simulated seconds per wall-clock second.
    pub time_scale: f32,
    /// Extra factor on `time_scale` while fast-forward is held.
    pub fast_forward_multiplier: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Linear RGB background colour.
    pub clear_color: [f32; 3],
    pub specular_color: [f32; 3],
    pub specular_exponent: f32,
    pub ambient_strength: f32,
    /// Load the body shader from this WGSL file instead of the built-in one.
    pub shader_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub texture_dir: PathBuf,
    pub sun_texture: String,
    pub earth_texture: String,
    pub moon_texture: String,
    pub stars_texture: String,
    /// Abort startup when a texture file cannot be loaded instead of generating one.
    pub require_textures: bool,
    pub star_seed: u64,
    pub star_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log filter directive (e.g., "debug", "info,wgpu=warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
            fullscreen: false,
            vsync: true,
            title: "Orrery".to_string(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            orbit_sensitivity: 1.0,
            pan_sensitivity: 1.0,
            zoom_sensitivity: 1.0,
            invert_y: false,
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            start_animated: true,
            time_scale: 1.0 / 40.0,
            fast_forward_multiplier: 50.0,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.2, 0.2, 0.2],
            specular_color: [1.0, 1.0, 1.0],
            specular_exponent: 65.0,
            ambient_strength: 0.15,
            shader_path: None,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            texture_dir: PathBuf::from("textures"),
            sun_texture: "texture_sun.jpg".to_string(),
            earth_texture: "earth_surface.jpg".to_string(),
            moon_texture: "texture_moon.jpg".to_string(),
            stars_texture: "texture_stars.jpg".to_string(),
            require_textures: false,
            star_seed: 0x5EED,
            star_count: 6000,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl SceneConfig {
    /// Full path of a texture file name under `texture_dir`.
    pub fn texture_path(&self, file_name: &str) -> PathBuf {
        self.texture_dir.join(file_name)
    }
}

// --- Load / Save ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
                    path: config_path.clone(),
                    source,
                })?;
            let config: Config =
                ron::from_str(&contents).map_err(|source| ConfigError::Parse {
                    path: config_path.clone(),
                    source,
                })?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `orrery.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path.clone(),
            source,
        })?;
        Ok(())
    }
}
