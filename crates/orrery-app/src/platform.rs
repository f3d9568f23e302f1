//! OS-specific directory resolution.

use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("could not determine OS configuration directory")]
    NoConfigDir,

    #[error("platform I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where the orrery keeps its files, following OS conventions
/// (XDG on Linux, Known Folders on Windows, Library on macOS).
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformDirs {
    /// Holds `orrery.ron`.
    pub config_dir: PathBuf,
    pub log_dir: PathBuf,
}

const APP_NAME: &str = "orrery";

impl PlatformDirs {
    /// Resolve directories without creating them.
    pub fn resolve() -> Result<Self, PlatformError> {
        let config_base = dirs::config_dir().ok_or(PlatformError::NoConfigDir)?;
        Ok(Self::resolve_with_root(&config_base))
    }

    /// Resolve and create on disk.
    pub fn resolve_and_create() -> Result<Self, PlatformError> {
        let dirs = Self::resolve()?;
        dirs.create_dirs()?;
        Ok(dirs)
    }

    /// Directories rooted under a custom base path.
    pub fn resolve_with_root(root: &Path) -> Self {
        let app_dir = root.join(APP_NAME);
        Self {
            config_dir: app_dir.join("config"),
            log_dir: app_dir.join("logs"),
        }
    }

    /// Use `config_dir` as given (from `--config`) and keep logs beside it.
    pub fn with_config_dir(config_dir: PathBuf) -> Self {
        let log_dir = config_dir.join("logs");
        Self {
            config_dir,
            log_dir,
        }
    }

    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_dirs_resolve() {
        let Ok(dirs) = PlatformDirs::resolve() else {
            return;
        };
        assert!(dirs.config_dir.is_absolute());
        assert!(dirs.log_dir.is_absolute());
        assert!(dirs.config_dir.ends_with(Path::new(APP_NAME).join("config")));
    }

    #[test]
    fn test_directory_creation() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = PlatformDirs::resolve_with_root(tmp.path());
        dirs.create_dirs().unwrap();

        assert!(dirs.config_dir.exists());
        assert!(dirs.log_dir.exists());
        assert!(dirs.config_dir.starts_with(tmp.path()));
    }

    #[test]
    fn test_with_config_dir_keeps_logs_beside() {
        let dirs = PlatformDirs::with_config_dir(PathBuf::from("custom"));
        assert_eq!(dirs.config_dir, PathBuf::from("custom"));
        assert_eq!(dirs.log_dir, Path::new("custom").join("logs"));
    }

    #[test]
    fn test_create_fails_under_a_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("not-a-dir");
        std::fs::write(&file, b"x").unwrap();
        let dirs = PlatformDirs::with_config_dir(file.join("config"));
        assert!(matches!(dirs.create_dirs(), Err(PlatformError::Io(_))));
    }
}
