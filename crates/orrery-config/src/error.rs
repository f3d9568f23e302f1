//! Errors from reading and writing `orrery.ron`.

/// Why the config file could not be loaded or saved.
///
/// The binary falls back to [`crate::Config::default`] on any of these.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `orrery.ron` exists but could not be read.
    #[error("cannot read {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config directory or file could not be written.
    #[error("cannot write {path}: {source}")]
    Write {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid RON for [`crate::Config`].
    #[error("{path} is not a valid orrery config: {source}")]
    Parse {
        path: std::path::PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("cannot serialize config: {0}")]
    Serialize(#[source] ron::Error),
}
