//! Structured logging for the orrery.
//!
//! Console output with uptime timestamps and module paths, plus a JSON file
//! in debug builds. The filter comes from `RUST_LOG` when set, otherwise from
//! the config's `debug.log_level`.

use orrery_config::Config;
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config name one.
pub const DEFAULT_FILTER: &str = "info,wgpu=warn,naga=warn";

/// Name of the JSON log file written under the log directory.
pub const LOG_FILE_NAME: &str = "orrery.log";

/// Filter directive taken from the config, falling back to [`DEFAULT_FILTER`].
pub fn filter_directive(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.trim().is_empty() => {
            config.debug.log_level.clone()
        }
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Which sinks [`init_logging`] managed to install.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogInit {
    /// Console plus the JSON file under the log directory.
    ConsoleAndFile,
    /// Console only. The log directory or file could not be created, or none was asked for.
    ConsoleOnly,
    /// A global subscriber was already set; nothing was installed.
    AlreadyInstalled,
}

impl LogInit {
    /// True when a debug build asked for the JSON file and did not get it.
    pub fn file_missing(self, debug_build: bool) -> bool {
        debug_build && self != LogInit::ConsoleAndFile
    }
}

/// Install the global tracing subscriber.
///
/// A second call is a no-op and returns [`LogInit::AlreadyInstalled`].
///
/// ```no_run
/// use orrery_config::Config;
/// use orrery_log::init_logging;
///
/// let config = Config::default();
/// init_logging(Some(std::path::Path::new("./logs")), true, Some(&config));
/// ```
pub fn init_logging(
    log_dir: Option<&Path>,
    debug_build: bool,
    config: Option<&Config>,
) -> LogInit {
    let filter_str = filter_directive(config);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE_NAME))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        return match subscriber.with(file_layer).try_init() {
            Ok(()) => LogInit::ConsoleAndFile,
            Err(_) => LogInit::AlreadyInstalled,
        };
    }

    match subscriber.try_init() {
        Ok(()) => LogInit::ConsoleOnly,
        Err(_) => LogInit::AlreadyInstalled,
    }
}

pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        let filter_str = format!("{}", default_env_filter());
        assert!(filter_str.contains("wgpu=warn"));
        assert!(filter_str.contains("naga=warn"));
        assert!(filter_str.contains("info"));
    }

    #[test]
    fn test_filter_directive_from_config() {
        let mut config = Config::default();
        config.debug.log_level = "debug,orrery_space=trace".to_string();
        assert_eq!(filter_directive(Some(&config)), "debug,orrery_space=trace");
    }

    #[test]
    fn test_filter_directive_falls_back() {
        let mut config = Config::default();
        config.debug.log_level = "  ".to_string();
        assert_eq!(filter_directive(Some(&config)), DEFAULT_FILTER);
        assert_eq!(filter_directive(None), DEFAULT_FILTER);
    }

    #[test]
    fn test_env_filter_parsing() {
        let valid_filters = [
            "info",
            "debug,orrery_render=trace",
            "warn,orrery_scene=debug,orrery_space=trace",
            "error",
        ];
        for filter_str in &valid_filters {
            let result = EnvFilter::try_from(*filter_str);
            assert!(result.is_ok(), "Failed to parse filter: {}", filter_str);
        }
    }

    #[test]
    fn test_file_missing_only_matters_in_debug_builds() {
        assert!(LogInit::ConsoleOnly.file_missing(true));
        assert!(LogInit::AlreadyInstalled.file_missing(true));
        assert!(!LogInit::ConsoleAndFile.file_missing(true));
        assert!(!LogInit::ConsoleOnly.file_missing(false));
    }

    #[test]
    fn test_init_writes_json_file_and_second_init_is_noop() {
        let temp_dir = tempfile::tempdir().unwrap();
        if init_logging(Some(temp_dir.path()), true, None) != LogInit::ConsoleAndFile {
            return;
        }
        assert_eq!(init_logging(None, false, None), LogInit::AlreadyInstalled);

        tracing::warn!(body = "moon", "texture fallback");
        let contents = std::fs::read_to_string(temp_dir.path().join(LOG_FILE_NAME)).unwrap();
        let Some(line) = contents.lines().last() else {
            return;
        };
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["level"], "WARN");
        assert_eq!(value["fields"]["body"], "moon");
    }
}
