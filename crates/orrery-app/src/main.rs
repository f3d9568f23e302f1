//! The `orrery` binary: resolve directories, load config, start logging, open the window.

use std::process::ExitCode;

use clap::Parser;
use orrery_app::{PlatformDirs, run_with_config};
use orrery_config::{CliArgs, Config};
use tracing::{error, info, warn};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let dirs = match &args.config {
        Some(dir) => PlatformDirs::with_config_dir(dir.clone()),
        None => match PlatformDirs::resolve() {
            Ok(dirs) => dirs,
            Err(e) => {
                eprintln!("Failed to resolve platform directories: {e}");
                return ExitCode::FAILURE;
            }
        },
    };
    if let Err(e) = dirs.create_dirs() {
        eprintln!("Failed to create {}: {e}", dirs.config_dir.display());
        return ExitCode::FAILURE;
    }

    let mut config = match Config::load_or_create(&dirs.config_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config, using defaults: {e}");
            Config::default()
        }
    };
    config.apply_cli_overrides(&args);

    let debug_build = cfg!(debug_assertions);
    let log_init = orrery_log::init_logging(Some(&dirs.log_dir), debug_build, Some(&config));
    if log_init.file_missing(debug_build) {
        warn!(
            log_dir = %dirs.log_dir.display(),
            outcome = ?log_init,
            "file logging not installed, console only"
        );
    }
    info!(
        config_dir = %dirs.config_dir.display(),
        texture_dir = %config.scene.texture_dir.display(),
        "starting orrery"
    );

    match run_with_config(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
