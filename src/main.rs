//! Entry point for the neon portfolio page.
//!
//! Responsibilities here are intentionally minimal:
//! - Parse the optional config path argument.
//! - Load the catalogue and behaviour settings from TOML.
//! - Launch the GUI with the loaded config and the preference file location.

mod app;
mod assets;
mod cache;
mod config;
mod layout;
mod theme;

use crate::app::run_app;
use crate::cache::prefs_path;
use crate::config::load_config;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

const DEFAULT_CONFIG: &str = "conf/config.toml";

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let config_path = parse_args();
    let config = load_config(&config_path);
    set_log_level(reload_handle, config.log_level.as_filter_str());
    info!(
        config = %config_path.display(),
        level = %config.log_level,
        "Starting neonfolio"
    );
    if !config.assets_dir.is_dir() {
        warn!(
            assets = %config.assets_dir.display(),
            "Assets directory missing; images will render as placeholders"
        );
    }

    let prefs = prefs_path();
    info!(path = %prefs.display(), "Using preference file");
    run_app(config, prefs).context("Failed to start the GUI")?;
    Ok(())
}

fn parse_args() -> PathBuf {
    env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG))
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    warn!("Logging initialized; override level with config.log_level or RUST_LOG");
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("debug"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}
