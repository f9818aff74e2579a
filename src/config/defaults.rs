use super::models::LogLevel;
use std::path::PathBuf;

pub(crate) fn default_log_level() -> LogLevel {
    LogLevel::Debug
}

pub(crate) fn default_window_width() -> f32 {
    1280.0
}

pub(crate) fn default_window_height() -> f32 {
    800.0
}

pub(crate) fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets")
}

pub(crate) fn default_title() -> String {
    "NEON//FOLIO".to_string()
}

pub(crate) fn default_subtitle() -> String {
    "graphic design / e-commerce / material".to_string()
}

pub(crate) fn default_terminal_text() -> String {
    "> portfolio online. scroll to explore_".to_string()
}
