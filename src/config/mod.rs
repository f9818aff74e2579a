//! Configuration loading for the portfolio shell.
//!
//! Window and logging settings, per-behaviour tables, and the page catalogue
//! (slides, sections, cards) are loaded from `conf/config.toml` if present.
//! Any missing or invalid entries fall back to defaults so the page can still
//! launch.

mod defaults;
mod io;
mod models;

pub use io::{load_config, parse_config};
pub use models::{AppConfig, CardEntry, LogLevel, SectionEntry, SlideEntry};
