use neonfolio_core::carousel::CarouselConfig;
use neonfolio_core::cursor::CursorConfig;
use neonfolio_core::loading::LoadingConfig;
use neonfolio_core::motion::MotionConfig;
use neonfolio_core::preview::PreviewConfig;
use serde::Deserialize;
use std::path::PathBuf;

/// High-level app configuration; deserializable from TOML.
#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub struct AppConfig {
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
    #[serde(default = "crate::config::defaults::default_window_width")]
    pub window_width: f32,
    #[serde(default = "crate::config::defaults::default_window_height")]
    pub window_height: f32,
    #[serde(default = "crate::config::defaults::default_assets_dir")]
    pub assets_dir: PathBuf,
    #[serde(default = "crate::config::defaults::default_title")]
    pub title: String,
    #[serde(default = "crate::config::defaults::default_subtitle")]
    pub subtitle: String,
    #[serde(default = "crate::config::defaults::default_terminal_text")]
    pub terminal_text: String,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
    #[serde(default)]
    pub loading: LoadingConfig,
    #[serde(default)]
    pub cursor: CursorConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub slides: Vec<SlideEntry>,
    #[serde(default)]
    pub sections: Vec<SectionEntry>,
}

impl Default for AppConfig {
    fn default() -> Self {
        use crate::config::defaults::*;
        AppConfig {
            log_level: default_log_level(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            assets_dir: default_assets_dir(),
            title: default_title(),
            subtitle: default_subtitle(),
            terminal_text: default_terminal_text(),
            carousel: CarouselConfig::default(),
            preview: PreviewConfig::default(),
            loading: LoadingConfig::default(),
            cursor: CursorConfig::default(),
            motion: MotionConfig::default(),
            slides: Vec::new(),
            sections: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn card_count(&self) -> usize {
        self.sections.iter().map(|section| section.cards.len()).sum()
    }

    /// Cards in page order, tagged with the index of their section.
    pub fn cards(&self) -> impl Iterator<Item = (usize, &CardEntry)> {
        self.sections
            .iter()
            .enumerate()
            .flat_map(|(section, entry)| entry.cards.iter().map(move |card| (section, card)))
    }
}

/// One hero carousel slide.
#[derive(Debug, Clone, Deserialize, serde::Serialize, PartialEq)]
pub struct SlideEntry {
    pub title: String,
    pub image: PathBuf,
}

/// A portfolio section; its `id` is what the nav highlights.
#[derive(Debug, Clone, Deserialize, serde::Serialize, PartialEq)]
pub struct SectionEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub cards: Vec<CardEntry>,
}

#[derive(Debug, Clone, Deserialize, serde::Serialize, PartialEq)]
pub struct CardEntry {
    pub title: String,
    pub image: PathBuf,
    #[serde(default)]
    pub tag: String,
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    #[default]
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
