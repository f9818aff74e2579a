use super::super::messages::Message;
use super::super::state::App;
use super::Effect;
use crate::config::{AppConfig, CardEntry, SectionEntry, SlideEntry};
use neonfolio_core::scroll::NAV_SECTIONS;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

static NEXT_APP: AtomicUsize = AtomicUsize::new(0);

pub(super) fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

pub(super) fn test_config(slides: usize, cards_per_section: usize) -> AppConfig {
    let mut config = AppConfig::default();
    config.window_width = 1280.0;
    config.window_height = 864.0;
    config.assets_dir = PathBuf::from("/tmp/neonfolio-test-assets");
    config.slides = (0..slides)
        .map(|i| SlideEntry {
            title: format!("Slide {i}"),
            image: PathBuf::from(format!("slides/{i}.png")),
        })
        .collect();
    config.sections = NAV_SECTIONS
        .iter()
        .map(|id| SectionEntry {
            id: id.to_string(),
            title: id.to_uppercase(),
            cards: (0..cards_per_section)
                .map(|i| CardEntry {
                    title: format!("{id} {i}"),
                    image: PathBuf::from(format!("work/{id}-{i}.png")),
                    tag: String::new(),
                })
                .collect(),
        })
        .collect();
    config
}

pub(super) fn build_test_app(slides: usize, cards_per_section: usize) -> App {
    build_app_with(test_config(slides, cards_per_section))
}

pub(super) fn build_app_with(config: AppConfig) -> App {
    let prefs_path = std::env::temp_dir()
        .join(format!(
            "neonfolio-app-test-{}-{}",
            std::process::id(),
            NEXT_APP.fetch_add(1, Ordering::Relaxed)
        ))
        .join("prefs.toml");
    let (app, _task) = App::bootstrap(config, prefs_path);
    app
}

/// Deliver a frame tick `at` after the app started.
pub(super) fn tick(app: &mut App, at: Duration) -> Vec<Effect> {
    let now = app.started_at + at;
    app.reduce(Message::Tick(now))
}
