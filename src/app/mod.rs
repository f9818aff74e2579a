mod canvas;
mod messages;
mod state;
mod update;
mod view;

pub use state::App;

use crate::config::AppConfig;
use iced::{Size, window};
use std::path::PathBuf;

/// Launch the page window with the loaded catalogue.
pub fn run_app(config: AppConfig, prefs_path: PathBuf) -> iced::Result {
    let window_settings = window::Settings {
        size: Size::new(config.window_width, config.window_height),
        min_size: Some(Size::new(480.0, 360.0)),
        ..window::Settings::default()
    };
    let title = config.title.clone();

    iced::application(move |_: &App| title.clone(), App::update, App::view)
        .window(window_settings)
        .subscription(App::subscription)
        .theme(|app: &App| app.theme.clone())
        .run_with(move || App::bootstrap(config, prefs_path))
}
