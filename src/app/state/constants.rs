use iced::widget::scrollable::Id as ScrollId;
use once_cell::sync::Lazy;
use std::time::Duration;

/// Frame tick for animations and the timer queue.
pub(crate) const FRAME_INTERVAL: Duration = Duration::from_millis(16);
/// Quiet period before a resize refreshes trigger positions.
pub(crate) const RESIZE_DEBOUNCE: Duration = Duration::from_millis(250);
pub(crate) const SLIDE_DURATION: Duration = Duration::from_millis(600);
pub(crate) const POPUP_FADE_IN: Duration = Duration::from_millis(300);
pub(crate) const POPUP_MIN_SCALE: f32 = 0.8;
pub(crate) const HEADER_TEXT_SIZE: f32 = 36.0;
pub(crate) const HERO_TITLE_SIZE: f32 = 72.0;
pub(crate) static PAGE_SCROLL_ID: Lazy<ScrollId> = Lazy::new(|| ScrollId::new("page-scroll"));
