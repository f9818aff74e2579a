use iced::keyboard::{Key, Modifiers};
use neonfolio_core::Size;
use std::path::PathBuf;
use std::time::Instant;

/// Messages emitted by the UI.
#[derive(Debug, Clone)]
pub enum Message {
    /// Frame tick; drives the timer queue and every animation.
    Tick(Instant),
    PointerMoved(iced::Point),
    PointerLeftWindow,
    PointerEnteredWindow,
    WindowResized {
        width: f32,
        height: f32,
    },
    WindowFocused(bool),
    KeyPressed {
        key: Key,
        modifiers: Modifiers,
    },
    Scrolled {
        offset_y: f32,
        viewport_height: f32,
        content_height: f32,
    },
    CarouselNext,
    CarouselPrevious,
    CarouselSelect(usize),
    CardEntered(usize),
    CardExited(usize),
    CardPressed(usize),
    PanelEntered,
    PanelExited,
    /// Pointer over a button or link; only the decorative cursor cares.
    InteractiveEntered,
    InteractiveExited,
    NavTo(usize),
    ViewerBackdropPressed,
    ViewerContentPressed,
    ViewerClosePressed,
    ToggleVisualMode,
    ImagesProbed(Vec<(PathBuf, Option<Size>)>),
}
