use super::super::super::messages::Message;
use super::super::super::state::{App, PAGE_SCROLL_ID};
use super::super::Effect;
use crate::assets::probe_dimensions;
use iced::Event;
use iced::Task;
use iced::event;
use iced::keyboard;
use iced::mouse;
use iced::widget::scrollable::{self, AbsoluteOffset};
use iced::window;
use tracing::trace;

impl App {
    pub(super) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::ScrollTo(y) => {
                trace!(y, "Scrolling page");
                scrollable::scroll_to(PAGE_SCROLL_ID.clone(), AbsoluteOffset { x: 0.0, y })
            }
            Effect::ProbeImages(paths) => {
                trace!(count = paths.len(), "Probing image dimensions");
                Task::perform(async move { probe_dimensions(paths) }, Message::ImagesProbed)
            }
        }
    }
}

pub(super) fn runtime_event_to_message(
    event: Event,
    status: event::Status,
    _window_id: window::Id,
) -> Option<Message> {
    // Pointer tracking must see moves over widgets that capture them.
    match &event {
        Event::Mouse(mouse::Event::CursorMoved { position }) => {
            return Some(Message::PointerMoved(*position));
        }
        Event::Mouse(mouse::Event::CursorLeft) => return Some(Message::PointerLeftWindow),
        Event::Mouse(mouse::Event::CursorEntered) => return Some(Message::PointerEnteredWindow),
        Event::Window(window::Event::Focused) => return Some(Message::WindowFocused(true)),
        Event::Window(window::Event::Unfocused) => return Some(Message::WindowFocused(false)),
        _ => {}
    }
    if status == event::Status::Captured {
        return None;
    }
    match event {
        Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized {
            width: size.width,
            height: size.height,
        }),
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            Some(Message::KeyPressed { key, modifiers })
        }
        _ => None,
    }
}
