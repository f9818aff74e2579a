mod reducer;
mod runtime;

use super::super::messages::Message;
use super::super::state::{App, FRAME_INTERVAL};
use super::Effect;
use iced::event;
use iced::time;
use iced::{Subscription, Task};

impl App {
    pub fn subscription(_app: &App) -> Subscription<Message> {
        Subscription::batch(vec![
            event::listen_with(runtime::runtime_event_to_message),
            time::every(FRAME_INTERVAL).map(Message::Tick),
        ])
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let effects = self.reduce(message);
        self.run_effects(effects)
    }

    /// Kick off the loading screen, carousel and decorative timers.
    pub(in crate::app) fn start(&mut self) -> Task<Message> {
        let mut effects = Vec::new();
        self.start_page(&mut effects);
        self.run_effects(effects)
    }

    fn run_effects(&mut self, effects: Vec<Effect>) -> Task<Message> {
        if effects.is_empty() {
            Task::none()
        } else {
            Task::batch(effects.into_iter().map(|effect| self.run_effect(effect)))
        }
    }
}
