use super::super::super::messages::Message;
use super::super::super::state::App;
use super::super::Effect;
use iced::keyboard::{Key, key};
use neonfolio_core::viewer::ViewerClick;
use tracing::trace;

impl App {
    pub(in crate::app) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::Tick(now) => {
                let page_now = now.saturating_duration_since(self.started_at);
                self.handle_frame(page_now, &mut effects);
            }
            Message::PointerMoved(position) => self.handle_pointer_moved(position),
            Message::PointerLeftWindow => self.cursor.pointer_left_window(),
            Message::PointerEnteredWindow => self.cursor.pointer_entered_window(),
            Message::WindowResized { width, height } => {
                self.handle_window_resized(width, height, &mut effects)
            }
            Message::WindowFocused(focused) => self.handle_window_focused(focused),
            Message::KeyPressed { key, modifiers } => {
                trace!(?key, ?modifiers, "Key pressed");
                if matches!(key.as_ref(), Key::Named(key::Named::Escape)) {
                    self.handle_viewer_escape();
                }
            }
            Message::Scrolled {
                offset_y,
                viewport_height,
                content_height,
            } => self.handle_scrolled(offset_y, viewport_height, content_height, &mut effects),
            Message::CarouselNext => self.handle_carousel_next(),
            Message::CarouselPrevious => self.handle_carousel_previous(),
            Message::CarouselSelect(index) => self.handle_carousel_select(index),
            Message::CardEntered(card) => self.handle_card_entered(card),
            Message::CardExited(card) => self.handle_card_exited(card),
            Message::CardPressed(card) => self.handle_card_pressed(card),
            Message::PanelEntered => self.handle_panel_entered(),
            Message::PanelExited => self.handle_panel_exited(),
            Message::InteractiveEntered => self.cursor.hover_start(self.page_now),
            Message::InteractiveExited => self.cursor.hover_end(self.page_now),
            Message::NavTo(section) => self.handle_nav_to(section, &mut effects),
            Message::ViewerBackdropPressed => self.handle_viewer_click(ViewerClick::Backdrop),
            Message::ViewerContentPressed => self.handle_viewer_click(ViewerClick::Content),
            Message::ViewerClosePressed => self.handle_viewer_click(ViewerClick::CloseButton),
            Message::ToggleVisualMode => self.handle_toggle_visual_mode(),
            Message::ImagesProbed(probed) => self.handle_images_probed(probed),
        }

        effects
    }
}
