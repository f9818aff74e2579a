use super::super::state::App;
use neonfolio_core::Point;
use neonfolio_core::preview::{AnchorId, HoverRegion, PreviewEffect};
use neonfolio_core::viewer::{ViewerClick, ViewerEffect};
use std::path::PathBuf;
use tracing::{debug, warn};

impl App {
    pub(super) fn handle_pointer_moved(&mut self, position: iced::Point) {
        self.pointer = Point::new(position.x, position.y);
        self.cursor.pointer_moved(self.pointer);
        let effects = self.preview.on_move(self.pointer, &self.layout);
        self.apply_preview_effects(effects);
    }

    pub(super) fn handle_card_entered(&mut self, card: usize) {
        if card >= self.card_paths.len() {
            warn!(card, "Hover on unknown card");
            return;
        }
        self.dimmer.hover_start(card, self.page_now);
        self.cursor.hover_start(self.page_now);
        let effects = self.preview.on_enter(
            HoverRegion::Anchor(AnchorId(card)),
            self.pointer,
            &self.layout,
            &mut self.timers,
        );
        self.apply_preview_effects(effects);
    }

    pub(super) fn handle_card_exited(&mut self, card: usize) {
        if card >= self.card_paths.len() {
            return;
        }
        self.dimmer.hover_end(card, self.page_now);
        self.cursor.hover_end(self.page_now);
        let effects = self
            .preview
            .on_leave(HoverRegion::Anchor(AnchorId(card)), &mut self.timers);
        self.apply_preview_effects(effects);
    }

    pub(super) fn handle_panel_entered(&mut self) {
        let effects = self.preview.on_enter(
            HoverRegion::Panel,
            self.pointer,
            &self.layout,
            &mut self.timers,
        );
        self.apply_preview_effects(effects);
    }

    pub(super) fn handle_panel_exited(&mut self) {
        let effects = self.preview.on_leave(HoverRegion::Panel, &mut self.timers);
        self.apply_preview_effects(effects);
    }

    pub(super) fn apply_preview_effects(&mut self, effects: Vec<PreviewEffect>) {
        for effect in effects {
            match effect {
                PreviewEffect::Show { anchor, placement } => {
                    self.popup.show(anchor.0, placement, self.page_now);
                }
                PreviewEffect::Move { placement } => self.popup.placement = Some(placement),
                PreviewEffect::FadeOut { .. } => {
                    self.popup.fade_out(self.page_now, self.config.preview.fade());
                }
                PreviewEffect::Remove { .. } => self.popup.remove(),
            }
        }
    }

    pub(super) fn handle_card_pressed(&mut self, card: usize) {
        let Some(path) = self.card_path(card).cloned() else {
            warn!(card, "Click on unknown card");
            return;
        };
        let dismissed = self.preview.dispose(&mut self.timers);
        self.apply_preview_effects(dismissed);
        let effects = self.viewer.open(path);
        self.apply_viewer_effects(effects);
    }

    pub(super) fn handle_viewer_click(&mut self, target: ViewerClick) {
        let effects = self.viewer.on_click(target);
        self.apply_viewer_effects(effects);
    }

    pub(super) fn handle_viewer_escape(&mut self) {
        let effects = self.viewer.on_escape();
        self.apply_viewer_effects(effects);
    }

    fn apply_viewer_effects(&mut self, effects: Vec<ViewerEffect<PathBuf>>) {
        for effect in effects {
            match effect {
                ViewerEffect::Open(path) => debug!(path = %path.display(), "Viewer showing"),
                ViewerEffect::Close => debug!("Viewer hidden"),
                ViewerEffect::LockScroll => {
                    self.smooth_scroll.interrupt();
                    self.scroll_lock = Some(self.layout.scroll_y());
                }
                ViewerEffect::UnlockScroll => self.scroll_lock = None,
            }
        }
    }
}
