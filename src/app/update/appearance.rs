use super::super::state::App;
use crate::theme;
use neonfolio_core::visual_mode::VisualModeEffect;
use tracing::info;

/// Glitch element index of the hero title.
const HERO_TITLE_GLITCH: usize = 0;

impl App {
    pub(super) fn handle_toggle_visual_mode(&mut self) {
        let effects = self.visual_mode.toggle(&mut self.prefs, &mut self.timers);
        self.apply_visual_mode_effects(effects);
    }

    pub(super) fn apply_visual_mode_effects(&mut self, effects: Vec<VisualModeEffect>) {
        for effect in effects {
            match effect {
                VisualModeEffect::SetCrt(crt) => {
                    info!(crt, "Switched visual mode");
                    self.theme = theme::theme(crt);
                }
                VisualModeEffect::FlashStart => {
                    self.flash_started = Some(self.page_now);
                    if !self.reduced_motion() {
                        self.glitch.trigger(HERO_TITLE_GLITCH, self.page_now);
                    }
                }
                VisualModeEffect::FlashEnd => self.flash_started = None,
            }
        }
    }
}
