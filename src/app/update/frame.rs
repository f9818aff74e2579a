use super::super::state::{App, AppTimer, RESIZE_DEBOUNCE};
use super::Effect;
use neonfolio_core::loading::LoadingEffect;
use neonfolio_core::motion::{Ease, Tween};
use neonfolio_core::{Fired, Size};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, trace};

impl App {
    pub(super) fn start_page(&mut self, effects: &mut Vec<Effect>) {
        let loading = self.loading.start(&mut self.timers);
        self.apply_loading_effects(loading);

        let carousel = self.carousel.start(&mut self.timers);
        self.apply_carousel_effects(carousel);

        if self.reduced_motion() {
            debug!("Reduced motion; glitch flicker disabled");
        } else {
            self.glitch.start(&mut self.timers);
        }

        self.after_scroll();
        effects.push(Effect::ProbeImages(self.images.paths()));
    }

    /// One frame: advance both clocks and fire everything that fell due.
    pub(super) fn handle_frame(&mut self, page_now: Duration, effects: &mut Vec<Effect>) {
        self.page_now = self.page_now.max(page_now);
        self.anim_now = self.clock.advance(self.page_now);

        while let Some(fired) = self.timers.pop_due(self.page_now) {
            self.handle_fired(fired);
        }

        if let Some(y) = self.smooth_scroll.tick(self.page_now) {
            self.layout.set_scroll_y(y);
            self.after_scroll();
            effects.push(Effect::ScrollTo(self.layout.scroll_y()));
        }

        self.cursor_frame = self.cursor.frame(self.page_now);
    }

    fn handle_fired(&mut self, fired: Fired<AppTimer>) {
        let Fired { handle, timer, at } = fired;
        trace!(?timer, at_ms = at.as_millis() as u64, "Timer fired");
        match timer {
            AppTimer::Carousel(timer) => {
                let effects = self.carousel.on_timer(handle, timer, &mut self.timers);
                self.apply_carousel_effects(effects);
            }
            AppTimer::Preview(timer) => {
                let effects = self
                    .preview
                    .on_timer(handle, timer, &self.layout, &mut self.timers);
                self.apply_preview_effects(effects);
            }
            AppTimer::Loading(timer) => {
                let effects = self
                    .loading
                    .on_timer(handle, timer, &mut self.rng, &mut self.timers);
                self.apply_loading_effects(effects);
            }
            AppTimer::Glitch(timer) => {
                let restarted = self
                    .glitch
                    .on_timer(handle, timer, &mut self.rng, &mut self.timers);
                if !restarted.is_empty() {
                    trace!(?restarted, "Glitch restarted");
                }
            }
            AppTimer::VisualMode(timer) => {
                let effects = self.visual_mode.on_timer(handle, timer);
                self.apply_visual_mode_effects(effects);
            }
            AppTimer::Resize => {
                if self.resize.fire(handle) {
                    self.refresh_triggers();
                    self.after_scroll();
                }
            }
        }
    }

    fn apply_loading_effects(&mut self, effects: Vec<LoadingEffect>) {
        for effect in effects {
            match effect {
                LoadingEffect::Progress { percent, label } => {
                    self.loading_screen.percent = percent;
                    self.loading_screen.label = label;
                }
                LoadingEffect::Message(message) => {
                    debug!(message, "Loading message");
                    self.loading_screen.message = message;
                }
                LoadingEffect::BeginFade { duration } => {
                    let duration = if self.reduced_motion() {
                        Duration::ZERO
                    } else {
                        duration
                    };
                    self.loading_screen.fade = Some(Tween::new(
                        1.0,
                        0.0,
                        self.page_now,
                        duration,
                        Ease::Power2InOut,
                    ));
                }
                LoadingEffect::Finished => {
                    self.loading_screen.visible = false;
                    self.hero.play(self.page_now);
                    self.terminal.start(self.page_now);
                    info!(at_ms = self.page_now.as_millis() as u64, "Page ready");
                }
            }
        }
    }

    pub(super) fn handle_window_resized(
        &mut self,
        width: f32,
        height: f32,
        effects: &mut Vec<Effect>,
    ) {
        self.layout.resize(Size::new(width, height), &self.config.sections);
        self.resize.trigger(RESIZE_DEBOUNCE, AppTimer::Resize, &mut self.timers);
        trace!(width, height, "Window resized");
        if let Some(locked) = self.scroll_lock {
            let clamped = locked.min(self.layout.max_scroll());
            self.scroll_lock = Some(clamped);
            effects.push(Effect::ScrollTo(clamped));
        }
    }

    pub(super) fn handle_window_focused(&mut self, focused: bool) {
        if !self.config.motion.pause_when_hidden {
            return;
        }
        if focused {
            self.clock.resume();
        } else {
            self.clock.pause();
        }
        debug!(focused, "Animation clock focus change");
    }

    pub(super) fn handle_images_probed(&mut self, probed: Vec<(PathBuf, Option<Size>)>) {
        self.images.record_sizes(probed);
        let sizes = self
            .card_paths
            .iter()
            .map(|path| self.images.preview_size(path))
            .collect();
        self.layout.set_panel_sizes(sizes);
        debug!(cards = self.card_paths.len(), "Preview sizes recorded");
    }
}
