use super::super::state::App;
use super::Effect;
use neonfolio_core::carousel::CarouselEffect;
use tracing::{debug, warn};

impl App {
    pub(super) fn handle_carousel_next(&mut self) {
        let effects = self.carousel.next(&mut self.timers);
        self.apply_carousel_effects(effects);
    }

    pub(super) fn handle_carousel_previous(&mut self) {
        let effects = self.carousel.previous(&mut self.timers);
        self.apply_carousel_effects(effects);
    }

    pub(super) fn handle_carousel_select(&mut self, index: usize) {
        let effects = self.carousel.select_index(index, &mut self.timers);
        self.apply_carousel_effects(effects);
    }

    pub(super) fn apply_carousel_effects(&mut self, effects: Vec<CarouselEffect>) {
        let instant = self.reduced_motion();
        for effect in effects {
            match effect {
                CarouselEffect::ShowSlide { index, cause } => {
                    debug!(index, ?cause, "Showing slide");
                    self.slides.slide_to(index, self.page_now, instant);
                }
                CarouselEffect::ResetProgress { index } => self.slides.set_fill(index, 0.0),
                CarouselEffect::SetProgress { index, fraction } => {
                    self.slides.set_fill(index, fraction)
                }
            }
        }
    }

    /// Nav link: animate to the section, leaving room for the sticky bar.
    pub(super) fn handle_nav_to(&mut self, section: usize, effects: &mut Vec<Effect>) {
        if self.scroll_lock.is_some() {
            debug!(section, "Nav ignored while the viewer is open");
            return;
        }
        let Some(top) = self.layout.sections().get(section).map(|block| block.top) else {
            warn!(section, "Nav target has no section block");
            return;
        };
        let target = self.smooth_scroll.scroll_to(
            self.layout.scroll_y(),
            top,
            self.layout.max_scroll(),
            self.page_now,
        );
        if self.reduced_motion() {
            self.smooth_scroll.interrupt();
            self.layout.set_scroll_y(target);
            self.after_scroll();
            effects.push(Effect::ScrollTo(target));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{build_app_with, build_test_app, ms, test_config, tick};
    use crate::app::messages::Message;
    use neonfolio_core::scroll::NAV_OFFSET;

    #[test]
    fn manual_navigation_restarts_the_dwell() {
        let mut app = build_test_app(3, 0);
        tick(&mut app, ms(10_000));
        assert_eq!(app.carousel.current_index(), 1, "autoplay after one dwell");

        tick(&mut app, ms(15_000));
        app.reduce(Message::CarouselPrevious);
        assert_eq!(app.carousel.current_index(), 0);
        assert_eq!(app.slides.fills[0], 0.0);

        tick(&mut app, ms(24_999));
        assert_eq!(app.carousel.current_index(), 0, "old dwell must not fire at 20s");
        tick(&mut app, ms(25_000));
        assert_eq!(app.carousel.current_index(), 1);
    }

    #[test]
    fn progress_fill_tracks_the_current_slide() {
        let mut app = build_test_app(3, 0);
        tick(&mut app, ms(5_000));
        let fill = app.slides.fills[0];
        assert!(fill > 0.4 && fill <= 0.5, "half way through the dwell, got {fill}");
        assert_eq!(app.slides.fills[1], 0.0);

        app.reduce(Message::CarouselSelect(9));
        assert_eq!(app.carousel.current_index(), 2, "out of range clamps to the last");
        assert_eq!(app.slides.fills[0], 0.0, "the slide left behind resets");
    }

    #[test]
    fn slide_strip_animates_towards_the_new_index() {
        let mut app = build_test_app(3, 0);
        tick(&mut app, ms(100));
        app.reduce(Message::CarouselNext);
        tick(&mut app, ms(400));
        let mid = app.slides.offset.value_at(app.page_now);
        assert!(mid > 0.0 && mid < 1.0, "strip should be mid-slide, got {mid}");
        tick(&mut app, ms(700));
        assert_eq!(app.slides.offset.value_at(app.page_now), 1.0);
    }

    #[test]
    fn nav_scroll_lands_below_the_sticky_bar() {
        let mut app = build_test_app(0, 3);
        let section_top = app.layout.sections()[1].top;
        app.reduce(Message::NavTo(1));
        assert!(app.smooth_scroll.is_animating());

        tick(&mut app, ms(400));
        let halfway = app.layout.scroll_y();
        assert!(halfway > 0.0 && halfway < section_top - NAV_OFFSET);

        let effects = tick(&mut app, ms(800));
        assert_eq!(app.layout.scroll_y(), section_top - NAV_OFFSET);
        assert!(!app.smooth_scroll.is_animating());
        assert_eq!(
            effects,
            vec![super::Effect::ScrollTo(section_top - NAV_OFFSET)]
        );
        assert_eq!(app.nav.active_id(), Some("ecommerce"));
    }

    #[test]
    fn reduced_motion_jumps_straight_to_the_section() {
        let mut config = test_config(0, 3);
        config.motion.reduced_motion = true;
        let mut app = build_app_with(config);
        let section_top = app.layout.sections()[2].top;

        let effects = app.reduce(Message::NavTo(2));
        assert_eq!(effects, vec![super::Effect::ScrollTo(section_top - NAV_OFFSET)]);
        assert!(!app.smooth_scroll.is_animating());
    }

    #[test]
    fn unknown_section_is_ignored() {
        let mut app = build_test_app(0, 1);
        assert!(app.reduce(Message::NavTo(42)).is_empty());
        assert!(!app.smooth_scroll.is_animating());
    }
}
