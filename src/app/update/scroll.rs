use super::super::state::App;
use super::Effect;
use tracing::{debug, trace};

/// Offsets closer than this to the animated value are our own scroll.
const PROGRAMMATIC_TOLERANCE: f32 = 1.0;

impl App {
    pub(super) fn handle_scrolled(
        &mut self,
        offset_y: f32,
        viewport_height: f32,
        content_height: f32,
        effects: &mut Vec<Effect>,
    ) {
        let offset_y = if offset_y.is_finite() { offset_y } else { 0.0 };
        if let Some(locked) = self.scroll_lock {
            if (offset_y - locked).abs() > 0.5 {
                trace!(offset_y, locked, "Scroll locked; snapping back");
                effects.push(Effect::ScrollTo(locked));
            }
            return;
        }

        if let Some(expected) = self.smooth_scroll.offset(self.page_now) {
            if (expected - offset_y).abs() > PROGRAMMATIC_TOLERANCE {
                debug!(expected, offset_y, "Smooth scroll interrupted by user");
                self.smooth_scroll.interrupt();
            }
        }

        if (content_height - self.layout.content_height()).abs() > 1.0
            || (viewport_height - self.layout.viewport_height()).abs() > 1.0
        {
            trace!(
                content_height,
                viewport_height,
                layout_content = self.layout.content_height(),
                layout_viewport = self.layout.viewport_height(),
                "Measured page differs from layout"
            );
        }

        self.layout.set_scroll_y(offset_y);
        self.after_scroll();
    }

    /// Everything that follows the scroll offset: nav, reveals, parallax and
    /// the popup, whose anchor moved under the pointer.
    pub(super) fn after_scroll(&mut self) {
        let scroll_y = self.layout.scroll_y();
        let viewport_height = self.layout.viewport_height();

        if let Some(active) = self.nav.update(scroll_y, viewport_height) {
            debug!(active, section = ?self.nav.active_id(), "Active nav section");
        }
        let changed = self.reveal.update(scroll_y, viewport_height, self.page_now);
        if !changed.is_empty() {
            trace!(?changed, "Reveal state changed");
        }
        self.parallax.on_scroll(scroll_y, self.page_now);

        let effects = self.preview.on_move(self.pointer, &self.layout);
        self.apply_preview_effects(effects);
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{build_test_app, ms, tick};
    use super::*;
    use crate::app::messages::Message;

    fn scrolled(app: &mut App, offset_y: f32) -> Vec<Effect> {
        let viewport_height = app.layout.viewport_height();
        let content_height = app.layout.content_height();
        app.reduce(Message::Scrolled {
            offset_y,
            viewport_height,
            content_height,
        })
    }

    #[test]
    fn nav_keeps_the_last_section_between_blocks() {
        let mut app = build_test_app(0, 3);
        assert_eq!(app.nav.active(), None);

        let first = app.layout.sections()[0].clone();
        let half = app.layout.viewport_height() / 2.0;
        scrolled(&mut app, first.top + 10.0 - half);
        assert_eq!(app.nav.active_id(), Some("graphic"));

        // Centre line in the gap between the first two blocks.
        scrolled(&mut app, first.bottom + 10.0 - half);
        assert_eq!(app.nav.active_id(), Some("graphic"));

        let second = app.layout.sections()[1].clone();
        scrolled(&mut app, second.top + 10.0 - half);
        assert_eq!(app.nav.active_id(), Some("ecommerce"));
    }

    #[test]
    fn reveals_play_and_reverse_with_scroll() {
        let mut app = build_test_app(0, 3);
        let id = app.reveal_ids.headers[0];
        assert!(!app.reveal.is_shown(id));

        let top = app.layout.sections()[0].top;
        scrolled(&mut app, top);
        assert!(app.reveal.is_shown(id));
        tick(&mut app, ms(1_000));
        assert_eq!(app.reveal.frame(id, app.page_now).opacity, 1.0);

        scrolled(&mut app, 0.0);
        assert!(!app.reveal.is_shown(id), "scrolling back above the line reverses");
    }

    #[test]
    fn user_scroll_interrupts_the_nav_animation() {
        let mut app = build_test_app(0, 3);
        app.reduce(Message::NavTo(2));
        tick(&mut app, ms(200));
        let ours = app.layout.scroll_y();

        scrolled(&mut app, ours);
        assert!(app.smooth_scroll.is_animating(), "our own offset echoes back");

        scrolled(&mut app, ours + 300.0);
        assert!(!app.smooth_scroll.is_animating());
        assert_eq!(app.layout.scroll_y(), ours + 300.0);
    }

    #[test]
    fn parallax_lags_behind_the_scroll() {
        let mut app = build_test_app(0, 1);
        let hero = app.layout.hero_height();
        scrolled(&mut app, hero);
        let (y_now, _) = app.parallax.frame(app.page_now);
        assert_eq!(y_now, 0.0, "scrub starts from where it was");

        tick(&mut app, ms(1_000));
        let (y, opacity) = app.parallax.frame(app.page_now);
        assert_eq!(y, -100.0);
        assert!((opacity - 0.3).abs() < 1e-6);
    }
}
