//! Scroll-driven behaviours: reveal-on-scroll, hero parallax, the section
//! highlighter in the sticky nav, and animated jumps to a section.
//!
//! All positions are page coordinates (pixels from the top of the document);
//! `scroll_y` is the document offset of the viewport's top edge.

use crate::motion::{Ease, Tween};
use std::time::Duration;
use tracing::debug;

pub const NAV_SECTIONS: [&str; 4] = ["graphic", "ecommerce", "material", "other"];

/// Sticky nav height kept clear above a section after a jump.
pub const NAV_OFFSET: f32 = 100.0;
pub const SMOOTH_SCROLL_DURATION: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, PartialEq)]
pub struct SectionSpan {
    pub id: String,
    pub top: f32,
    pub bottom: f32,
}

/// Marks the section under the viewport centre line as active.
///
/// Between sections (or above the first) the previous choice is kept.
#[derive(Debug, Default)]
pub struct NavHighlighter {
    spans: Vec<SectionSpan>,
    active: Option<usize>,
}

impl NavHighlighter {
    pub fn new(spans: Vec<SectionSpan>) -> Self {
        Self {
            spans,
            active: None,
        }
    }

    /// Replace the measured spans, keeping the current choice when its id survives.
    pub fn set_spans(&mut self, spans: Vec<SectionSpan>) {
        let active_id = self.active_id().map(str::to_owned);
        self.spans = spans;
        self.active = active_id.and_then(|id| self.spans.iter().position(|span| span.id == id));
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active
            .and_then(|index| self.spans.get(index))
            .map(|span| span.id.as_str())
    }

    /// Returns the newly active section index when it changed.
    pub fn update(&mut self, scroll_y: f32, viewport_height: f32) -> Option<usize> {
        let centre = scroll_y + viewport_height / 2.0;
        let hit = self
            .spans
            .iter()
            .position(|span| centre >= span.top && centre < span.bottom)?;
        if self.active == Some(hit) {
            return None;
        }
        debug!(section = %self.spans[hit].id, "nav section active");
        self.active = Some(hit);
        Some(hit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RevealKind {
    /// HUD panel: fades in while growing from 0.9 scale.
    Panel,
    /// Work card: rises 50px, staggered by its position within a row of three.
    Card { index: usize },
    /// Section header: slides in from the left.
    Header,
}

impl RevealKind {
    pub fn trigger(self) -> f32 {
        match self {
            RevealKind::Card { .. } => 0.85,
            RevealKind::Panel | RevealKind::Header => 0.8,
        }
    }

    pub fn duration(self) -> Duration {
        match self {
            RevealKind::Panel => Duration::from_millis(1_000),
            RevealKind::Card { .. } => Duration::from_millis(600),
            RevealKind::Header => Duration::from_millis(800),
        }
    }

    pub fn delay(self) -> Duration {
        match self {
            RevealKind::Card { index } => Duration::from_millis((index % 3) as u64 * 100),
            _ => Duration::ZERO,
        }
    }
}

/// How a reveal target is drawn at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealFrame {
    pub opacity: f32,
    pub dx: f32,
    pub dy: f32,
    pub scale: f32,
}

#[derive(Debug, Clone)]
struct RevealItem {
    kind: RevealKind,
    top: f32,
    shown: bool,
    tween: Tween,
}

/// Plays an entrance when an element's top crosses its trigger line and
/// reverses it when the element drops back below the line.
#[derive(Debug, Default)]
pub struct RevealTracker {
    items: Vec<RevealItem>,
    instant: bool,
}

impl RevealTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish every reveal immediately (reduced motion).
    pub fn set_instant(&mut self, instant: bool) {
        self.instant = instant;
    }

    pub fn add(&mut self, kind: RevealKind, top: f32) -> usize {
        self.items.push(RevealItem {
            kind,
            top,
            shown: false,
            tween: Tween::settled(0.0),
        });
        self.items.len() - 1
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn set_top(&mut self, id: usize, top: f32) {
        if let Some(item) = self.items.get_mut(id) {
            item.top = top;
        }
    }

    pub fn is_shown(&self, id: usize) -> bool {
        self.items.get(id).is_some_and(|item| item.shown)
    }

    /// Returns `(id, shown)` for every item that crossed its line.
    pub fn update(
        &mut self,
        scroll_y: f32,
        viewport_height: f32,
        now: Duration,
    ) -> Vec<(usize, bool)> {
        let mut changed = Vec::new();
        for (id, item) in self.items.iter_mut().enumerate() {
            let line = scroll_y + viewport_height * item.kind.trigger();
            let shown = item.top <= line;
            if shown == item.shown {
                continue;
            }
            item.shown = shown;
            let (target, start, duration) = if self.instant {
                (if shown { 1.0 } else { 0.0 }, now, Duration::ZERO)
            } else if shown {
                (1.0, now + item.kind.delay(), item.kind.duration())
            } else {
                (0.0, now, item.kind.duration())
            };
            let from = item.tween.value_at(now);
            item.tween = Tween::new(from, target, start, duration, Ease::Power3Out);
            changed.push((id, shown));
        }
        changed
    }

    pub fn frame(&self, id: usize, now: Duration) -> RevealFrame {
        let Some(item) = self.items.get(id) else {
            return RevealFrame {
                opacity: 1.0,
                dx: 0.0,
                dy: 0.0,
                scale: 1.0,
            };
        };
        let p = item.tween.value_at(now);
        let hidden = 1.0 - p;
        match item.kind {
            RevealKind::Panel => RevealFrame {
                opacity: p,
                dx: 0.0,
                dy: 0.0,
                scale: 1.0 - 0.1 * hidden,
            },
            RevealKind::Card { .. } => RevealFrame {
                opacity: p,
                dx: 0.0,
                dy: 50.0 * hidden,
                scale: 1.0,
            },
            RevealKind::Header => RevealFrame {
                opacity: p,
                dx: -50.0 * hidden,
                dy: 0.0,
                scale: 1.0,
            },
        }
    }
}

pub const PARALLAX_RISE: f32 = 100.0;
pub const PARALLAX_MIN_OPACITY: f32 = 0.3;
pub const SCRUB_LAG: Duration = Duration::from_secs(1);

/// Hero title parallax: progress follows scroll with a one second lag.
#[derive(Debug)]
pub struct ParallaxScrub {
    hero_top: f32,
    hero_height: f32,
    target: f32,
    tween: Tween,
}

impl ParallaxScrub {
    pub fn new(hero_top: f32, hero_height: f32) -> Self {
        Self {
            hero_top,
            hero_height,
            target: 0.0,
            tween: Tween::settled(0.0),
        }
    }

    pub fn set_hero(&mut self, hero_top: f32, hero_height: f32) {
        self.hero_top = hero_top;
        self.hero_height = hero_height;
    }

    pub fn on_scroll(&mut self, scroll_y: f32, now: Duration) {
        let target = if self.hero_height > 0.0 {
            ((scroll_y - self.hero_top) / self.hero_height).clamp(0.0, 1.0)
        } else {
            0.0
        };
        if target == self.target {
            return;
        }
        self.target = target;
        self.tween = self.tween.retarget(target, now, SCRUB_LAG, Ease::Power3Out);
    }

    /// `(y offset, opacity)` of the hero title.
    pub fn frame(&self, now: Duration) -> (f32, f32) {
        let p = self.tween.value_at(now);
        (-PARALLAX_RISE * p, 1.0 - (1.0 - PARALLAX_MIN_OPACITY) * p)
    }
}

/// Animated programmatic scroll.
#[derive(Debug, Default)]
pub struct SmoothScroll {
    tween: Option<Tween>,
}

impl SmoothScroll {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a jump so `section_top` ends up just below the sticky nav.
    /// Returns the clamped target offset.
    pub fn scroll_to(
        &mut self,
        current: f32,
        section_top: f32,
        max_scroll: f32,
        now: Duration,
    ) -> f32 {
        let target = (section_top - NAV_OFFSET).clamp(0.0, max_scroll.max(0.0));
        let from = self.offset(now).unwrap_or(current);
        self.tween = Some(Tween::new(
            from,
            target,
            now,
            SMOOTH_SCROLL_DURATION,
            Ease::Power2InOut,
        ));
        debug!(target, "smooth scroll started");
        target
    }

    /// Offset to apply this frame, or `None` once idle.
    pub fn offset(&self, now: Duration) -> Option<f32> {
        self.tween.as_ref().map(|tween| tween.value_at(now))
    }

    /// Advance; drops the animation after its last frame.
    pub fn tick(&mut self, now: Duration) -> Option<f32> {
        let tween = self.tween?;
        let value = tween.value_at(now);
        if tween.is_finished(now) {
            self.tween = None;
        }
        Some(value)
    }

    /// User input takes over.
    pub fn interrupt(&mut self) {
        self.tween = None;
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn spans() -> Vec<SectionSpan> {
        NAV_SECTIONS
            .iter()
            .enumerate()
            .map(|(i, id)| SectionSpan {
                id: (*id).to_owned(),
                top: 1_000.0 + i as f32 * 1_000.0,
                bottom: 1_800.0 + i as f32 * 1_000.0,
            })
            .collect()
    }

    #[test]
    fn centre_line_selects_section_in_both_directions() {
        let mut nav = NavHighlighter::new(spans());
        assert_eq!(nav.update(0.0, 800.0), None, "hero is not a section");
        assert_eq!(nav.update(700.0, 800.0), Some(0));
        assert_eq!(nav.update(1_700.0, 800.0), Some(1));
        assert_eq!(nav.update(800.0, 800.0), Some(0), "entering back");
        assert_eq!(nav.active_id(), Some("graphic"));
    }

    #[test]
    fn gap_between_sections_keeps_last_active() {
        let mut nav = NavHighlighter::new(spans());
        nav.update(1_700.0, 800.0);
        // centre at 2_900: inside the gap after "ecommerce"
        assert_eq!(nav.update(2_500.0, 800.0), None);
        assert_eq!(nav.active_id(), Some("ecommerce"));
    }

    #[test]
    fn respanning_keeps_active_by_id() {
        let mut nav = NavHighlighter::new(spans());
        nav.update(1_700.0, 800.0);
        let mut reordered = spans();
        reordered.reverse();
        nav.set_spans(reordered);
        assert_eq!(nav.active_id(), Some("ecommerce"));
        assert_eq!(nav.active(), Some(2));
    }

    #[test]
    fn reveal_plays_and_reverses_at_trigger_line() {
        let mut reveal = RevealTracker::new();
        let header = reveal.add(RevealKind::Header, 1_000.0);
        assert!(reveal.update(0.0, 1_000.0, ms(0)).is_empty());
        // line at 200 + 800 = 1_000
        assert_eq!(reveal.update(200.0, 1_000.0, ms(0)), vec![(header, true)]);
        assert_eq!(reveal.frame(header, ms(800)).opacity, 1.0);
        assert_eq!(reveal.update(150.0, 1_000.0, ms(1_000)), vec![(header, false)]);
        assert_eq!(reveal.frame(header, ms(1_800)).dx, -50.0);
    }

    #[test]
    fn cards_stagger_in_rows_of_three() {
        let mut reveal = RevealTracker::new();
        let ids: Vec<usize> = (0..4)
            .map(|index| reveal.add(RevealKind::Card { index }, 500.0))
            .collect();
        reveal.update(0.0, 1_000.0, ms(0));
        assert!(reveal.frame(ids[0], ms(50)).opacity > 0.0);
        assert_eq!(reveal.frame(ids[1], ms(100)).opacity, 0.0);
        assert_eq!(reveal.frame(ids[2], ms(200)).opacity, 0.0);
        assert!(reveal.frame(ids[3], ms(50)).opacity > 0.0, "fourth card restarts the row");
        assert_eq!(reveal.frame(ids[2], ms(800)).dy, 0.0);
    }

    #[test]
    fn instant_reveals_skip_the_tween() {
        let mut reveal = RevealTracker::new();
        reveal.set_instant(true);
        let panel = reveal.add(RevealKind::Panel, 100.0);
        reveal.update(0.0, 1_000.0, ms(40));
        let frame = reveal.frame(panel, ms(40));
        assert_eq!((frame.opacity, frame.scale), (1.0, 1.0));
    }

    #[test]
    fn parallax_lags_behind_scroll() {
        let mut parallax = ParallaxScrub::new(0.0, 1_000.0);
        parallax.on_scroll(1_000.0, ms(0));
        let (y, opacity) = parallax.frame(ms(500));
        assert!(y < 0.0 && y > -PARALLAX_RISE);
        assert!(opacity < 1.0 && opacity > PARALLAX_MIN_OPACITY);
        let (y, opacity) = parallax.frame(ms(1_000));
        assert_eq!(y, -PARALLAX_RISE);
        assert!((opacity - PARALLAX_MIN_OPACITY).abs() < 1e-6);
    }

    #[test]
    fn smooth_scroll_targets_below_nav_and_clamps() {
        let mut scroll = SmoothScroll::new();
        assert_eq!(scroll.scroll_to(0.0, 1_500.0, 5_000.0, ms(0)), 1_400.0);
        assert_eq!(scroll.tick(ms(400)), Some(700.0));
        assert_eq!(scroll.tick(ms(800)), Some(1_400.0));
        assert!(!scroll.is_animating());

        assert_eq!(scroll.scroll_to(0.0, 50.0, 5_000.0, ms(0)), 0.0);
        assert_eq!(scroll.scroll_to(0.0, 9_000.0, 5_000.0, ms(0)), 5_000.0);
        scroll.interrupt();
        assert_eq!(scroll.tick(ms(100)), None);
    }
}
