//! Autoplaying slide carousel with a per-slide dwell progress indicator.
//!
//! The controller owns two timer slots: the dwell timer that advances the
//! slide and the sampling timer that ticks the progress fill. Every
//! transition empties both slots before scheduling again, so an instance never
//! has more than one of each live no matter how fast navigation arrives.

use crate::timers::{Scheduler, TimerHandle, cancel_slot};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace};

/// Width of the progress indicator for the slide on screen.
pub const ACTIVE_INDICATOR_WIDTH: f32 = 96.0;
/// Width of every other progress indicator.
pub const INACTIVE_INDICATOR_WIDTH: f32 = 48.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub dwell_ms: u64,
    pub progress_steps: u32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            dwell_ms: 10_000,
            progress_steps: 100,
        }
    }
}

impl CarouselConfig {
    pub fn dwell(&self) -> Duration {
        Duration::from_millis(self.dwell_ms.max(1))
    }

    pub fn steps(&self) -> u32 {
        self.progress_steps.max(1)
    }

    pub fn sample_interval(&self) -> Duration {
        self.dwell() / self.steps()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselTimer {
    Dwell,
    ProgressSample,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselPhase {
    /// Fewer than two slides, not started, or disposed.
    Idle,
    Autoplaying,
    /// Held only while a navigation call restarts the timers.
    ManualOverride,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCause {
    Autoplay,
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarouselEffect {
    /// Slide `index` is now current: translate the strip and resize indicators.
    ShowSlide { index: usize, cause: ChangeCause },
    ResetProgress { index: usize },
    SetProgress { index: usize, fraction: f32 },
}

#[derive(Debug)]
pub struct Carousel {
    config: CarouselConfig,
    len: usize,
    current: usize,
    progress_ticks: u32,
    phase: CarouselPhase,
    dwell: Option<TimerHandle>,
    sample: Option<TimerHandle>,
}

impl Carousel {
    pub fn new(len: usize, config: CarouselConfig) -> Self {
        Self {
            config,
            len,
            current: 0,
            progress_ticks: 0,
            phase: CarouselPhase::Idle,
            dwell: None,
            sample: None,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn phase(&self) -> CarouselPhase {
        self.phase
    }

    /// Elapsed fraction of the current slide's dwell, as last sampled.
    pub fn progress(&self) -> f32 {
        (self.progress_ticks as f32 / self.config.steps() as f32).min(1.0)
    }

    pub fn indicator_width(&self, index: usize) -> f32 {
        if index == self.current {
            ACTIVE_INDICATOR_WIDTH
        } else {
            INACTIVE_INDICATOR_WIDTH
        }
    }

    /// Navigation needs two slides and a running carousel; after `dispose`
    /// it stays a no-op until `start` is called again.
    fn navigable(&self) -> bool {
        self.len > 1 && self.phase != CarouselPhase::Idle
    }

    /// Begin autoplay at slide 0. A carousel with fewer than two slides stays
    /// idle and only reports its single slide.
    pub fn start(&mut self, sched: &mut impl Scheduler<CarouselTimer>) -> Vec<CarouselEffect> {
        if self.is_empty() {
            debug!("carousel has no slides; staying idle");
            return Vec::new();
        }
        self.current = 0;
        let mut effects = vec![CarouselEffect::ShowSlide {
            index: 0,
            cause: ChangeCause::Autoplay,
        }];
        if !self.navigable() {
            debug!(len = self.len, "single-slide carousel; autoplay disabled");
            return effects;
        }
        self.restart(sched, &mut effects);
        effects
    }

    pub fn next(&mut self, sched: &mut impl Scheduler<CarouselTimer>) -> Vec<CarouselEffect> {
        if !self.navigable() {
            return Vec::new();
        }
        let target = (self.current + 1) % self.len;
        self.navigate(target, sched)
    }

    pub fn previous(&mut self, sched: &mut impl Scheduler<CarouselTimer>) -> Vec<CarouselEffect> {
        if !self.navigable() {
            return Vec::new();
        }
        let target = (self.current + self.len - 1) % self.len;
        self.navigate(target, sched)
    }

    /// Jump to `index`, clamped into `[0, len - 1]`.
    pub fn select_index(
        &mut self,
        index: usize,
        sched: &mut impl Scheduler<CarouselTimer>,
    ) -> Vec<CarouselEffect> {
        if !self.navigable() {
            return Vec::new();
        }
        let clamped = index.min(self.len - 1);
        if clamped != index {
            debug!(requested = index, clamped, "carousel index out of range");
        }
        self.navigate(clamped, sched)
    }

    fn navigate(
        &mut self,
        target: usize,
        sched: &mut impl Scheduler<CarouselTimer>,
    ) -> Vec<CarouselEffect> {
        self.phase = CarouselPhase::ManualOverride;
        debug!(from = self.current, to = target, "carousel manual navigation");
        let mut effects = Vec::new();
        self.move_to(target, ChangeCause::Manual, &mut effects);
        self.restart(sched, &mut effects);
        effects
    }

    /// Route a fired timer back into the controller. Handles that are no
    /// longer the live ones are ignored.
    pub fn on_timer(
        &mut self,
        handle: TimerHandle,
        timer: CarouselTimer,
        sched: &mut impl Scheduler<CarouselTimer>,
    ) -> Vec<CarouselEffect> {
        let mut effects = Vec::new();
        match timer {
            CarouselTimer::Dwell => {
                if self.dwell != Some(handle) {
                    trace!("stale dwell timer ignored");
                    return effects;
                }
                self.dwell = None;
                cancel_slot(&mut self.sample, sched);
                if self.progress_ticks < self.config.steps() {
                    // The last sample shares this deadline but was queued later.
                    self.progress_ticks = self.config.steps();
                    effects.push(CarouselEffect::SetProgress {
                        index: self.current,
                        fraction: 1.0,
                    });
                }
                let target = (self.current + 1) % self.len;
                debug!(from = self.current, to = target, "carousel autoplay advance");
                self.move_to(target, ChangeCause::Autoplay, &mut effects);
                self.restart(sched, &mut effects);
            }
            CarouselTimer::ProgressSample => {
                if self.sample != Some(handle) {
                    trace!("stale progress sample ignored");
                    return effects;
                }
                self.sample = None;
                let steps = self.config.steps();
                self.progress_ticks = (self.progress_ticks + 1).min(steps);
                effects.push(CarouselEffect::SetProgress {
                    index: self.current,
                    fraction: self.progress(),
                });
                if self.progress_ticks < steps {
                    self.sample =
                        Some(sched.schedule(self.config.sample_interval(), timer));
                }
            }
        }
        effects
    }

    /// Cancel every pending timer. Safe to call repeatedly.
    pub fn dispose(&mut self, sched: &mut impl Scheduler<CarouselTimer>) {
        self.cancel_timers(sched);
        if self.phase != CarouselPhase::Idle {
            debug!(index = self.current, "carousel disposed");
        }
        self.phase = CarouselPhase::Idle;
    }

    fn move_to(&mut self, target: usize, cause: ChangeCause, effects: &mut Vec<CarouselEffect>) {
        let left = self.current;
        self.current = target;
        self.progress_ticks = 0;
        effects.push(CarouselEffect::ResetProgress { index: left });
        if left != target {
            effects.push(CarouselEffect::ResetProgress { index: target });
        }
        effects.push(CarouselEffect::ShowSlide {
            index: target,
            cause,
        });
    }

    fn restart(
        &mut self,
        sched: &mut impl Scheduler<CarouselTimer>,
        effects: &mut Vec<CarouselEffect>,
    ) {
        self.cancel_timers(sched);
        self.progress_ticks = 0;
        effects.push(CarouselEffect::SetProgress {
            index: self.current,
            fraction: 0.0,
        });
        self.dwell = Some(sched.schedule(self.config.dwell(), CarouselTimer::Dwell));
        self.sample = Some(sched.schedule(
            self.config.sample_interval(),
            CarouselTimer::ProgressSample,
        ));
        self.phase = CarouselPhase::Autoplaying;
    }

    fn cancel_timers(&mut self, sched: &mut impl Scheduler<CarouselTimer>) {
        cancel_slot(&mut self.dwell, sched);
        cancel_slot(&mut self.sample, sched);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timers::TimerQueue;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn config(dwell_ms: u64, progress_steps: u32) -> CarouselConfig {
        CarouselConfig {
            dwell_ms,
            progress_steps,
        }
    }

    fn started(len: usize, cfg: CarouselConfig) -> (Carousel, TimerQueue<CarouselTimer>) {
        let mut queue: TimerQueue<CarouselTimer> = TimerQueue::new();
        let mut carousel = Carousel::new(len, cfg);
        carousel.start(&mut queue);
        (carousel, queue)
    }

    /// Fire everything due up to `until`, collecting the carousel's effects.
    fn run_until(
        carousel: &mut Carousel,
        queue: &mut TimerQueue<CarouselTimer>,
        until: Duration,
    ) -> Vec<CarouselEffect> {
        let mut effects = Vec::new();
        while let Some(fired) = queue.pop_due(until) {
            effects.extend(carousel.on_timer(fired.handle, fired.timer, queue));
        }
        effects
    }

    fn live(queue: &TimerQueue<CarouselTimer>, kind: CarouselTimer) -> usize {
        queue.pending().filter(|timer| **timer == kind).count()
    }

    #[test]
    fn next_cycles_back_to_start() {
        for len in 2..7 {
            let (mut carousel, mut queue) = started(len, CarouselConfig::default());
            carousel.select_index(1, &mut queue);
            for _ in 0..len {
                carousel.next(&mut queue);
            }
            assert_eq!(carousel.current_index(), 1, "len={len}");
        }
    }

    #[test]
    fn previous_wraps_from_first_slide() {
        let (mut carousel, mut queue) = started(4, CarouselConfig::default());
        carousel.previous(&mut queue);
        assert_eq!(carousel.current_index(), 3);
    }

    #[test]
    fn select_index_sets_index_and_resets_progress() {
        let (mut carousel, mut queue) = started(5, config(1_000, 10));
        run_until(&mut carousel, &mut queue, ms(450));
        assert!(carousel.progress() > 0.0);

        let effects = carousel.select_index(3, &mut queue);
        assert_eq!(carousel.current_index(), 3);
        assert_eq!(carousel.progress(), 0.0);
        assert!(effects.contains(&CarouselEffect::SetProgress {
            index: 3,
            fraction: 0.0
        }));
    }

    #[test]
    fn select_index_clamps_out_of_range_requests() {
        let (mut carousel, mut queue) = started(3, CarouselConfig::default());
        carousel.select_index(42, &mut queue);
        assert_eq!(carousel.current_index(), 2);
    }

    #[test]
    fn rapid_navigation_never_leaks_timers() {
        let (mut carousel, mut queue) = started(4, CarouselConfig::default());
        for step in 0..50 {
            match step % 3 {
                0 => carousel.next(&mut queue),
                1 => carousel.previous(&mut queue),
                _ => carousel.select_index(step, &mut queue),
            };
            assert_eq!(live(&queue, CarouselTimer::Dwell), 1);
            assert_eq!(live(&queue, CarouselTimer::ProgressSample), 1);
        }
        assert_eq!(carousel.phase(), CarouselPhase::Autoplaying);
    }

    #[test]
    fn progress_is_monotonic_and_resets_on_advance() {
        let (mut carousel, mut queue) = started(3, config(1_000, 20));
        let mut last = 0.0f32;
        for t in (0..=990).step_by(10) {
            run_until(&mut carousel, &mut queue, ms(t));
            assert!(
                carousel.progress() + f32::EPSILON >= last,
                "progress went backwards at t={t}"
            );
            last = carousel.progress();
        }
        assert!(last > 0.9);

        let effects = run_until(&mut carousel, &mut queue, ms(1_000));
        assert_eq!(carousel.current_index(), 1);
        assert_eq!(carousel.progress(), 0.0);
        assert!(effects.contains(&CarouselEffect::ResetProgress { index: 0 }));
    }

    #[test]
    fn only_current_slide_progress_animates() {
        let (mut carousel, mut queue) = started(3, config(1_000, 10));
        let effects = run_until(&mut carousel, &mut queue, ms(2_500));
        let mut current = 0;
        for effect in effects {
            match effect {
                CarouselEffect::ShowSlide { index, .. } => current = index,
                CarouselEffect::SetProgress { index, .. } => assert_eq!(index, current),
                CarouselEffect::ResetProgress { .. } => {}
            }
        }
    }

    #[test]
    fn manual_navigation_restarts_dwell_from_zero() {
        let (mut carousel, mut queue) = started(3, config(10, 10));
        assert_eq!(carousel.current_index(), 0);

        run_until(&mut carousel, &mut queue, ms(10));
        assert_eq!(carousel.current_index(), 1);
        assert_eq!(carousel.progress(), 0.0);

        run_until(&mut carousel, &mut queue, ms(15));
        carousel.previous(&mut queue);
        assert_eq!(carousel.current_index(), 0);

        run_until(&mut carousel, &mut queue, ms(20));
        assert_eq!(carousel.current_index(), 0, "old dwell deadline must not fire");

        run_until(&mut carousel, &mut queue, ms(24));
        assert_eq!(carousel.current_index(), 0);
        run_until(&mut carousel, &mut queue, ms(25));
        assert_eq!(carousel.current_index(), 1);
    }

    #[test]
    fn degenerate_sizes_stay_idle() {
        for len in [0usize, 1] {
            let (mut carousel, mut queue) = started(len, CarouselConfig::default());
            assert_eq!(carousel.phase(), CarouselPhase::Idle);
            assert!(queue.is_empty());
            assert!(carousel.next(&mut queue).is_empty());
            assert!(carousel.previous(&mut queue).is_empty());
            assert!(carousel.select_index(3, &mut queue).is_empty());
            assert!(queue.is_empty(), "len={len} scheduled a timer");
            assert_eq!(carousel.current_index(), 0);
        }
    }

    #[test]
    fn dispose_is_idempotent_and_cancels_everything() {
        let (mut carousel, mut queue) = started(3, CarouselConfig::default());
        carousel.dispose(&mut queue);
        carousel.dispose(&mut queue);
        assert!(queue.is_empty());
        assert_eq!(carousel.phase(), CarouselPhase::Idle);
        assert!(run_until(&mut carousel, &mut queue, ms(60_000)).is_empty());
    }

    #[test]
    fn indicator_fills_completely_before_advancing() {
        let (mut carousel, mut queue) = started(3, config(1_000, 10));
        let effects = run_until(&mut carousel, &mut queue, ms(1_000));
        let full = effects
            .iter()
            .position(|effect| {
                *effect
                    == CarouselEffect::SetProgress {
                        index: 0,
                        fraction: 1.0,
                    }
            })
            .expect("slide 0 reaches a full indicator");
        let advance = effects
            .iter()
            .position(|effect| matches!(effect, CarouselEffect::ShowSlide { index: 1, .. }))
            .expect("autoplay advanced");
        assert!(full < advance, "fill must land before the slide changes");
        assert_eq!(carousel.progress(), 0.0);
    }

    #[test]
    fn navigation_after_dispose_is_ignored() {
        let (mut carousel, mut queue) = started(3, CarouselConfig::default());
        carousel.dispose(&mut queue);

        assert!(carousel.next(&mut queue).is_empty());
        assert!(carousel.previous(&mut queue).is_empty());
        assert!(carousel.select_index(2, &mut queue).is_empty());
        assert!(queue.is_empty(), "disposed carousel scheduled a timer");
        assert_eq!(carousel.current_index(), 0);
        assert_eq!(carousel.phase(), CarouselPhase::Idle);

        carousel.start(&mut queue);
        carousel.next(&mut queue);
        assert_eq!(carousel.current_index(), 1, "a fresh start re-enables navigation");
    }

    #[test]
    fn active_indicator_is_wide() {
        let (mut carousel, mut queue) = started(3, CarouselConfig::default());
        carousel.select_index(2, &mut queue);
        assert_eq!(carousel.indicator_width(2), ACTIVE_INDICATOR_WIDTH);
        assert_eq!(carousel.indicator_width(0), INACTIVE_INDICATOR_WIDTH);
    }

    #[test]
    fn config_fills_missing_fields_from_defaults() {
        let cfg: CarouselConfig = toml::from_str("dwell_ms = 4000").expect("valid toml");
        assert_eq!(cfg.dwell(), ms(4_000));
        assert_eq!(cfg.steps(), 100);
        assert_eq!(cfg.sample_interval(), ms(40));
    }
}
