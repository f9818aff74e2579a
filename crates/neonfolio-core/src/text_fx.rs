//! Glitch flicker and typewriter reveal for headings and terminal text.

use crate::timers::{Scheduler, TimerHandle, cancel_slot};
use rand::Rng;
use std::time::Duration;
use tracing::trace;

pub const GLITCH_ROLL_INTERVAL: Duration = Duration::from_secs(3);
pub const GLITCH_DURATION: Duration = Duration::from_millis(300);
pub const GLITCH_PROBABILITY: f64 = 0.3;

/// Offsets stepped through while a glitch runs, in pixels.
const GLITCH_KEYFRAMES: [(f32, f32); 5] = [
    (0.0, 0.0),
    (-2.0, 2.0),
    (-2.0, -2.0),
    (2.0, 2.0),
    (2.0, -2.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlitchTimer {
    Roll,
}

/// Every roll, each element independently restarts its glitch.
#[derive(Debug)]
pub struct GlitchScheduler {
    started: Vec<Option<Duration>>,
    roll: Option<TimerHandle>,
}

impl GlitchScheduler {
    pub fn new(elements: usize) -> Self {
        Self {
            started: vec![None; elements],
            roll: None,
        }
    }

    pub fn len(&self) -> usize {
        self.started.len()
    }

    pub fn is_empty(&self) -> bool {
        self.started.is_empty()
    }

    pub fn start(&mut self, sched: &mut impl Scheduler<GlitchTimer>) {
        if self.started.is_empty() || self.roll.is_some() {
            return;
        }
        self.roll = Some(sched.schedule(GLITCH_ROLL_INTERVAL, GlitchTimer::Roll));
    }

    /// Returns the indices whose glitch restarted.
    pub fn on_timer(
        &mut self,
        handle: TimerHandle,
        _timer: GlitchTimer,
        rng: &mut impl Rng,
        sched: &mut impl Scheduler<GlitchTimer>,
    ) -> Vec<usize> {
        if self.roll != Some(handle) {
            return Vec::new();
        }
        let now = sched.now();
        let mut restarted = Vec::new();
        for (index, slot) in self.started.iter_mut().enumerate() {
            if rng.random_bool(GLITCH_PROBABILITY) {
                *slot = Some(now);
                restarted.push(index);
            }
        }
        trace!(?restarted, "glitch roll");
        self.roll = Some(sched.schedule(GLITCH_ROLL_INTERVAL, GlitchTimer::Roll));
        restarted
    }

    /// Fire a glitch on `element` right now (used by the visual-mode flash).
    pub fn trigger(&mut self, element: usize, now: Duration) {
        if let Some(slot) = self.started.get_mut(element) {
            *slot = Some(now);
        }
    }

    pub fn is_glitching(&self, element: usize, now: Duration) -> bool {
        self.started
            .get(element)
            .copied()
            .flatten()
            .is_some_and(|start| now >= start && now < start + GLITCH_DURATION)
    }

    /// Pixel offset of `element` at `now`; zero outside a running glitch.
    pub fn jitter(&self, element: usize, now: Duration) -> (f32, f32) {
        let Some(start) = self.started.get(element).copied().flatten() else {
            return (0.0, 0.0);
        };
        if !self.is_glitching(element, now) {
            return (0.0, 0.0);
        }
        let t = (now - start).as_secs_f32() / GLITCH_DURATION.as_secs_f32();
        let last = GLITCH_KEYFRAMES.len() - 1;
        let step = ((t * GLITCH_KEYFRAMES.len() as f32) as usize).min(last);
        GLITCH_KEYFRAMES[step]
    }

    pub fn dispose(&mut self, sched: &mut impl Scheduler<GlitchTimer>) {
        cancel_slot(&mut self.roll, sched);
    }
}

pub const TYPEWRITER_CHAR: Duration = Duration::from_millis(50);

/// Reveals `text` one character at a time once started.
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    started: Option<Duration>,
}

impl Typewriter {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            started: None,
        }
    }

    pub fn start(&mut self, now: Duration) {
        self.started.get_or_insert(now);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn shown_chars(&self, now: Duration) -> usize {
        let Some(started) = self.started else {
            return 0;
        };
        let elapsed = now.saturating_sub(started).as_millis();
        (elapsed / TYPEWRITER_CHAR.as_millis()) as usize
    }

    pub fn visible_text(&self, now: Duration) -> &str {
        let shown = self.shown_chars(now);
        match self.text.char_indices().nth(shown) {
            Some((end, _)) => &self.text[..end],
            None => &self.text,
        }
    }

    pub fn is_complete(&self, now: Duration) -> bool {
        self.shown_chars(now) >= self.text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timers::TimerQueue;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn roll_repeats_every_three_seconds() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut queue: TimerQueue<GlitchTimer> = TimerQueue::new();
        let mut glitch = GlitchScheduler::new(4);
        glitch.start(&mut queue);

        let mut rolls = Vec::new();
        while let Some(fired) = queue.pop_due(ms(9_500)) {
            rolls.push(fired.at);
            glitch.on_timer(fired.handle, fired.timer, &mut rng, &mut queue);
        }
        assert_eq!(rolls, vec![ms(3_000), ms(6_000), ms(9_000)]);
        assert_eq!(queue.len(), 1, "exactly one roll stays armed");
    }

    #[test]
    fn restart_rate_is_roughly_thirty_percent() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut queue: TimerQueue<GlitchTimer> = TimerQueue::new();
        let mut glitch = GlitchScheduler::new(10);
        glitch.start(&mut queue);

        let mut restarts = 0;
        for round in 1..=100u64 {
            let fired = queue.pop_due(ms(round * 3_000)).expect("roll due");
            restarts += glitch
                .on_timer(fired.handle, fired.timer, &mut rng, &mut queue)
                .len();
        }
        assert!((200..400).contains(&restarts), "{restarts} restarts of 1000");
    }

    #[test]
    fn jitter_only_during_the_glitch_window() {
        let mut glitch = GlitchScheduler::new(1);
        assert_eq!(glitch.jitter(0, ms(0)), (0.0, 0.0));
        glitch.trigger(0, ms(1_000));
        assert_eq!(glitch.jitter(0, ms(1_070)), (-2.0, 2.0));
        assert!(glitch.is_glitching(0, ms(1_299)));
        assert_eq!(glitch.jitter(0, ms(1_300)), (0.0, 0.0));
        assert_eq!(glitch.jitter(5, ms(1_070)), (0.0, 0.0));
    }

    #[test]
    fn empty_glitch_set_never_schedules() {
        let mut queue: TimerQueue<GlitchTimer> = TimerQueue::new();
        let mut glitch = GlitchScheduler::new(0);
        glitch.start(&mut queue);
        assert!(queue.is_empty());
    }

    #[test]
    fn typewriter_reveals_one_char_per_tick() {
        let mut typewriter = Typewriter::new("> ready_");
        assert_eq!(typewriter.visible_text(ms(500)), "");
        typewriter.start(ms(100));
        assert_eq!(typewriter.visible_text(ms(100)), "");
        assert_eq!(typewriter.visible_text(ms(249)), "> ");
        assert!(!typewriter.is_complete(ms(449)));
        assert_eq!(typewriter.visible_text(ms(500)), "> ready_");
        assert!(typewriter.is_complete(ms(500)));
    }

    #[test]
    fn typewriter_respects_char_boundaries() {
        let mut typewriter = Typewriter::new("ñé");
        typewriter.start(ms(0));
        assert_eq!(typewriter.visible_text(ms(50)), "ñ");
    }
}
