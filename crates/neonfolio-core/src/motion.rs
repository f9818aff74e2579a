//! Time-based tweens, easing curves and the page animation clock.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    Linear,
    Power2Out,
    Power2InOut,
    Power3Out,
    SineInOut,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Ease::Power3Out => 1.0 - (1.0 - t).powi(4),
            Ease::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }
}

fn fraction(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0)
}

/// One-shot interpolation between two values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub start: Duration,
    pub duration: Duration,
    pub ease: Ease,
}

impl Tween {
    pub fn new(from: f32, to: f32, start: Duration, duration: Duration, ease: Ease) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            ease,
        }
    }

    /// A tween that already sits at `value`.
    pub fn settled(value: f32) -> Self {
        Self::new(value, value, Duration::ZERO, Duration::ZERO, Ease::Linear)
    }

    pub fn progress(&self, now: Duration) -> f32 {
        fraction(now.saturating_sub(self.start), self.duration)
    }

    pub fn value_at(&self, now: Duration) -> f32 {
        let eased = self.ease.apply(self.progress(now));
        self.from + (self.to - self.from) * eased
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        now >= self.start + self.duration
    }

    /// Retarget from wherever the tween currently is.
    pub fn retarget(&self, to: f32, now: Duration, duration: Duration, ease: Ease) -> Tween {
        Tween::new(self.value_at(now), to, now, duration, ease)
    }
}

/// Endless back-and-forth between `low` and `high` (a yoyo repeat).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    pub low: f32,
    pub high: f32,
    /// One leg of the yoyo; a full cycle takes twice this.
    pub leg: Duration,
    pub ease: Ease,
    pub offset: Duration,
}

impl Oscillator {
    pub fn new(low: f32, high: f32, leg: Duration, ease: Ease) -> Self {
        Self {
            low,
            high,
            leg,
            ease,
            offset: Duration::ZERO,
        }
    }

    pub fn value_at(&self, now: Duration) -> f32 {
        if self.leg.is_zero() {
            return self.low;
        }
        let leg = self.leg.as_secs_f32();
        let t = (now + self.offset).as_secs_f32() / leg;
        let cycle = t % 2.0;
        let forward = if cycle <= 1.0 { cycle } else { 2.0 - cycle };
        self.low + (self.high - self.low) * self.ease.apply(forward)
    }
}

/// Linear sweep from 0 to 1 that restarts every `period`.
pub fn sweep(now: Duration, period: Duration) -> f32 {
    if period.is_zero() {
        return 0.0;
    }
    (now.as_secs_f32() / period.as_secs_f32()).fract()
}

/// Where an entry sits relative to the end of the previous entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Offset {
    AfterPrevious,
    /// Start this long before the previous entry ends (`"-=x"`).
    Overlap(Duration),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry<K> {
    pub key: K,
    pub start: Duration,
    pub duration: Duration,
    pub ease: Ease,
}

/// Sequenced tweens sharing one start time.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline<K> {
    entries: Vec<TimelineEntry<K>>,
    started_at: Option<Duration>,
}

impl<K: Copy + PartialEq> Timeline<K> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            started_at: None,
        }
    }

    pub fn then(mut self, key: K, duration: Duration, ease: Ease, offset: Offset) -> Self {
        let previous_end = self
            .entries
            .last()
            .map(|entry| entry.start + entry.duration)
            .unwrap_or(Duration::ZERO);
        let start = match offset {
            Offset::AfterPrevious => previous_end,
            Offset::Overlap(by) => previous_end.saturating_sub(by),
        };
        self.entries.push(TimelineEntry {
            key,
            start,
            duration,
            ease,
        });
        self
    }

    pub fn play(&mut self, now: Duration) {
        self.started_at = Some(now);
    }

    pub fn is_playing(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn entries(&self) -> &[TimelineEntry<K>] {
        &self.entries
    }

    pub fn total(&self) -> Duration {
        self.entries
            .iter()
            .map(|entry| entry.start + entry.duration)
            .max()
            .unwrap_or(Duration::ZERO)
    }

    /// Eased progress of `key`: 0 before the timeline plays, 1 when done.
    pub fn progress(&self, key: K, now: Duration) -> f32 {
        let Some(started_at) = self.started_at else {
            return 0.0;
        };
        let Some(entry) = self.entries.iter().find(|entry| entry.key == key) else {
            return 1.0;
        };
        let local = now.saturating_sub(started_at + entry.start);
        entry.ease.apply(fraction(local, entry.duration))
    }
}

impl<K: Copy + PartialEq> Default for Timeline<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroPart {
    Title,
    Subtitle,
    Decor,
    ScrollIndicator,
}

impl HeroPart {
    /// Vertical offset the part rises from.
    pub fn rise(self) -> f32 {
        match self {
            HeroPart::Title => 50.0,
            HeroPart::Subtitle => 30.0,
            HeroPart::Decor => 20.0,
            HeroPart::ScrollIndicator => 0.0,
        }
    }
}

/// Entrance sequence played once the loading screen has gone.
pub fn hero_timeline() -> Timeline<HeroPart> {
    Timeline::new()
        .then(
            HeroPart::Title,
            Duration::from_millis(1_000),
            Ease::Power3Out,
            Offset::AfterPrevious,
        )
        .then(
            HeroPart::Subtitle,
            Duration::from_millis(800),
            Ease::Power3Out,
            Offset::Overlap(Duration::from_millis(500)),
        )
        .then(
            HeroPart::Decor,
            Duration::from_millis(600),
            Ease::Power3Out,
            Offset::Overlap(Duration::from_millis(400)),
        )
        .then(
            HeroPart::ScrollIndicator,
            Duration::from_millis(800),
            Ease::Power2Out,
            Offset::Overlap(Duration::from_millis(200)),
        )
}

/// Opacity and vertical offset of a hero part at `now`.
pub fn hero_frame(timeline: &Timeline<HeroPart>, part: HeroPart, now: Duration) -> (f32, f32) {
    let p = timeline.progress(part, now);
    (p, part.rise() * (1.0 - p))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Freeze decorative loops and finish entrances instantly.
    pub reduced_motion: bool,
    /// Stop the animation clock while the window is unfocused.
    pub pause_when_hidden: bool,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            pause_when_hidden: true,
        }
    }
}

/// Page animation time: wall time minus paused stretches, scaled.
#[derive(Debug, Clone)]
pub struct MotionClock {
    elapsed: Duration,
    last_wall: Option<Duration>,
    paused: bool,
    time_scale: f32,
}

impl MotionClock {
    pub fn new(time_scale: f32) -> Self {
        Self {
            elapsed: Duration::ZERO,
            last_wall: None,
            paused: false,
            time_scale: time_scale.max(0.0),
        }
    }

    pub fn from_config(config: &MotionConfig) -> Self {
        Self::new(if config.reduced_motion { 0.0 } else { 1.0 })
    }

    /// Feed the wall clock; returns animation time.
    pub fn advance(&mut self, wall: Duration) -> Duration {
        if let Some(last) = self.last_wall {
            if !self.paused {
                let delta = wall.saturating_sub(last);
                self.elapsed += if self.time_scale == 1.0 {
                    delta
                } else {
                    delta.mul_f64(f64::from(self.time_scale))
                };
            }
        }
        self.last_wall = Some(wall);
        self.elapsed
    }

    pub fn now(&self) -> Duration {
        self.elapsed
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_frozen(&self) -> bool {
        self.time_scale == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn easings_hit_endpoints() {
        for ease in [
            Ease::Linear,
            Ease::Power2Out,
            Ease::Power2InOut,
            Ease::Power3Out,
            Ease::SineInOut,
        ] {
            assert!(ease.apply(0.0).abs() < 1e-6, "{ease:?} at 0");
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-6, "{ease:?} at 1");
        }
    }

    #[test]
    fn tween_holds_before_start_and_after_end() {
        let tween = Tween::new(0.0, 10.0, ms(100), ms(200), Ease::Linear);
        assert_eq!(tween.value_at(ms(50)), 0.0);
        assert_eq!(tween.value_at(ms(200)), 5.0);
        assert_eq!(tween.value_at(ms(900)), 10.0);
        assert!(tween.is_finished(ms(300)));
    }

    #[test]
    fn retarget_starts_from_current_value() {
        let tween = Tween::new(1.0, 0.6, ms(0), ms(300), Ease::Linear);
        let back = tween.retarget(1.0, ms(150), ms(300), Ease::Linear);
        assert!((back.from - 0.8).abs() < 1e-5);
        assert_eq!(back.value_at(ms(450)), 1.0);
    }

    #[test]
    fn oscillator_yoyos() {
        let osc = Oscillator::new(0.0, 1.0, ms(1_000), Ease::Linear);
        assert!((osc.value_at(ms(500)) - 0.5).abs() < 1e-4);
        assert!((osc.value_at(ms(1_000)) - 1.0).abs() < 1e-4);
        assert!((osc.value_at(ms(1_500)) - 0.5).abs() < 1e-4);
        assert!(osc.value_at(ms(2_000)).abs() < 1e-4);
    }

    #[test]
    fn hero_entries_overlap_like_the_entrance_sequence() {
        let timeline = hero_timeline();
        let starts: Vec<u128> = timeline
            .entries()
            .iter()
            .map(|entry| entry.start.as_millis())
            .collect();
        assert_eq!(starts, vec![0, 500, 900, 1_300]);
        assert_eq!(timeline.total(), ms(2_100));
    }

    #[test]
    fn hero_parts_are_hidden_until_played() {
        let mut timeline = hero_timeline();
        assert_eq!(hero_frame(&timeline, HeroPart::Title, ms(5_000)), (0.0, 50.0));
        timeline.play(ms(5_000));
        let (opacity, rise) = hero_frame(&timeline, HeroPart::Title, ms(6_000));
        assert_eq!(opacity, 1.0);
        assert_eq!(rise, 0.0);
    }

    #[test]
    fn clock_skips_paused_stretches() {
        let mut clock = MotionClock::new(1.0);
        clock.advance(ms(0));
        clock.advance(ms(100));
        clock.pause();
        clock.advance(ms(5_000));
        clock.resume();
        assert_eq!(clock.advance(ms(5_050)), ms(150));
    }

    #[test]
    fn reduced_motion_freezes_the_clock() {
        let mut clock = MotionClock::from_config(&MotionConfig {
            reduced_motion: true,
            pause_when_hidden: true,
        });
        clock.advance(ms(0));
        assert_eq!(clock.advance(ms(10_000)), Duration::ZERO);
        assert!(clock.is_frozen());
    }
}
