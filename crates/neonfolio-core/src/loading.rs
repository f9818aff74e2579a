//! Boot screen: jittery progress, status messages, then a timed fade-out.

use crate::timers::{Scheduler, TimerHandle};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, trace};

pub const LOADING_MESSAGES: [&str; 5] = [
    "SYSTEM INITIALIZING",
    "LOADING ASSETS",
    "COMPILING MODULES",
    "ESTABLISHING CONNECTION",
    "READY",
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadingConfig {
    pub step_ms: u64,
    pub min_increment: f32,
    pub max_increment: f32,
    /// Pause on "READY" before fading.
    pub settle_ms: u64,
    pub fade_ms: u64,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            step_ms: 150,
            min_increment: 5.0,
            max_increment: 20.0,
            settle_ms: 500,
            fade_ms: 800,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingTimer {
    Step,
    Settle,
    FadeDone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingPhase {
    NotStarted,
    Running,
    Settling,
    Fading,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoadingEffect {
    /// `label` is the whole-number percentage shown next to the bar.
    Progress { percent: f32, label: u32 },
    Message(&'static str),
    BeginFade { duration: Duration },
    /// Screen gone; the hero entrance may start.
    Finished,
}

#[derive(Debug)]
pub struct LoadingSequence {
    config: LoadingConfig,
    progress: f32,
    message_index: usize,
    phase: LoadingPhase,
    pending: Option<TimerHandle>,
}

impl LoadingSequence {
    pub fn new(config: LoadingConfig) -> Self {
        Self {
            config,
            progress: 0.0,
            message_index: 0,
            phase: LoadingPhase::NotStarted,
            pending: None,
        }
    }

    pub fn phase(&self) -> LoadingPhase {
        self.phase
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn message(&self) -> &'static str {
        LOADING_MESSAGES[self.message_index]
    }

    pub fn is_done(&self) -> bool {
        self.phase == LoadingPhase::Done
    }

    pub fn start(&mut self, sched: &mut impl Scheduler<LoadingTimer>) -> Vec<LoadingEffect> {
        if self.phase != LoadingPhase::NotStarted {
            return Vec::new();
        }
        self.phase = LoadingPhase::Running;
        self.pending = Some(sched.schedule(
            Duration::from_millis(self.config.step_ms),
            LoadingTimer::Step,
        ));
        info!("loading sequence started");
        vec![
            LoadingEffect::Message(self.message()),
            LoadingEffect::Progress {
                percent: 0.0,
                label: 0,
            },
        ]
    }

    pub fn on_timer(
        &mut self,
        handle: TimerHandle,
        timer: LoadingTimer,
        rng: &mut impl Rng,
        sched: &mut impl Scheduler<LoadingTimer>,
    ) -> Vec<LoadingEffect> {
        if self.pending != Some(handle) {
            return Vec::new();
        }
        self.pending = None;
        let mut effects = Vec::new();

        match timer {
            LoadingTimer::Step => {
                self.progress += self.increment(rng);
                if self.progress >= 100.0 {
                    self.progress = 100.0;
                    self.message_index = LOADING_MESSAGES.len() - 1;
                    self.phase = LoadingPhase::Settling;
                    effects.push(LoadingEffect::Message(self.message()));
                    self.pending = Some(sched.schedule(
                        Duration::from_millis(self.config.settle_ms),
                        LoadingTimer::Settle,
                    ));
                    debug!("loading reached 100%");
                } else {
                    let last = LOADING_MESSAGES.len() - 1;
                    let index = ((self.progress / 100.0) * last as f32).floor() as usize;
                    if index != self.message_index && index < last {
                        self.message_index = index;
                        effects.push(LoadingEffect::Message(self.message()));
                    }
                    self.pending = Some(sched.schedule(
                        Duration::from_millis(self.config.step_ms),
                        LoadingTimer::Step,
                    ));
                }
                trace!(progress = self.progress, "loading step");
                effects.push(LoadingEffect::Progress {
                    percent: self.progress,
                    label: self.progress.floor() as u32,
                });
            }
            LoadingTimer::Settle => {
                let duration = Duration::from_millis(self.config.fade_ms);
                self.phase = LoadingPhase::Fading;
                self.pending = Some(sched.schedule(duration, LoadingTimer::FadeDone));
                effects.push(LoadingEffect::BeginFade { duration });
            }
            LoadingTimer::FadeDone => {
                self.phase = LoadingPhase::Done;
                info!("loading screen dismissed");
                effects.push(LoadingEffect::Finished);
            }
        }
        effects
    }

    fn increment(&self, rng: &mut impl Rng) -> f32 {
        let LoadingConfig {
            min_increment,
            max_increment,
            ..
        } = self.config;
        if max_increment > min_increment {
            rng.random_range(min_increment..max_increment)
        } else {
            min_increment.max(0.1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timers::TimerQueue;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn run_until(
        loading: &mut LoadingSequence,
        rng: &mut StdRng,
        queue: &mut TimerQueue<LoadingTimer>,
        until: Duration,
    ) -> Vec<LoadingEffect> {
        let mut effects = Vec::new();
        while let Some(fired) = queue.pop_due(until) {
            effects.extend(loading.on_timer(fired.handle, fired.timer, rng, queue));
        }
        effects
    }

    #[test]
    fn reaches_exactly_one_hundred_then_fades_and_finishes() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut queue: TimerQueue<LoadingTimer> = TimerQueue::new();
        let mut loading = LoadingSequence::new(LoadingConfig::default());
        loading.start(&mut queue);

        // 20 steps of at least 5% each always complete the bar.
        let mut effects = Vec::new();
        for _ in 0..20 {
            if loading.phase() != LoadingPhase::Running {
                break;
            }
            let until = queue.now() + Duration::from_millis(150);
            effects.extend(run_until(&mut loading, &mut rng, &mut queue, until));
        }
        assert_eq!(loading.progress(), 100.0);
        assert_eq!(loading.phase(), LoadingPhase::Settling);
        assert_eq!(loading.message(), "READY");
        assert!(effects.contains(&LoadingEffect::Progress {
            percent: 100.0,
            label: 100
        }));

        let until = queue.now() + Duration::from_millis(1_300);
        let rest = run_until(&mut loading, &mut rng, &mut queue, until);
        assert_eq!(
            rest,
            vec![
                LoadingEffect::BeginFade {
                    duration: Duration::from_millis(800)
                },
                LoadingEffect::Finished
            ]
        );
        assert!(loading.is_done());
        assert!(queue.is_empty());
    }

    #[test]
    fn messages_only_move_forward_and_skip_ready_until_complete() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut queue: TimerQueue<LoadingTimer> = TimerQueue::new();
        let mut loading = LoadingSequence::new(LoadingConfig::default());
        let mut seen: Vec<&str> = Vec::new();
        for effect in loading.start(&mut queue) {
            if let LoadingEffect::Message(text) = effect {
                seen.push(text);
            }
        }
        while loading.phase() == LoadingPhase::Running {
            let until = queue.now() + Duration::from_millis(150);
            for effect in run_until(&mut loading, &mut rng, &mut queue, until) {
                if let LoadingEffect::Message(text) = effect {
                    seen.push(text);
                }
            }
        }

        let order: Vec<usize> = seen
            .iter()
            .map(|text| LOADING_MESSAGES.iter().position(|m| m == text).expect("known message"))
            .collect();
        assert!(order.windows(2).all(|pair| pair[0] < pair[1]), "{seen:?}");
        assert_eq!(seen.last(), Some(&"READY"));
        assert_eq!(seen.iter().filter(|text| **text == "READY").count(), 1);
    }

    #[test]
    fn percent_label_is_floored() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut queue: TimerQueue<LoadingTimer> = TimerQueue::new();
        let mut loading = LoadingSequence::new(LoadingConfig::default());
        loading.start(&mut queue);
        let effects = run_until(&mut loading, &mut rng, &mut queue, Duration::from_millis(150));
        let Some(LoadingEffect::Progress { percent, label }) = effects.last().copied() else {
            panic!("expected a progress update, got {effects:?}");
        };
        assert!((5.0..20.0).contains(&percent));
        assert_eq!(label, percent.floor() as u32);
    }

    #[test]
    fn start_is_single_shot() {
        let mut queue: TimerQueue<LoadingTimer> = TimerQueue::new();
        let mut loading = LoadingSequence::new(LoadingConfig::default());
        loading.start(&mut queue);
        assert!(loading.start(&mut queue).is_empty());
        assert_eq!(queue.len(), 1);
    }
}
