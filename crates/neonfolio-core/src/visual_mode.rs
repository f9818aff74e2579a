//! Persisted "CRT" visual mode with a short glitch flash on every toggle.

use crate::timers::{Scheduler, TimerHandle, cancel_slot};
use anyhow::Result;
use std::time::Duration;
use tracing::{info, warn};

pub const VISUAL_MODE_KEY: &str = "crtMode";
pub const FLASH_DURATION: Duration = Duration::from_millis(500);

/// Flat string key/value storage that survives restarts.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualModeTimer {
    FlashEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualModeEffect {
    SetCrt(bool),
    FlashStart,
    FlashEnd,
}

#[derive(Debug, Default)]
pub struct VisualMode {
    crt: bool,
    flash: Option<TimerHandle>,
}

impl VisualMode {
    /// Only the exact value `"true"` turns the mode on.
    pub fn load(store: &impl PreferenceStore) -> Self {
        let crt = store.get(VISUAL_MODE_KEY).as_deref() == Some("true");
        info!(crt, "visual mode loaded");
        Self { crt, flash: None }
    }

    pub fn is_crt(&self) -> bool {
        self.crt
    }

    pub fn is_flashing(&self) -> bool {
        self.flash.is_some()
    }

    pub fn label(&self) -> &'static str {
        if self.crt { "CRT: ON" } else { "CRT: OFF" }
    }

    pub fn toggle(
        &mut self,
        store: &mut impl PreferenceStore,
        sched: &mut impl Scheduler<VisualModeTimer>,
    ) -> Vec<VisualModeEffect> {
        self.crt = !self.crt;
        let saved = if self.crt {
            store.set(VISUAL_MODE_KEY, "true")
        } else {
            store.remove(VISUAL_MODE_KEY)
        };
        if let Err(err) = saved {
            warn!("failed to persist visual mode: {err:#}");
        }

        cancel_slot(&mut self.flash, sched);
        self.flash = Some(sched.schedule(FLASH_DURATION, VisualModeTimer::FlashEnd));
        info!(crt = self.crt, "visual mode toggled");
        vec![VisualModeEffect::FlashStart, VisualModeEffect::SetCrt(self.crt)]
    }

    pub fn on_timer(
        &mut self,
        handle: TimerHandle,
        _timer: VisualModeTimer,
    ) -> Vec<VisualModeEffect> {
        if self.flash != Some(handle) {
            return Vec::new();
        }
        self.flash = None;
        vec![VisualModeEffect::FlashEnd]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timers::TimerQueue;
    use anyhow::bail;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStore {
        values: HashMap<String, String>,
        read_only: bool,
    }

    impl PreferenceStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.values.get(key).cloned()
        }

        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            if self.read_only {
                bail!("store is read-only");
            }
            self.values.insert(key.to_owned(), value.to_owned());
            Ok(())
        }

        fn remove(&mut self, key: &str) -> Result<()> {
            if self.read_only {
                bail!("store is read-only");
            }
            self.values.remove(key);
            Ok(())
        }
    }

    #[test]
    fn only_exact_true_enables_crt() {
        let mut store = MemoryStore::default();
        assert!(!VisualMode::load(&store).is_crt());
        store.set(VISUAL_MODE_KEY, "TRUE").expect("writable");
        assert!(!VisualMode::load(&store).is_crt());
        store.set(VISUAL_MODE_KEY, "true").expect("writable");
        assert!(VisualMode::load(&store).is_crt());
    }

    #[test]
    fn toggle_round_trips_through_the_store() {
        let mut store = MemoryStore::default();
        let mut queue: TimerQueue<VisualModeTimer> = TimerQueue::new();
        let mut mode = VisualMode::load(&store);

        mode.toggle(&mut store, &mut queue);
        assert_eq!(mode.label(), "CRT: ON");
        assert_eq!(store.get(VISUAL_MODE_KEY).as_deref(), Some("true"));
        assert!(VisualMode::load(&store).is_crt());

        mode.toggle(&mut store, &mut queue);
        assert_eq!(mode.label(), "CRT: OFF");
        assert_eq!(store.get(VISUAL_MODE_KEY), None, "off removes the key");
    }

    #[test]
    fn flash_ends_after_half_a_second_and_restarts_on_retoggle() {
        let mut store = MemoryStore::default();
        let mut queue: TimerQueue<VisualModeTimer> = TimerQueue::new();
        let mut mode = VisualMode::default();

        mode.toggle(&mut store, &mut queue);
        assert!(queue.pop_due(Duration::from_millis(300)).is_none());
        mode.toggle(&mut store, &mut queue);
        assert_eq!(queue.len(), 1, "old flash cancelled");

        let fired = queue.pop_due(Duration::from_millis(800)).expect("flash ends");
        assert_eq!(fired.at, Duration::from_millis(800));
        assert_eq!(
            mode.on_timer(fired.handle, fired.timer),
            vec![VisualModeEffect::FlashEnd]
        );
        assert!(!mode.is_flashing());
    }

    #[test]
    fn persistence_failure_still_toggles() {
        let mut store = MemoryStore {
            read_only: true,
            ..MemoryStore::default()
        };
        let mut queue: TimerQueue<VisualModeTimer> = TimerQueue::new();
        let mut mode = VisualMode::default();
        let effects = mode.toggle(&mut store, &mut queue);
        assert!(mode.is_crt());
        assert!(effects.contains(&VisualModeEffect::SetCrt(true)));
    }
}
