//! Cancellable timers on a virtual clock.
//!
//! Components never hold a callback; they hold the [`TimerHandle`] of the one
//! timer they are waiting on and match it against what fires. The presentation
//! layer owns a single [`TimerQueue`], feeds it wall-clock time, and routes
//! each [`Fired`] timer back to the component that scheduled it.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tracing::trace;

/// Opaque identity of one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// "Invoke after duration" with a cancellable handle.
pub trait Scheduler<T> {
    /// Current time on the scheduler's clock.
    fn now(&self) -> Duration;
    fn schedule(&mut self, after: Duration, timer: T) -> TimerHandle;
    /// Returns `false` when the handle already fired or was cancelled.
    fn cancel(&mut self, handle: TimerHandle) -> bool;
}

/// A timer whose deadline has been reached.
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<T> {
    pub handle: TimerHandle,
    pub timer: T,
    pub at: Duration,
}

/// Deadline-ordered timer queue. Timers with equal deadlines fire in the order
/// they were scheduled.
#[derive(Debug)]
pub struct TimerQueue<T> {
    now: Duration,
    next_id: u64,
    entries: BTreeMap<(Duration, u64), T>,
    deadlines: HashMap<u64, Duration>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            entries: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Live timers in firing order.
    pub fn pending(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.keys().next().map(|(at, _)| *at)
    }

    pub fn insert(&mut self, after: Duration, timer: T) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        let at = self.now + after;
        self.entries.insert((at, id), timer);
        self.deadlines.insert(id, at);
        trace!(id, at_ms = at.as_millis() as u64, "timer scheduled");
        TimerHandle(id)
    }

    pub fn remove(&mut self, handle: TimerHandle) -> bool {
        match self.deadlines.remove(&handle.0) {
            Some(at) => {
                trace!(id = handle.0, "timer cancelled");
                self.entries.remove(&(at, handle.0)).is_some()
            }
            None => false,
        }
    }

    /// Fire the earliest timer due at or before `until`.
    ///
    /// The clock moves to the fired deadline, so anything scheduled while
    /// handling the firing is measured from that deadline rather than from
    /// `until`. When nothing is due the clock moves to `until` and `None` is
    /// returned; callers drain with `while let`.
    pub fn pop_due(&mut self, until: Duration) -> Option<Fired<T>> {
        if let Some(entry) = self.entries.first_entry() {
            if entry.key().0 <= until {
                let ((at, id), timer) = entry.remove_entry();
                self.deadlines.remove(&id);
                self.now = self.now.max(at);
                return Some(Fired {
                    handle: TimerHandle(id),
                    timer,
                    at,
                });
            }
        }
        self.now = self.now.max(until);
        None
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.deadlines.clear();
    }
}

impl<T, U: Into<T>> Scheduler<U> for TimerQueue<T> {
    fn now(&self) -> Duration {
        self.now
    }

    fn schedule(&mut self, after: Duration, timer: U) -> TimerHandle {
        self.insert(after, timer.into())
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.remove(handle)
    }
}

/// Cancel whatever `slot` holds and leave it empty.
pub fn cancel_slot<T>(slot: &mut Option<TimerHandle>, sched: &mut impl Scheduler<T>) {
    if let Some(handle) = slot.take() {
        sched.cancel(handle);
    }
}

/// Coalesces bursts of triggers into one firing after a quiet period.
#[derive(Debug, Default)]
pub struct Debouncer {
    pending: Option<TimerHandle>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger<T>(&mut self, quiet: Duration, timer: T, sched: &mut impl Scheduler<T>) {
        cancel_slot(&mut self.pending, sched);
        self.pending = Some(sched.schedule(quiet, timer));
    }

    /// Accept a firing; stale handles are rejected.
    pub fn fire(&mut self, handle: TimerHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn cancel<T>(&mut self, sched: &mut impl Scheduler<T>) {
        cancel_slot(&mut self.pending, sched);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn fires_in_deadline_then_schedule_order() {
        let mut queue = TimerQueue::new();
        queue.insert(ms(20), "late");
        queue.insert(ms(10), "first");
        queue.insert(ms(10), "second");

        let mut fired = Vec::new();
        while let Some(timer) = queue.pop_due(ms(30)) {
            fired.push(timer.timer);
        }
        assert_eq!(fired, vec!["first", "second", "late"]);
        assert_eq!(queue.now(), ms(30));
    }

    #[test]
    fn cancelled_timers_never_fire() {
        let mut queue = TimerQueue::new();
        let handle = queue.insert(ms(5), 1u8);
        assert!(queue.remove(handle));
        assert!(!queue.remove(handle), "second cancel reports nothing removed");
        assert!(queue.pop_due(ms(100)).is_none());
    }

    #[test]
    fn rescheduling_from_a_firing_is_relative_to_its_deadline() {
        let mut queue = TimerQueue::new();
        queue.insert(ms(10), 0u32);

        let fired = queue.pop_due(ms(35)).expect("timer due");
        assert_eq!(fired.at, ms(10));
        queue.insert(ms(10), 1);

        let chained = queue.pop_due(ms(35)).expect("chained timer due");
        assert_eq!(chained.at, ms(20));
    }

    #[test]
    fn debouncer_keeps_one_pending_timer() {
        let mut queue: TimerQueue<&str> = TimerQueue::new();
        let mut debouncer = Debouncer::new();
        for _ in 0..5 {
            debouncer.trigger(ms(250), "refresh", &mut queue);
        }
        assert_eq!(queue.len(), 1);

        let fired = queue.pop_due(ms(250)).expect("debounced timer fires");
        assert!(debouncer.fire(fired.handle));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn debouncer_rejects_stale_handles() {
        let mut queue: TimerQueue<&str> = TimerQueue::new();
        let stale = queue.insert(ms(1), "stale");
        let mut debouncer = Debouncer::new();
        debouncer.trigger(ms(250), "refresh", &mut queue);
        assert!(!debouncer.fire(stale));
        assert!(debouncer.is_pending());
    }
}
