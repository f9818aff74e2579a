//! Hovering a work card dims the other cards of its section.

use crate::motion::{Ease, Tween};
use std::time::Duration;

pub const DIMMED_OPACITY: f32 = 0.6;
pub const DIM_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug)]
pub struct SiblingDimmer {
    /// Section of each card, indexed by card.
    groups: Vec<usize>,
    opacity: Vec<Tween>,
}

impl SiblingDimmer {
    pub fn new(groups: Vec<usize>) -> Self {
        let opacity = vec![Tween::settled(1.0); groups.len()];
        Self { groups, opacity }
    }

    fn fade_siblings(&mut self, card: usize, to: f32, now: Duration) {
        let Some(&group) = self.groups.get(card) else {
            return;
        };
        for (index, tween) in self.opacity.iter_mut().enumerate() {
            if index != card && self.groups[index] == group {
                *tween = tween.retarget(to, now, DIM_DURATION, Ease::Power2Out);
            }
        }
    }

    pub fn hover_start(&mut self, card: usize, now: Duration) {
        self.fade_siblings(card, DIMMED_OPACITY, now);
    }

    pub fn hover_end(&mut self, card: usize, now: Duration) {
        self.fade_siblings(card, 1.0, now);
    }

    pub fn opacity(&self, card: usize, now: Duration) -> f32 {
        self.opacity
            .get(card)
            .map_or(1.0, |tween| tween.value_at(now))
    }
}
