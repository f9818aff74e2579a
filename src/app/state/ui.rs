use super::constants::{POPUP_FADE_IN, POPUP_MIN_SCALE, SLIDE_DURATION};
use neonfolio_core::motion::{Ease, Tween};
use neonfolio_core::preview::Placement;
use std::time::Duration;

/// What the loading overlay currently shows.
pub struct LoadingScreen {
    pub(in crate::app) percent: f32,
    pub(in crate::app) label: u32,
    pub(in crate::app) message: &'static str,
    pub(in crate::app) fade: Option<Tween>,
    pub(in crate::app) visible: bool,
}

impl LoadingScreen {
    pub(in crate::app) fn new(message: &'static str) -> Self {
        Self {
            percent: 0.0,
            label: 0,
            message,
            fade: None,
            visible: true,
        }
    }

    pub(in crate::app) fn opacity(&self, now: Duration) -> f32 {
        if !self.visible {
            return 0.0;
        }
        self.fade.map(|fade| fade.value_at(now)).unwrap_or(1.0)
    }
}

/// Slide strip position and indicator fills.
pub struct SlideShow {
    pub(in crate::app) offset: Tween,
    pub(in crate::app) fills: Vec<f32>,
}

impl SlideShow {
    pub(in crate::app) fn new(len: usize) -> Self {
        Self {
            offset: Tween::settled(0.0),
            fills: vec![0.0; len],
        }
    }

    pub(in crate::app) fn slide_to(&mut self, index: usize, now: Duration, instant: bool) {
        let duration = if instant { Duration::ZERO } else { SLIDE_DURATION };
        self.offset = self
            .offset
            .retarget(index as f32, now, duration, Ease::Power2InOut);
    }

    pub(in crate::app) fn set_fill(&mut self, index: usize, fraction: f32) {
        if let Some(fill) = self.fills.get_mut(index) {
            *fill = fraction.clamp(0.0, 1.0);
        }
    }
}

/// Floating preview panel as drawn.
pub struct Popup {
    pub(in crate::app) card: Option<usize>,
    pub(in crate::app) placement: Option<Placement>,
    pub(in crate::app) opacity: Tween,
    pub(in crate::app) scale: Tween,
}

impl Popup {
    pub(in crate::app) fn new() -> Self {
        Self {
            card: None,
            placement: None,
            opacity: Tween::settled(0.0),
            scale: Tween::settled(POPUP_MIN_SCALE),
        }
    }

    pub(in crate::app) fn show(&mut self, card: usize, placement: Placement, now: Duration) {
        let retarget = self.card.is_some() && self.opacity.value_at(now) > 0.0;
        self.card = Some(card);
        self.placement = Some(placement);
        if retarget {
            // Already on screen, possibly mid fade-out: head back to full.
            self.opacity = self.opacity.retarget(1.0, now, POPUP_FADE_IN, Ease::Power2Out);
            self.scale = self.scale.retarget(1.0, now, POPUP_FADE_IN, Ease::Power2Out);
            return;
        }
        self.opacity = Tween::new(0.0, 1.0, now, POPUP_FADE_IN, Ease::Power2Out);
        self.scale = Tween::new(POPUP_MIN_SCALE, 1.0, now, POPUP_FADE_IN, Ease::Power2Out);
    }

    pub(in crate::app) fn fade_out(&mut self, now: Duration, duration: Duration) {
        self.opacity = self.opacity.retarget(0.0, now, duration, Ease::Power2Out);
        self.scale = self
            .scale
            .retarget(POPUP_MIN_SCALE, now, duration, Ease::Power2Out);
    }

    pub(in crate::app) fn remove(&mut self) {
        *self = Self::new();
    }
}

/// Reveal ids handed out by the tracker, by page element.
#[derive(Default)]
pub struct RevealIds {
    pub(in crate::app) panel: usize,
    pub(in crate::app) headers: Vec<usize>,
    pub(in crate::app) cards: Vec<usize>,
}
