//! Hover preview popup: debounced show/hide plus pointer-tracking placement.
//!
//! One positioner drives one popup panel. Anchors (work cards) and the panel
//! itself are hover regions; the popup only starts hiding once the pointer is
//! inside none of them, which is what lets the pointer cross from a card onto
//! the panel or onto a neighbouring card without a flicker.
//!
//! Show, hide and the post-fade removal are mutually exclusive, so they share
//! a single pending slot holding one cancellable handle.

use crate::geometry::{Point, Rect, Size};
use crate::timers::{Scheduler, TimerHandle};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::{debug, trace};

/// Identifies a source element; the positioner never owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HoverRegion {
    Anchor(AnchorId),
    Panel,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub show_delay_ms: u64,
    pub hide_delay_ms: u64,
    pub fade_ms: u64,
    pub gap: f32,
    pub margin: f32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            show_delay_ms: 200,
            hide_delay_ms: 100,
            fade_ms: 300,
            gap: 20.0,
            margin: 20.0,
        }
    }
}

impl PreviewConfig {
    pub fn show_delay(&self) -> Duration {
        Duration::from_millis(self.show_delay_ms)
    }

    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_delay_ms)
    }

    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }
}

/// Geometry the positioner asks of the presentation layer.
pub trait LayoutProbe {
    fn anchor_rect(&self, anchor: AnchorId) -> Option<Rect>;
    /// Rendered size of the enlarged image shown for `anchor`.
    fn panel_size(&self, anchor: AnchorId) -> Option<Size>;
    fn viewport(&self) -> Size;
}

/// Top-left corner of the popup in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub left: f32,
    pub top: f32,
    pub side: Side,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Right,
    Left,
}

/// Place the popup beside `anchor`, vertically centred on the pointer.
///
/// Right of the anchor is preferred; the popup flips left when it would cross
/// the right margin. Vertically it is pinned inside `[margin, height - margin]`.
pub fn place(
    anchor: Rect,
    panel: Size,
    pointer: Point,
    viewport: Size,
    gap: f32,
    margin: f32,
) -> Placement {
    let mut left = anchor.right() + gap;
    let mut side = Side::Right;
    if left + panel.width > viewport.width - margin {
        left = anchor.left - panel.width - gap;
        side = Side::Left;
    }

    let mut top = pointer.y - panel.height / 2.0;
    if top < margin {
        top = margin;
    } else if top + panel.height > viewport.height - margin {
        top = viewport.height - panel.height - margin;
    }

    Placement { left, top, side }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewTimer {
    Show,
    Hide,
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewPhase {
    Hidden,
    PendingShow,
    Visible,
    PendingHide,
    /// Fading out; still mounted until the removal timer fires.
    Hiding,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PreviewEffect {
    /// Mount (or retarget) the panel for `anchor` and fade it in.
    Show {
        anchor: AnchorId,
        placement: Placement,
    },
    Move { placement: Placement },
    /// Start the fade-and-shrink transition.
    FadeOut { anchor: AnchorId },
    /// Take the panel out of the interactive layout.
    Remove { anchor: AnchorId },
}

#[derive(Debug)]
pub struct PreviewPositioner {
    config: PreviewConfig,
    phase: PreviewPhase,
    anchor: Option<AnchorId>,
    pending: Option<(PreviewTimer, TimerHandle)>,
    regions: BTreeSet<HoverRegion>,
    pointer: Point,
    placement: Option<Placement>,
}

impl PreviewPositioner {
    pub fn new(config: PreviewConfig) -> Self {
        Self {
            config,
            phase: PreviewPhase::Hidden,
            anchor: None,
            pending: None,
            regions: BTreeSet::new(),
            pointer: Point::ORIGIN,
            placement: None,
        }
    }

    pub fn phase(&self) -> PreviewPhase {
        self.phase
    }

    pub fn anchor(&self) -> Option<AnchorId> {
        self.anchor
    }

    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    /// The panel is on screen (including while a hide is only pending).
    pub fn is_visible(&self) -> bool {
        matches!(self.phase, PreviewPhase::Visible | PreviewPhase::PendingHide)
    }

    /// Whether the pointer is currently tracked inside `region`.
    pub fn is_inside(&self, region: HoverRegion) -> bool {
        self.regions.contains(&region)
    }

    pub fn pending(&self) -> Option<PreviewTimer> {
        self.pending.map(|(timer, _)| timer)
    }

    pub fn on_enter(
        &mut self,
        region: HoverRegion,
        pointer: Point,
        probe: &impl LayoutProbe,
        sched: &mut impl Scheduler<PreviewTimer>,
    ) -> Vec<PreviewEffect> {
        self.regions.insert(region);
        self.pointer = pointer;
        let mut effects = Vec::new();

        let anchor = match region {
            HoverRegion::Panel => {
                match self.phase {
                    PreviewPhase::PendingHide => {
                        self.cancel_pending(sched);
                        self.phase = PreviewPhase::Visible;
                        trace!("pointer reached panel; hide bridged");
                    }
                    PreviewPhase::Hiding => {
                        self.cancel_pending(sched);
                        self.phase = PreviewPhase::Visible;
                        let placement = self.compute(probe).or(self.placement);
                        if let (Some(anchor), Some(placement)) = (self.anchor, placement) {
                            effects.push(PreviewEffect::Show { anchor, placement });
                        }
                        debug!(anchor = ?self.anchor, "fading panel re-entered; removal cancelled");
                    }
                    _ => {}
                }
                return effects;
            }
            HoverRegion::Anchor(anchor) => anchor,
        };

        match self.phase {
            PreviewPhase::Visible | PreviewPhase::PendingHide => {
                self.cancel_pending(sched);
                self.phase = PreviewPhase::Visible;
                if self.anchor == Some(anchor) {
                    if let Some(placement) = self.compute(probe) {
                        effects.push(PreviewEffect::Move { placement });
                    }
                } else {
                    debug!(from = ?self.anchor, to = ?anchor, "preview retargeted");
                    self.anchor = Some(anchor);
                    if let Some(placement) = self.compute(probe) {
                        effects.push(PreviewEffect::Show { anchor, placement });
                    }
                }
            }
            PreviewPhase::Hidden | PreviewPhase::PendingShow | PreviewPhase::Hiding => {
                self.cancel_pending(sched);
                self.anchor = Some(anchor);
                self.placement = self.compute(probe);
                let handle = sched.schedule(self.config.show_delay(), PreviewTimer::Show);
                self.pending = Some((PreviewTimer::Show, handle));
                self.phase = PreviewPhase::PendingShow;
                trace!(?anchor, "preview show scheduled");
            }
        }
        effects
    }

    /// Track the pointer. Never debounced.
    pub fn on_move(&mut self, pointer: Point, probe: &impl LayoutProbe) -> Vec<PreviewEffect> {
        self.pointer = pointer;
        match self.phase {
            PreviewPhase::Visible | PreviewPhase::PendingHide => self
                .compute(probe)
                .map(|placement| vec![PreviewEffect::Move { placement }])
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    pub fn on_leave(
        &mut self,
        region: HoverRegion,
        sched: &mut impl Scheduler<PreviewTimer>,
    ) -> Vec<PreviewEffect> {
        self.regions.remove(&region);
        if !self.regions.is_empty() {
            return Vec::new();
        }
        match self.phase {
            PreviewPhase::PendingShow => {
                self.cancel_pending(sched);
                self.reset();
                trace!("preview show cancelled before firing");
            }
            PreviewPhase::Visible => {
                let handle = sched.schedule(self.config.hide_delay(), PreviewTimer::Hide);
                self.pending = Some((PreviewTimer::Hide, handle));
                self.phase = PreviewPhase::PendingHide;
                trace!("preview hide scheduled");
            }
            _ => {}
        }
        Vec::new()
    }

    pub fn on_timer(
        &mut self,
        handle: TimerHandle,
        timer: PreviewTimer,
        probe: &impl LayoutProbe,
        sched: &mut impl Scheduler<PreviewTimer>,
    ) -> Vec<PreviewEffect> {
        if self.pending != Some((timer, handle)) {
            trace!(?timer, "stale preview timer ignored");
            return Vec::new();
        }
        self.pending = None;
        let Some(anchor) = self.anchor else {
            self.reset();
            return Vec::new();
        };

        match timer {
            PreviewTimer::Show => match self.compute(probe) {
                Some(placement) => {
                    self.phase = PreviewPhase::Visible;
                    debug!(?anchor, left = placement.left, top = placement.top, "preview shown");
                    vec![PreviewEffect::Show { anchor, placement }]
                }
                None => {
                    debug!(?anchor, "preview anchor has no geometry; staying hidden");
                    self.reset();
                    Vec::new()
                }
            },
            PreviewTimer::Hide => {
                if !self.regions.is_empty() {
                    self.phase = PreviewPhase::Visible;
                    return Vec::new();
                }
                self.phase = PreviewPhase::Hiding;
                let handle = sched.schedule(self.config.fade(), PreviewTimer::Remove);
                self.pending = Some((PreviewTimer::Remove, handle));
                vec![PreviewEffect::FadeOut { anchor }]
            }
            PreviewTimer::Remove => {
                self.reset();
                debug!(?anchor, "preview removed");
                vec![PreviewEffect::Remove { anchor }]
            }
        }
    }

    /// Drop any pending action and return to hidden.
    pub fn dispose(&mut self, sched: &mut impl Scheduler<PreviewTimer>) -> Vec<PreviewEffect> {
        self.cancel_pending(sched);
        let mounted = matches!(
            self.phase,
            PreviewPhase::Visible | PreviewPhase::PendingHide | PreviewPhase::Hiding
        );
        let anchor = self.anchor;
        self.regions.clear();
        self.reset();
        match (mounted, anchor) {
            (true, Some(anchor)) => vec![PreviewEffect::Remove { anchor }],
            _ => Vec::new(),
        }
    }

    fn compute(&mut self, probe: &impl LayoutProbe) -> Option<Placement> {
        let anchor = self.anchor?;
        let rect = probe.anchor_rect(anchor)?;
        let panel = probe.panel_size(anchor)?;
        let placement = place(
            rect,
            panel,
            self.pointer,
            probe.viewport(),
            self.config.gap,
            self.config.margin,
        );
        self.placement = Some(placement);
        Some(placement)
    }

    fn cancel_pending(&mut self, sched: &mut impl Scheduler<PreviewTimer>) {
        if let Some((_, handle)) = self.pending.take() {
            sched.cancel(handle);
        }
    }

    /// Back to hidden. The panel is unmounted from here on, so it can no
    /// longer report a leave; its region goes with it.
    fn reset(&mut self) {
        self.regions.remove(&HoverRegion::Panel);
        self.phase = PreviewPhase::Hidden;
        self.anchor = None;
        self.placement = None;
    }
}
