//! Decorative cursor: a dot and a ring that follow the pointer.
//!
//! `smoothing` is the fraction of the remaining distance covered per frame.
//! `1.0` snaps to the pointer every frame (the default); smaller values give
//! an eased trail. Both shapes use the same factor.

use crate::geometry::Point;
use crate::motion::{Ease, Tween};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DOT_RADIUS: f32 = 12.0;
pub const RING_RADIUS: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// `false` on coarse (touch) pointers: the native cursor is used instead.
    pub enabled: bool,
    pub smoothing: f32,
    pub hover_scale: f32,
    pub hover_ms: u64,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            smoothing: 1.0,
            hover_scale: 1.5,
            hover_ms: 200,
        }
    }
}

/// What to draw this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorFrame {
    pub dot: Point,
    pub ring: Point,
    pub dot_scale: f32,
    pub ring_hover: bool,
    pub opacity: f32,
}

#[derive(Debug)]
pub struct CursorFollower {
    config: CursorConfig,
    target: Point,
    dot: Point,
    ring: Point,
    in_window: bool,
    hovering: bool,
    scale: Tween,
}

impl CursorFollower {
    pub fn new(config: CursorConfig) -> Self {
        Self {
            config,
            target: Point::ORIGIN,
            dot: Point::ORIGIN,
            ring: Point::ORIGIN,
            in_window: true,
            hovering: false,
            scale: Tween::settled(1.0),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn pointer_moved(&mut self, pointer: Point) {
        self.target = pointer;
        self.in_window = true;
    }

    pub fn pointer_left_window(&mut self) {
        self.in_window = false;
    }

    pub fn pointer_entered_window(&mut self) {
        self.in_window = true;
    }

    pub fn hover_start(&mut self, now: Duration) {
        if self.hovering {
            return;
        }
        self.hovering = true;
        self.scale = self
            .scale
            .retarget(self.config.hover_scale, now, self.hover_duration(), Ease::Power2Out);
    }

    pub fn hover_end(&mut self, now: Duration) {
        if !self.hovering {
            return;
        }
        self.hovering = false;
        self.scale = self
            .scale
            .retarget(1.0, now, self.hover_duration(), Ease::Power2Out);
    }

    fn hover_duration(&self) -> Duration {
        Duration::from_millis(self.config.hover_ms)
    }

    /// Step the follow animation once and report the shapes' top-left corners.
    pub fn frame(&mut self, now: Duration) -> CursorFrame {
        let factor = self.config.smoothing.clamp(0.01, 1.0);
        self.dot = approach(self.dot, self.target, factor);
        self.ring = approach(self.ring, self.target, factor);
        CursorFrame {
            dot: Point::new(self.dot.x - DOT_RADIUS, self.dot.y - DOT_RADIUS),
            ring: Point::new(self.ring.x - RING_RADIUS, self.ring.y - RING_RADIUS),
            dot_scale: self.scale.value_at(now),
            ring_hover: self.hovering,
            opacity: if self.in_window { 1.0 } else { 0.0 },
        }
    }
}

fn approach(from: Point, to: Point, factor: f32) -> Point {
    if factor >= 1.0 {
        return to;
    }
    Point::new(
        from.x + (to.x - from.x) * factor,
        from.y + (to.y - from.y) * factor,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn default_follow_is_immediate() {
        let mut cursor = CursorFollower::new(CursorConfig::default());
        cursor.pointer_moved(Point::new(300.0, 200.0));
        let frame = cursor.frame(ms(16));
        assert_eq!(frame.dot, Point::new(288.0, 188.0));
        assert_eq!(frame.ring, Point::new(280.0, 180.0));
    }

    #[test]
    fn smoothing_eases_toward_pointer() {
        let mut cursor = CursorFollower::new(CursorConfig {
            smoothing: 0.5,
            ..CursorConfig::default()
        });
        cursor.pointer_moved(Point::new(100.0, 0.0));
        let first = cursor.frame(ms(16));
        let second = cursor.frame(ms(32));
        assert_eq!(first.dot.x + DOT_RADIUS, 50.0);
        assert_eq!(second.dot.x + DOT_RADIUS, 75.0);
    }

    #[test]
    fn hover_scales_dot_and_back() {
        let mut cursor = CursorFollower::new(CursorConfig::default());
        cursor.hover_start(ms(0));
        assert!(cursor.frame(ms(0)).ring_hover);
        assert_eq!(cursor.frame(ms(200)).dot_scale, 1.5);
        cursor.hover_end(ms(300));
        assert_eq!(cursor.frame(ms(500)).dot_scale, 1.0);
        assert!(!cursor.frame(ms(500)).ring_hover);
    }

    #[test]
    fn hidden_outside_window() {
        let mut cursor = CursorFollower::new(CursorConfig::default());
        cursor.pointer_left_window();
        assert_eq!(cursor.frame(ms(0)).opacity, 0.0);
        cursor.pointer_entered_window();
        assert_eq!(cursor.frame(ms(0)).opacity, 1.0);
    }
}
