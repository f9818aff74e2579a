//! Ambient backdrop: drifting particles, a faint binary wall, the HUD border
//! pulse and the CRT scanline sweep. All of it is a pure function of
//! animation time once generated.

use crate::motion::{Ease, Oscillator, sweep};
use rand::Rng;
use std::time::Duration;

pub const PARTICLE_COUNT: usize = 25;
pub const BINARY_LENGTH: usize = 500;
pub const BINARY_ROW: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hue {
    Neon,
    Cyan,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub size: f32,
    pub hue: Hue,
    /// Resting position as a fraction of the viewport.
    pub anchor_x: f32,
    pub anchor_y: f32,
    pub drift_x: f32,
    pub drift_y: f32,
    pub opacity: Oscillator,
    /// Drift progress, 0 at rest and 1 at full offset.
    pub travel: Oscillator,
}

/// Where and how a particle is drawn at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleFrame {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub hue: Hue,
    pub opacity: f32,
}

impl Particle {
    pub fn generate(rng: &mut impl Rng) -> Self {
        let leg = Duration::from_secs_f32(rng.random_range(3.0..8.0));
        let base_opacity = rng.random_range(0.1..0.6);
        let target_opacity = rng.random_range(0.1..0.6);
        Self {
            size: rng.random_range(1.0..4.0),
            hue: if rng.random_bool(0.5) {
                Hue::Neon
            } else {
                Hue::Cyan
            },
            anchor_x: rng.random_range(0.0..1.0),
            anchor_y: rng.random_range(0.0..1.0),
            drift_x: rng.random_range(-100.0..100.0),
            drift_y: rng.random_range(-100.0..100.0),
            opacity: Oscillator::new(base_opacity, target_opacity, leg, Ease::SineInOut),
            travel: Oscillator::new(0.0, 1.0, leg, Ease::SineInOut),
        }
    }

    pub fn frame(&self, width: f32, height: f32, now: Duration) -> ParticleFrame {
        let travel = self.travel.value_at(now);
        ParticleFrame {
            x: self.anchor_x * width + self.drift_x * travel,
            y: self.anchor_y * height + self.drift_y * travel,
            size: self.size,
            hue: self.hue,
            opacity: self.opacity.value_at(now).clamp(0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn generate(count: usize, rng: &mut impl Rng) -> Self {
        Self {
            particles: (0..count).map(|_| Particle::generate(rng)).collect(),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn frames(&self, width: f32, height: f32, now: Duration) -> Vec<ParticleFrame> {
        self.particles
            .iter()
            .map(|particle| particle.frame(width, height, now))
            .collect()
    }
}

/// Wall of random bits behind the hero.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryBackdrop {
    pub text: String,
    /// Offsets as a fraction of the viewport, each in `[0, 0.5)`.
    pub top: f32,
    pub left: f32,
    pub opacity: Oscillator,
}

impl BinaryBackdrop {
    pub fn generate(rng: &mut impl Rng) -> Self {
        let mut text = String::with_capacity(BINARY_LENGTH + BINARY_LENGTH / BINARY_ROW);
        for i in 0..BINARY_LENGTH {
            if i > 0 && i % BINARY_ROW == 0 {
                text.push('\n');
            }
            text.push(if rng.random_bool(0.5) { '1' } else { '0' });
        }
        Self {
            text,
            top: rng.random_range(0.0..0.5),
            left: rng.random_range(0.0..0.5),
            opacity: Oscillator::new(0.08, 0.03, Duration::from_secs(2), Ease::SineInOut),
        }
    }
}

/// Border alpha of the HUD panel.
pub fn hud_pulse() -> Oscillator {
    Oscillator::new(0.3, 0.6, Duration::from_secs(2), Ease::SineInOut)
}

pub const SCANLINE_PERIOD: Duration = Duration::from_secs(10);

/// Scanline texture offset as a fraction of its height.
pub fn scanline_offset(now: Duration) -> f32 {
    sweep(now, SCANLINE_PERIOD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn particles_stay_within_their_ranges() {
        let mut rng = StdRng::seed_from_u64(11);
        let field = ParticleField::generate(PARTICLE_COUNT, &mut rng);
        assert_eq!(field.particles().len(), PARTICLE_COUNT);
        for particle in field.particles() {
            assert!((1.0..4.0).contains(&particle.size));
            assert!((-100.0..100.0).contains(&particle.drift_x));
            assert!((0.0..1.0).contains(&particle.anchor_y));
        }
        for frame in field.frames(1280.0, 720.0, Duration::from_millis(4_321)) {
            assert!((0.0..=0.6).contains(&frame.opacity));
        }
    }

    #[test]
    fn particles_rest_at_anchor_at_time_zero() {
        let mut rng = StdRng::seed_from_u64(5);
        let particle = Particle::generate(&mut rng);
        let frame = particle.frame(1000.0, 500.0, Duration::ZERO);
        assert!((frame.x - particle.anchor_x * 1000.0).abs() < 1e-3);
        assert!((frame.y - particle.anchor_y * 500.0).abs() < 1e-3);
    }

    #[test]
    fn binary_wall_is_rows_of_fifty_bits() {
        let mut rng = StdRng::seed_from_u64(1);
        let wall = BinaryBackdrop::generate(&mut rng);
        let rows: Vec<&str> = wall.text.lines().collect();
        assert_eq!(rows.len(), BINARY_LENGTH / BINARY_ROW);
        assert!(rows.iter().all(|row| row.len() == BINARY_ROW));
        assert!(wall.text.chars().all(|c| matches!(c, '0' | '1' | '\n')));
        assert!((0.0..0.5).contains(&wall.top));
    }

    #[test]
    fn scanline_sweep_wraps() {
        assert!((scanline_offset(Duration::from_secs(5)) - 0.5).abs() < 1e-6);
        assert!(scanline_offset(Duration::from_secs(10)).abs() < 1e-6);
    }
}
