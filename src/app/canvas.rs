//! Canvas layers drawn above and below the page widgets.

use crate::theme::{self, CYAN, MAGENTA, NEON_GREEN};
use iced::widget::canvas::{self, Frame, Geometry, Path, Program, Stroke};
use iced::{Color, Font, Pixels, Point, Rectangle, Renderer, Size, Theme, mouse};
use neonfolio_core::cursor::{CursorFrame, DOT_RADIUS, RING_RADIUS};
use neonfolio_core::decor::ParticleFrame;

const BINARY_TEXT_SIZE: f32 = 14.0;
const SCANLINE_SPACING: f32 = 4.0;

/// Particles and the binary wall behind everything.
pub(super) struct Backdrop {
    pub(super) particles: Vec<ParticleFrame>,
    pub(super) binary: String,
    pub(super) binary_origin: Point,
    pub(super) binary_opacity: f32,
}

impl<Message> Program<Message> for Backdrop {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        for (row, line) in self.binary.lines().enumerate() {
            frame.fill_text(canvas::Text {
                content: line.to_string(),
                position: Point::new(
                    self.binary_origin.x,
                    self.binary_origin.y + row as f32 * BINARY_TEXT_SIZE * 1.2,
                ),
                color: theme::with_alpha(NEON_GREEN, self.binary_opacity),
                size: Pixels(BINARY_TEXT_SIZE),
                font: Font::MONOSPACE,
                ..canvas::Text::default()
            });
        }

        for particle in &self.particles {
            let radius = particle.size / 2.0;
            let dot = Path::circle(Point::new(particle.x, particle.y), radius);
            frame.fill(
                &dot,
                theme::with_alpha(theme::hue(particle.hue), particle.opacity),
            );
        }

        vec![frame.into_geometry()]
    }
}

/// Scanline texture plus the CRT flash.
pub(super) struct Scanlines {
    /// Sweep position as a fraction of the line spacing.
    pub(super) offset: f32,
    pub(super) alpha: f32,
    pub(super) flash: f32,
}

impl<Message> Program<Message> for Scanlines {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        if self.alpha > 0.0 {
            let color = Color::from_rgba(0.0, 0.0, 0.0, self.alpha);
            let mut y = self.offset.fract() * SCANLINE_SPACING;
            while y < bounds.height {
                frame.fill_rectangle(Point::new(0.0, y), Size::new(bounds.width, 1.0), color);
                y += SCANLINE_SPACING;
            }
        }

        if self.flash > 0.0 {
            frame.fill_rectangle(
                Point::ORIGIN,
                bounds.size(),
                theme::with_alpha(MAGENTA, 0.25 * self.flash),
            );
        }

        vec![frame.into_geometry()]
    }
}

/// Dot and trailing ring that replace the system pointer.
pub(super) struct CursorLayer {
    pub(super) frame: CursorFrame,
}

impl<Message> Program<Message> for CursorLayer {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let cursor = self.frame;
        if cursor.opacity <= 0.0 {
            return vec![frame.into_geometry()];
        }

        let dot_centre = Point::new(cursor.dot.x + DOT_RADIUS, cursor.dot.y + DOT_RADIUS);
        let dot = Path::circle(dot_centre, DOT_RADIUS * cursor.dot_scale);
        frame.fill(&dot, theme::with_alpha(NEON_GREEN, cursor.opacity * 0.5));

        let ring_centre = Point::new(cursor.ring.x + RING_RADIUS, cursor.ring.y + RING_RADIUS);
        let (ring_color, ring_width) = if cursor.ring_hover {
            (CYAN, 2.0)
        } else {
            (NEON_GREEN, 1.0)
        };
        let ring = Path::circle(ring_centre, RING_RADIUS);
        frame.stroke(
            &ring,
            Stroke::default()
                .with_color(theme::with_alpha(ring_color, cursor.opacity * 0.8))
                .with_width(ring_width),
        );

        vec![frame.into_geometry()]
    }
}
