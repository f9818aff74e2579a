//! Neon-on-black palette shared by the view and the canvas layers.

use iced::theme::Palette;
use iced::{Color, Theme};
use neonfolio_core::decor::Hue;

pub const BACKGROUND: Color = Color::from_rgb(0.02, 0.02, 0.03);
pub const SURFACE: Color = Color::from_rgb(0.06, 0.07, 0.08);
pub const NEON_GREEN: Color = Color::from_rgb(0.224, 1.0, 0.078);
pub const CYAN: Color = Color::from_rgb(0.0, 0.94, 1.0);
pub const MAGENTA: Color = Color::from_rgb(1.0, 0.0, 0.5);
pub const TEXT: Color = Color::from_rgb(0.85, 0.9, 0.85);
pub const MUTED: Color = Color::from_rgb(0.45, 0.5, 0.45);

pub fn with_alpha(color: Color, alpha: f32) -> Color {
    Color {
        a: alpha.clamp(0.0, 1.0),
        ..color
    }
}

pub fn hue(hue: Hue) -> Color {
    match hue {
        Hue::Neon => NEON_GREEN,
        Hue::Cyan => CYAN,
    }
}

/// CRT mode tints the whole page slightly green.
pub fn theme(crt: bool) -> Theme {
    let background = if crt {
        Color::from_rgb(0.01, 0.04, 0.015)
    } else {
        BACKGROUND
    };
    Theme::custom(
        if crt { "Neon CRT" } else { "Neon" }.to_string(),
        Palette {
            background,
            text: TEXT,
            primary: NEON_GREEN,
            success: CYAN,
            danger: MAGENTA,
        },
    )
}
