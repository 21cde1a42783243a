//! Color helpers for depth fades and theme accents.
//!
//! A terminal has no alpha channel, so "opacity" is realized by scaling
//! a color toward the (assumed black) backdrop.

use parallax_core::Theme;
use ratatui::style::Color;

use crate::project::Projection;

/// Blend RGB components toward black by `alpha` (0 = invisible).
pub fn fade((r, g, b): (u8, u8, u8), alpha: f32) -> Color {
    let a = alpha.clamp(0.0, 1.0);
    Color::Rgb(
        (r as f32 * a) as u8,
        (g as f32 * a) as u8,
        (b as f32 * a) as u8,
    )
}

/// Color of a particle at depth `z`: the theme accent faded with depth.
/// The `Spectrum` theme sweeps hue across the depth range instead of
/// using a fixed accent.
pub fn particle_color(theme: Theme, z: f32, projection: Projection) -> Color {
    let alpha = projection.opacity(z);
    match theme {
        Theme::Spectrum => {
            let t = (z / projection.depth + 1.0) / 2.0; // [-depth, depth] -> [0, 1]
            fade(hsl_to_rgb(t.clamp(0.0, 1.0) * 360.0, 0.7, 0.55), alpha)
        }
        _ => fade(theme.accent(), alpha),
    }
}

/// Color of a connecting line, faded by link strength.
pub fn link_color(theme: Theme, strength: f32) -> Color {
    fade(theme.accent(), strength)
}

/// Convert HSL to RGB components. Hue in degrees, s and l in 0..=1.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (u8, u8, u8) {
    if s == 0.0 {
        let v = (l * 255.0) as u8;
        return (v, v, v);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    let h = h / 360.0;

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    ((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
