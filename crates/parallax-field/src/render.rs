//! Braille-canvas rendering for a stepped field.

use parallax_core::Theme;
use ratatui::widgets::canvas::{Circle, Context, Line, Points};

use crate::field::ParticleField;
use crate::palette;

/// Draw the field's current frame onto a canvas context.
///
/// Expects canvas bounds of `[0, width] x [0, height]` in surface
/// units. The canvas y axis points up while surface coordinates point
/// down, so y is flipped here at the boundary. Links go first so
/// particles draw over them.
pub fn draw_field(ctx: &mut Context, field: &ParticleField, theme: Theme) {
    let height = field.viewport().height as f64;
    let projection = field.projection();

    for link in field.links() {
        ctx.draw(&Line {
            x1: link.x1 as f64,
            y1: height - link.y1 as f64,
            x2: link.x2 as f64,
            y2: height - link.y2 as f64,
            color: palette::link_color(theme, link.strength),
        });
    }

    for (particle, proj) in field.particles().iter().zip(field.projected()) {
        if !proj.visible {
            continue;
        }

        let x = proj.x as f64;
        let y = height - proj.y as f64;
        let radius = (particle.size * proj.scale).max(0.5) as f64;
        let color = palette::particle_color(theme, particle.z, projection);

        // An outline circle reads as a hollow ring once it spans more
        // than a dot, so anchor the center point as the particle body.
        ctx.draw(&Points {
            coords: &[(x, y)],
            color,
        });
        if radius >= 1.0 {
            ctx.draw(&Circle {
                x,
                y,
                radius,
                color,
            });
        }
    }
}
