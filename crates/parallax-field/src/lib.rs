//! 3D particle field animation for the terminal.
//!
//! This crate owns the particle simulation: a fixed set of point masses
//! drifting through a bounded volume with wrap-around faces, projected
//! onto a 2D surface with a simple perspective transform and linked by
//! proximity lines. The field reacts to a pointer by pushing nearby
//! particles away. Rendering targets a Ratatui braille canvas; the
//! simulation itself never touches the terminal, so it is driven and
//! tested with plain tick calls.

mod animator;
mod field;
mod palette;
mod particle;
mod project;
mod render;

pub use animator::FieldAnimator;
pub use field::{FieldTuning, Link, ParticleField};
pub use palette::{hsl_to_rgb, link_color, particle_color};
pub use particle::Particle;
pub use project::{Projected, Projection};
pub use render::draw_field;
