//! Particle state and seeded spawning.

use parallax_core::Viewport;
use rand::prelude::*;
use rand_pcg::Pcg64Mcg;

/// A single point mass in the field.
///
/// Particles have no identity beyond their slot: they are spawned once
/// at field creation and mutated in place every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub vx: f32,
    pub vy: f32,
    pub vz: f32,
    /// Base render size, scaled by perspective at draw time.
    pub size: f32,
}

/// Spawn `count` particles uniformly over the bounding volume.
///
/// Positions cover `[-W/2, W/2] x [-H/2, H/2] x [-depth, depth]`,
/// velocities small per-axis ranges with a forward bias on z.
pub fn spawn(count: usize, viewport: Viewport, depth: f32, seed: u64) -> Vec<Particle> {
    let mut rng = Pcg64Mcg::seed_from_u64(seed);

    // A degenerate surface still gets a usable volume.
    let hw = viewport.half_width().max(1.0);
    let hh = viewport.half_height().max(1.0);
    let hd = depth.max(1.0);

    (0..count)
        .map(|_| Particle {
            x: rng.gen_range(-hw..hw),
            y: rng.gen_range(-hh..hh),
            z: rng.gen_range(-hd..hd),
            vx: rng.gen_range(-1.0..1.0),
            vy: rng.gen_range(-1.0..1.0),
            vz: rng.gen_range(-1.0..2.0),
            size: rng.gen_range(1.0..3.0),
        })
        .collect()
}
