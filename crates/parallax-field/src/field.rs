//! Particle field state and per-tick updates.

use parallax_core::Viewport;

use crate::particle::{self, Particle};
use crate::project::{Projected, Projection};

/// Tuning knobs for the field, all in surface units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldTuning {
    /// Number of particles, fixed for the field's lifetime.
    pub particles: usize,
    /// Distance from the eye to the z = 0 plane.
    pub projection_distance: f32,
    /// Depth half-extent of the bounding volume.
    pub depth: f32,
    /// Pairs closer than this (3D distance) get a connecting line.
    pub link_distance: f32,
    /// Pointer influence radius around the projected position.
    pub pointer_radius: f32,
    /// Velocity nudge applied per tick inside the pointer radius.
    pub pointer_force: f32,
    /// Velocity magnitude cap, applied after the pointer nudge.
    pub max_speed: Option<f32>,
}

impl Default for FieldTuning {
    fn default() -> Self {
        Self {
            particles: 100,
            projection_distance: 1000.0,
            depth: 500.0,
            link_distance: 200.0,
            pointer_radius: 150.0,
            pointer_force: 0.3,
            max_speed: Some(8.0),
        }
    }
}

/// A connecting line between two projected particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    /// 1 for touching particles, approaching 0 at the link distance.
    pub strength: f32,
}

/// The particle field: a fixed set of particles in a bounded volume.
///
/// All mutation happens through [`ParticleField::step`], which runs to
/// completion before the next tick is scheduled; the pointer is a plain
/// last-writer-wins value set between ticks.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    projected: Vec<Projected>,
    viewport: Viewport,
    pointer: Option<(f32, f32)>,
    tuning: FieldTuning,
    projection: Projection,
}

impl ParticleField {
    /// Create a field with freshly spawned particles.
    pub fn new(viewport: Viewport, tuning: FieldTuning, seed: u64) -> Self {
        let particles = particle::spawn(tuning.particles, viewport, tuning.depth, seed);
        Self::with_particles(particles, viewport, tuning)
    }

    /// Create a field from explicit particle state.
    pub fn with_particles(
        particles: Vec<Particle>,
        viewport: Viewport,
        tuning: FieldTuning,
    ) -> Self {
        let projected = vec![Projected::default(); particles.len()];
        Self {
            particles,
            projected,
            viewport,
            pointer: None,
            tuning,
            projection: Projection {
                distance: tuning.projection_distance,
                depth: tuning.depth,
            },
        }
    }

    /// Throw away the current particles and spawn a fresh set.
    pub fn reseed(&mut self, seed: u64) {
        self.particles =
            particle::spawn(self.tuning.particles, self.viewport, self.tuning.depth, seed);
        self.projected = vec![Projected::default(); self.particles.len()];
    }

    /// Update the last known pointer position, in surface coordinates.
    pub fn set_pointer(&mut self, pointer: Option<(f32, f32)>) {
        self.pointer = pointer;
    }

    /// Adopt new surface dimensions. Positions are not rescaled; a
    /// particle stranded outside the new bounds re-enters through the
    /// normal wrap logic on a later step.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Advance the field by `dt` nominal frames.
    ///
    /// Integrates positions, wraps out-of-bounds axes to the opposite
    /// face, refreshes the projection cache, applies the pointer
    /// repulsion to visible particles and finally clamps velocity.
    pub fn step(&mut self, dt: f32) {
        let hw = self.viewport.half_width();
        let hh = self.viewport.half_height();
        let hd = self.projection.depth;

        for (p, proj) in self.particles.iter_mut().zip(self.projected.iter_mut()) {
            p.x = wrap(p.x + p.vx * dt, hw);
            p.y = wrap(p.y + p.vy * dt, hh);
            p.z = wrap(p.z + p.vz * dt, hd);

            *proj = self.projection.to_surface(self.viewport, p.x, p.y, p.z);

            // Offscreen particles keep drifting but feel no pointer.
            if proj.visible
                && let Some((px, py)) = self.pointer
            {
                let dx = proj.x - px;
                let dy = proj.y - py;
                let dist = (dx * dx + dy * dy).sqrt();
                if dist < self.tuning.pointer_radius {
                    let angle = dy.atan2(dx);
                    p.vx += angle.cos() * self.tuning.pointer_force;
                    p.vy += angle.sin() * self.tuning.pointer_force;
                }
            }

            if let Some(cap) = self.tuning.max_speed {
                let speed = (p.vx * p.vx + p.vy * p.vy + p.vz * p.vz).sqrt();
                if speed > cap {
                    let k = cap / speed;
                    p.vx *= k;
                    p.vy *= k;
                    p.vz *= k;
                }
            }
        }
    }

    /// Connecting lines for the current frame.
    ///
    /// Quadratic over the particle count, which is fine for the tens to
    /// low hundreds this field runs at. Should counts ever grow, a
    /// uniform grid over the volume is the replacement.
    pub fn links(&self) -> Vec<Link> {
        let threshold = self.tuning.link_distance;
        let mut links = Vec::new();

        for i in 0..self.particles.len() {
            for j in (i + 1)..self.particles.len() {
                let (pa, pb) = (&self.projected[i], &self.projected[j]);
                if !pa.visible && !pb.visible {
                    continue;
                }

                let (a, b) = (&self.particles[i], &self.particles[j]);
                let dx = b.x - a.x;
                let dy = b.y - a.y;
                let dz = b.z - a.z;
                let dist = (dx * dx + dy * dy + dz * dz).sqrt();

                if dist < threshold {
                    links.push(Link {
                        x1: pa.x,
                        y1: pa.y,
                        x2: pb.x,
                        y2: pb.y,
                        strength: 1.0 - dist / threshold,
                    });
                }
            }
        }

        links
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Projection cache from the most recent step.
    pub fn projected(&self) -> &[Projected] {
        &self.projected
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn tuning(&self) -> FieldTuning {
        self.tuning
    }
}

/// Wrap a coordinate that exceeds its half-extent to the opposite face.
/// A value exactly at the boundary stays put; only exceeding it wraps.
fn wrap(value: f32, half: f32) -> f32 {
    if value > half {
        -half
    } else if value < -half {
        half
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still(x: f32, y: f32, z: f32) -> Particle {
        Particle {
            x,
            y,
            z,
            vx: 0.0,
            vy: 0.0,
            vz: 0.0,
            size: 1.0,
        }
    }

    fn test_viewport() -> Viewport {
        Viewport::new(400.0, 200.0)
    }

    #[test]
    fn test_wrap_invariant_over_many_steps() {
        let vp = test_viewport();
        let mut field = ParticleField::new(vp, FieldTuning::default(), 9);
        for _ in 0..500 {
            field.step(1.0);
            for p in field.particles() {
                assert!(p.x.abs() <= vp.half_width());
                assert!(p.y.abs() <= vp.half_height());
                assert!(p.z.abs() <= field.projection().depth);
            }
        }
    }

    #[test]
    fn test_boundary_wraps_only_on_exceed() {
        let vp = test_viewport();
        let mut p = still(vp.half_width(), 0.0, 0.0);
        p.vx = 1.0;
        let mut field = ParticleField::with_particles(vec![p], vp, FieldTuning::default());

        // Exactly at the boundary: no wrap yet.
        field.step(0.0);
        assert_eq!(field.particles()[0].x, vp.half_width());

        // The step that pushes past the boundary lands on the opposite face.
        field.step(1.0);
        assert_eq!(field.particles()[0].x, -vp.half_width());
    }

    #[test]
    fn test_velocity_cap_holds_after_step() {
        let tuning = FieldTuning {
            max_speed: Some(2.0),
            ..FieldTuning::default()
        };
        let mut p = still(0.0, 0.0, 0.0);
        p.vx = 30.0;
        p.vy = -14.0;
        p.vz = 5.0;
        let mut field = ParticleField::with_particles(vec![p], test_viewport(), tuning);
        field.step(1.0);

        let p = field.particles()[0];
        let speed = (p.vx * p.vx + p.vy * p.vy + p.vz * p.vz).sqrt();
        assert!(speed <= 2.0 + 1e-4);
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let vp = test_viewport();
        let tuning = FieldTuning::default();
        let mut a = ParticleField::new(vp, tuning, 1234);
        let mut b = ParticleField::new(vp, tuning, 1234);
        for dt in [1.0, 0.5, 2.0, 1.0, 1.0, 3.5] {
            a.step(dt);
            b.step(dt);
        }
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_links_strictly_below_threshold() {
        let vp = test_viewport();
        let tuning = FieldTuning::default();

        // Exactly at the link distance: excluded.
        let field = {
            let mut f = ParticleField::with_particles(
                vec![still(0.0, 0.0, 0.0), still(0.0, 0.0, 200.0)],
                vp,
                tuning,
            );
            f.step(0.0);
            f
        };
        assert!(field.links().is_empty());

        // Just inside: linked, with a small positive strength.
        let field = {
            let mut f = ParticleField::with_particles(
                vec![still(0.0, 0.0, 0.0), still(0.0, 0.0, 199.0)],
                vp,
                tuning,
            );
            f.step(0.0);
            f
        };
        let links = field.links();
        assert_eq!(links.len(), 1);
        assert!(links[0].strength > 0.0 && links[0].strength < 0.01);
    }

    #[test]
    fn test_no_links_between_two_offscreen_particles() {
        let vp = test_viewport();
        // Near particles (z = -400 magnifies by 5/3) stay inside the
        // volume but both project past the right edge, 5 units apart.
        let mut field = ParticleField::with_particles(
            vec![still(150.0, 0.0, -400.0), still(155.0, 0.0, -400.0)],
            vp,
            FieldTuning::default(),
        );
        field.step(0.0);
        assert!(!field.projected()[0].visible);
        assert!(!field.projected()[1].visible);
        assert!(field.links().is_empty());
    }

    #[test]
    fn test_pointer_pushes_visible_particles_away() {
        let vp = test_viewport();
        let mut field = ParticleField::with_particles(
            vec![still(0.0, 0.0, 0.0)],
            vp,
            FieldTuning::default(),
        );
        // Particle projects to the surface center; pointer just left of it.
        field.set_pointer(Some((vp.width / 2.0 - 10.0, vp.height / 2.0)));
        field.step(0.0);

        let p = field.particles()[0];
        assert!(p.vx > 0.0, "nudge should point away from the pointer");
        assert_eq!(p.vz, 0.0, "pointer only affects the screen plane");
    }

    #[test]
    fn test_pointer_ignores_offscreen_particles() {
        let vp = test_viewport();
        // A near particle (z = -400 magnifies by 5/3) projects past the
        // right edge at x2d = 450, while the pointer sits at (395, 100):
        // well inside the radius, but the particle is offscreen so the
        // nudge must be skipped.
        let mut p = still(150.0, 0.0, -400.0);
        p.vx = -2.0;
        let mut field = ParticleField::with_particles(vec![p], vp, FieldTuning::default());
        field.set_pointer(Some((395.0, 100.0)));
        let before = field.particles()[0];
        field.step(0.0);
        let after = field.particles()[0];

        assert!(!field.projected()[0].visible);
        assert_eq!(after.vx, before.vx, "offscreen particles feel no pointer force");
    }

    #[test]
    fn test_resize_keeps_positions() {
        let vp = test_viewport();
        let mut field = ParticleField::new(vp, FieldTuning::default(), 5);
        field.step(1.0);
        let before: Vec<_> = field.particles().to_vec();

        field.resize(Viewport::new(100.0, 60.0));
        assert_eq!(field.particles(), before.as_slice());

        // Later steps wrap against the new, smaller half-extents.
        for _ in 0..300 {
            field.step(1.0);
        }
        for p in field.particles() {
            assert!(p.x.abs() <= 50.0);
            assert!(p.y.abs() <= 30.0);
        }
    }

    #[test]
    fn test_reseed_replaces_particles() {
        let mut field = ParticleField::new(test_viewport(), FieldTuning::default(), 1);
        let before = field.particles().to_vec();
        field.reseed(2);
        assert_eq!(field.particles().len(), before.len());
        assert_ne!(field.particles(), before.as_slice());
    }
}
