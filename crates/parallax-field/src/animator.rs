//! Frame scheduling for the particle field.

use parallax_core::{AnimationSpeed, Viewport};

use crate::field::ParticleField;

/// Duration of one nominal frame in milliseconds (~60 fps). A tick's
/// elapsed time is converted into this unit so drift speeds match the
/// per-frame constants regardless of the actual redraw rate.
const NOMINAL_FRAME_MS: f32 = 16.7;

/// Drives a [`ParticleField`] from an elapsed-time clock.
///
/// The host loop calls [`tick`](FieldAnimator::tick) once per redraw
/// with a monotonically increasing millisecond count; the animator
/// turns the delta since the previous tick into a frame-normalized step.
/// After [`shutdown`](FieldAnimator::shutdown) every tick is a no-op,
/// so a loop that keeps calling in cannot mutate the field further.
#[derive(Debug)]
pub struct FieldAnimator {
    field: ParticleField,
    last_update_ms: u64,
    running: bool,
    paused: bool,
}

impl FieldAnimator {
    pub fn new(field: ParticleField) -> Self {
        Self {
            field,
            last_update_ms: 0,
            running: true,
            paused: false,
        }
    }

    /// Advance the field to `elapsed_ms`, scaled by the current speed.
    pub fn tick(&mut self, elapsed_ms: u64, speed: AnimationSpeed) {
        if !self.running {
            return;
        }

        // Keep the clock moving while paused so resuming does not jump.
        let delta_ms = elapsed_ms.saturating_sub(self.last_update_ms);
        self.last_update_ms = elapsed_ms;
        if self.paused {
            return;
        }

        let dt = (delta_ms as f32 / NOMINAL_FRAME_MS) * speed.drift_multiplier();
        self.field.step(dt);
    }

    /// Stop the animator for good; subsequent ticks mutate nothing.
    pub fn shutdown(&mut self) {
        self.running = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_pointer(&mut self, pointer: Option<(f32, f32)>) {
        self.field.set_pointer(pointer);
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.field.resize(viewport);
    }

    pub fn reseed(&mut self, seed: u64) {
        self.field.reseed(seed);
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldTuning;

    fn animator() -> FieldAnimator {
        let field = ParticleField::new(Viewport::new(400.0, 200.0), FieldTuning::default(), 3);
        FieldAnimator::new(field)
    }

    #[test]
    fn test_tick_advances_particles() {
        let mut anim = animator();
        let before = anim.field().particles().to_vec();
        anim.tick(17, AnimationSpeed::Medium);
        assert_ne!(anim.field().particles(), before.as_slice());
    }

    #[test]
    fn test_shutdown_stops_all_mutation() {
        let mut anim = animator();
        anim.tick(16, AnimationSpeed::Medium);
        anim.shutdown();

        let frozen = anim.field().particles().to_vec();
        for elapsed in [32, 48, 10_000] {
            anim.tick(elapsed, AnimationSpeed::Fast);
        }
        assert_eq!(anim.field().particles(), frozen.as_slice());
    }

    #[test]
    fn test_pause_skips_steps_without_time_jump() {
        let mut anim = animator();
        anim.tick(16, AnimationSpeed::Medium);
        anim.toggle_pause();
        let paused = anim.field().clone();

        anim.tick(5_000, AnimationSpeed::Medium);
        assert_eq!(anim.field().particles(), paused.particles());

        // Resuming steps only the post-resume delta, not the paused gap.
        anim.toggle_pause();
        anim.tick(5_016, AnimationSpeed::Medium);
        let mut expected = paused;
        expected.step(16.0 / NOMINAL_FRAME_MS);
        assert_eq!(anim.field().particles(), expected.particles());
    }

    #[test]
    fn test_speed_scales_the_step() {
        let field = ParticleField::new(Viewport::new(400.0, 200.0), FieldTuning::default(), 11);
        let mut slow = FieldAnimator::new(field.clone());
        let mut fast = FieldAnimator::new(field);

        slow.tick(100, AnimationSpeed::Slow);
        fast.tick(100, AnimationSpeed::Fast);

        assert_ne!(slow.field().particles(), fast.field().particles());
    }
}
