//! Perspective projection from field space to surface coordinates.

use parallax_core::Viewport;

/// Projection constants: eye distance and the depth half-extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Distance from the eye to the z = 0 plane.
    pub distance: f32,
    /// Half-extent of the volume along z; particles fade out entirely
    /// at `|z| >= depth`.
    pub depth: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            distance: 1000.0,
            depth: 500.0,
        }
    }
}

impl Projection {
    /// Perspective scale factor at depth `z`.
    pub fn scale(&self, z: f32) -> f32 {
        self.distance / (self.distance + z)
    }

    /// Project a field-space point onto the surface, origin top-left.
    pub fn to_surface(&self, viewport: Viewport, x: f32, y: f32, z: f32) -> Projected {
        let scale = self.scale(z);
        let sx = x * scale + viewport.width / 2.0;
        let sy = y * scale + viewport.height / 2.0;
        Projected {
            x: sx,
            y: sy,
            scale,
            visible: viewport.contains(sx, sy),
        }
    }

    /// Opacity at depth `z`: 1 at the z = 0 plane, 0 at the depth face.
    pub fn opacity(&self, z: f32) -> f32 {
        (1.0 - z.abs() / self.depth).max(0.0)
    }
}

/// A particle's surface-space footprint for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Projected {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    /// False when the projected point falls off the surface; such
    /// particles are still stepped but not drawn or pointer-nudged.
    pub visible: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_at_reference_depths() {
        let proj = Projection::default();
        assert_eq!(proj.scale(0.0), 1.0);
        assert_eq!(proj.scale(1000.0), 0.5);
        assert!(proj.scale(-500.0) > 1.0);
    }

    #[test]
    fn test_center_projects_to_surface_center() {
        let proj = Projection::default();
        let vp = Viewport::new(200.0, 100.0);
        let p = proj.to_surface(vp, 0.0, 0.0, 250.0);
        assert_eq!(p.x, 100.0);
        assert_eq!(p.y, 50.0);
        assert!(p.visible);
    }

    #[test]
    fn test_offscreen_point_not_visible() {
        let proj = Projection::default();
        let vp = Viewport::new(200.0, 100.0);
        let p = proj.to_surface(vp, 150.0, 0.0, 0.0);
        assert!(!p.visible);
        assert_eq!(p.x, 250.0);
    }

    #[test]
    fn test_opacity_fades_with_depth() {
        let proj = Projection::default();
        assert_eq!(proj.opacity(0.0), 1.0);
        assert_eq!(proj.opacity(250.0), 0.5);
        assert_eq!(proj.opacity(500.0), 0.0);
        assert_eq!(proj.opacity(-800.0), 0.0);
    }
}
