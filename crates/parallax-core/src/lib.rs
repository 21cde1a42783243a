//! Core types shared across the parallax workspace.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Color theme for the particle field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    /// Warm red, the classic look.
    #[default]
    Ember,
    /// Saturated pink-red on black.
    Neon,
    /// Soft indigo for light-ish terminals.
    Indigo,
    /// Teal-cyan.
    Cyan,
    /// Pale violet.
    Violet,
    /// Hue follows particle depth instead of a fixed accent.
    Spectrum,
}

impl Theme {
    /// Cycle to the next theme.
    pub fn next(&self) -> Self {
        match self {
            Theme::Ember => Theme::Neon,
            Theme::Neon => Theme::Indigo,
            Theme::Indigo => Theme::Cyan,
            Theme::Cyan => Theme::Violet,
            Theme::Violet => Theme::Spectrum,
            Theme::Spectrum => Theme::Ember,
        }
    }

    /// The theme's accent color as RGB components.
    ///
    /// `Spectrum` reports its mid-depth hue; per-particle hues are
    /// computed by the palette at render time.
    pub fn accent(&self) -> (u8, u8, u8) {
        match self {
            Theme::Ember => (239, 68, 68),
            Theme::Neon => (255, 0, 60),
            Theme::Indigo => (99, 102, 241),
            Theme::Cyan => (6, 182, 212),
            Theme::Violet => (192, 132, 252),
            Theme::Spectrum => (120, 220, 140),
        }
    }

    /// Accent as a Ratatui color, for chrome like the help bar.
    pub fn color(&self) -> Color {
        let (r, g, b) = self.accent();
        Color::Rgb(r, g, b)
    }
}

/// Animation speed setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl AnimationSpeed {
    /// Cycle to the next speed.
    pub fn next(&self) -> Self {
        match self {
            AnimationSpeed::Slow => AnimationSpeed::Medium,
            AnimationSpeed::Medium => AnimationSpeed::Fast,
            AnimationSpeed::Fast => AnimationSpeed::Slow,
        }
    }

    /// Multiplier applied to particle drift per frame.
    pub fn drift_multiplier(&self) -> f32 {
        match self {
            AnimationSpeed::Slow => 0.5,
            AnimationSpeed::Medium => 1.0,
            AnimationSpeed::Fast => 2.0,
        }
    }
}

/// Drawing surface dimensions in canvas units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Horizontal half-extent of the particle volume.
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    /// Vertical half-extent of the particle volume.
    pub fn half_height(&self) -> f32 {
        self.height / 2.0
    }

    /// Whether a projected point lies on the surface.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= 0.0 && x <= self.width && y >= 0.0 && y <= self.height
    }
}
