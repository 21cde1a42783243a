//! Configuration loading for parallax.
//!
//! Settings live in `parallax.toml` under the platform config
//! directory. A missing file means defaults; a malformed file is an
//! error so typos do not silently fall back.

use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;
use parallax_core::{AnimationSpeed, Theme};
use serde::{Deserialize, Serialize};

/// User configuration. Every field has a default, so a partial file
/// only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Number of particles in the field.
    pub particles: usize,
    /// RNG seed; unset means seed from the wall clock at startup.
    pub seed: Option<u64>,
    /// Distance from the eye to the z = 0 plane.
    pub projection_distance: f32,
    /// Depth half-extent of the particle volume.
    pub depth: f32,
    /// Maximum 3D distance for connecting lines.
    pub link_distance: f32,
    /// Pointer influence radius, in surface units.
    pub pointer_radius: f32,
    /// Velocity nudge applied inside the pointer radius.
    pub pointer_force: f32,
    /// Velocity magnitude cap; unset disables the clamp.
    pub max_speed: Option<f32>,
    /// Starting color theme.
    pub theme: Theme,
    /// Starting animation speed.
    pub speed: AnimationSpeed,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            particles: 100,
            seed: None,
            projection_distance: 1000.0,
            depth: 500.0,
            link_distance: 200.0,
            pointer_radius: 150.0,
            pointer_force: 0.3,
            max_speed: Some(8.0),
            theme: Theme::default(),
            speed: AnimationSpeed::default(),
        }
    }
}

/// Load the config file if present, defaults otherwise.
pub fn load() -> io::Result<Config> {
    match config_path() {
        Some(path) if path.exists() => {
            let text = std::fs::read_to_string(&path)?;
            parse(&text)
        }
        _ => Ok(Config::default()),
    }
}

/// Parse a TOML config document.
pub fn parse(text: &str) -> io::Result<Config> {
    toml::from_str(text).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Platform config file path (`<config dir>/parallax/parallax.toml`).
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "parallax").map(|dirs| dirs.config_dir().join("parallax.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_defaults() {
        assert_eq!(parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_override() {
        let config = parse(
            r#"
            particles = 64
            seed = 42
            theme = "indigo"
            speed = "fast"
            "#,
        )
        .unwrap();
        assert_eq!(config.particles, 64);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.theme, Theme::Indigo);
        assert_eq!(config.speed, AnimationSpeed::Fast);
        // Untouched fields keep their defaults.
        assert_eq!(config.link_distance, 200.0);
        assert_eq!(config.pointer_radius, 150.0);
    }

    #[test]
    fn test_unknown_theme_is_an_error() {
        assert!(parse(r#"theme = "plasma""#).is_err());
    }

    #[test]
    fn test_kebab_case_keys() {
        let config = parse("max-speed = 2.5\npointer-force = 0.5").unwrap();
        assert_eq!(config.max_speed, Some(2.5));
        assert_eq!(config.pointer_force, 0.5);
    }
}
