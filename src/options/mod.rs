//! Centralized animation and clock options with TOML file support.
//!
//! Every tunable of the fireworks loop (particle physics, burst ignition,
//! the fading trail, countdown refresh) lives here. Options serialize
//! to/from TOML so a window or page can be restyled without rebuilding.

mod burst;
mod countdown;
mod particle;
mod trail;

use std::path::Path;

pub use burst::{BurstOptions, DEFAULT_PALETTE};
pub use countdown::CountdownOptions;
pub use particle::{ParticleOptions, MIN_DECAY_STEP};
use serde::{Deserialize, Serialize};
pub use trail::TrailOptions;

use crate::error::FireworksError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[burst]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Particle physics and drawing.
    pub particle: ParticleOptions,
    /// Burst ignition.
    pub burst: BurstOptions,
    /// Per-frame translucent fill.
    pub trail: TrailOptions,
    /// Countdown clock.
    pub countdown: CountdownOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, is not valid TOML, or holds
    /// values rejected by [`Options::validate`].
    pub fn load(path: &Path) -> Result<Self, FireworksError> {
        let content =
            std::fs::read_to_string(path).map_err(FireworksError::Io)?;
        let options = Self::from_toml(&content)?;
        log::info!("Loaded options from {}", path.display());
        Ok(options)
    }

    /// Parse and validate options from a TOML string.
    ///
    /// # Errors
    ///
    /// Fails on malformed TOML or invalid values.
    pub fn from_toml(content: &str) -> Result<Self, FireworksError> {
        let options: Self = toml::from_str(content)
            .map_err(|e| FireworksError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Fails when serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), FireworksError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| FireworksError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(FireworksError::Io)?;
        }
        std::fs::write(path, content).map_err(FireworksError::Io)
    }

    /// Reject values the animation loop cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`FireworksError::InvalidOptions`] naming the first bad field.
    pub fn validate(&self) -> Result<(), FireworksError> {
        let invalid =
            |msg: &str| Err(FireworksError::InvalidOptions(msg.to_owned()));
        let p = &self.particle;
        if !(p.friction > 0.0 && p.friction <= 1.0) {
            return invalid("particle.friction must be in (0, 1]");
        }
        if !(p.decay_step >= MIN_DECAY_STEP && p.decay_step <= 1.0) {
            return invalid("particle.decay_step must be in [1e-6, 1]");
        }
        if !(p.radius >= 0.0 && p.speed >= 0.0) {
            return invalid("particle.radius and particle.speed must be >= 0");
        }
        if !(0.0..=1.0).contains(&self.burst.spawn_probability) {
            return invalid("burst.spawn_probability must be in [0, 1]");
        }
        if self.burst.palette.is_empty() {
            return invalid("burst.palette must not be empty");
        }
        if !(0.0..=1.0).contains(&self.trail.alpha) {
            return invalid("trail.alpha must be in [0, 1]");
        }
        if self.countdown.refresh_ms == 0 {
            return invalid("countdown.refresh_ms must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r##"
[burst]
particle_count = 50
palette = ["#ffffff"]
"##;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.burst.particle_count, 50);
        assert_eq!(opts.burst.palette, vec![Color::new(255, 255, 255)]);
        // Everything else should be default
        assert_eq!(opts.burst.spawn_probability, 0.03);
        assert_eq!(opts.particle.friction, 0.96);
        assert_eq!(opts.trail.color, Color::new(5, 5, 5));
        assert_eq!(opts.countdown.refresh_ms, 1000);
    }

    #[test]
    fn default_values() {
        let opts = Options::default();
        assert_eq!(opts.particle.decay_step, 0.01);
        assert_eq!(opts.particle.radius, 2.0);
        assert_eq!(opts.particle.speed, 4.0);
        assert_eq!(opts.burst.particle_count, 30);
        assert_eq!(opts.burst.palette.len(), 4);
        assert_eq!(opts.trail.alpha, 0.1);
    }

    #[test]
    fn bad_color_is_a_parse_error() {
        let err =
            Options::from_toml("[trail]\ncolor = \"black\"\n").unwrap_err();
        assert!(matches!(err, FireworksError::OptionsParse(_)));
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let cases = [
            "[particle]\nfriction = 0.0\n",
            "[particle]\nfriction = 1.5\n",
            "[particle]\ndecay_step = 0.0\n",
            "[particle]\ndecay_step = 1e-12\n",
            "[burst]\nspawn_probability = 1.5\n",
            "[burst]\npalette = []\n",
            "[trail]\nalpha = -0.1\n",
            "[countdown]\nrefresh_ms = 0\n",
        ];
        for case in cases {
            let err = Options::from_toml(case).unwrap_err();
            assert!(
                matches!(err, FireworksError::InvalidOptions(_)),
                "{case:?} gave {err}"
            );
        }
    }

    #[test]
    fn slowest_decay_step_is_accepted() {
        let opts = Options::from_toml("[particle]\ndecay_step = 1e-6\n")
            .unwrap();
        assert_eq!(opts.particle.decay_step, MIN_DECAY_STEP);
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir()
            .join(format!("fireworks-options-{}", std::process::id()));
        let path = dir.join("options.toml");
        let mut opts = Options::default();
        opts.burst.spawn_probability = 0.5;
        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
