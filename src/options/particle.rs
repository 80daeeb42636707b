use serde::{Deserialize, Serialize};

/// Per-particle physics and drawing parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParticleOptions {
    /// Multiplicative velocity decay applied every frame, in (0, 1].
    pub friction: f32,
    /// Opacity subtracted every frame. Lifetime is `ceil(1 / decay_step)`
    /// frames.
    pub decay_step: f32,
    /// Radius of the filled circle drawn for each particle, in pixels.
    pub radius: f32,
    /// Half-range of the uniform initial velocity on each axis: components
    /// are sampled from `[-speed, speed)`.
    pub speed: f32,
}

/// Smallest accepted `decay_step`. Slower fades stop resolving in `f32`
/// opacity, so particles would never expire.
pub const MIN_DECAY_STEP: f32 = 1e-6;

impl Default for ParticleOptions {
    fn default() -> Self {
        Self {
            friction: 0.96,
            decay_step: 0.01,
            radius: 2.0,
            speed: 4.0,
        }
    }
}
