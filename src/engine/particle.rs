use glam::Vec2;

use crate::{color::Color, options::ParticleOptions, surface::RenderSurface};

/// One spark of a firework burst.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Position in surface pixels.
    pub position: Vec2,
    /// Velocity in pixels per frame.
    pub velocity: Vec2,
    /// Paint color, shared by every particle of the same burst.
    pub color: Color,
    /// Frames advanced since spawn.
    age: u32,
    friction: f32,
    decay_step: f32,
}

impl Particle {
    /// A fresh, fully opaque particle.
    #[must_use]
    pub fn new(
        position: Vec2,
        velocity: Vec2,
        color: Color,
        physics: &ParticleOptions,
    ) -> Self {
        Self {
            position,
            velocity,
            color,
            age: 0,
            friction: physics.friction,
            decay_step: physics.decay_step,
        }
    }

    /// Current opacity: `1 - age * decay_step`.
    ///
    /// Derived from the age rather than decremented in place, so the value
    /// after `n` frames is exactly `1 - n * decay_step` and never drifts
    /// across the zero threshold.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        1.0 - self.age as f32 * self.decay_step
    }

    /// Frames advanced since spawn.
    #[must_use]
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Per-frame velocity multiplier.
    #[must_use]
    pub fn friction(&self) -> f32 {
        self.friction
    }

    /// An expired particle is never drawn or advanced again.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.opacity() <= 0.0
    }

    /// Paint the particle as a filled circle at its current opacity.
    pub fn draw<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
        radius: f32,
    ) {
        surface.set_global_alpha(self.opacity());
        surface.set_fill_style(self.color, 1.0);
        surface.fill_circle(self.position.x, self.position.y, radius);
    }

    /// One frame of physics: decay velocity, move, fade.
    pub fn advance(&mut self) {
        self.velocity *= self.friction;
        self.position += self.velocity;
        self.age = self.age.saturating_add(1);
    }
}
