//! The particle animation engine.
//!
//! [`AnimationEngine`] owns the active particles and the surface bounds and
//! performs one frame of work per [`step`](AnimationEngine::step).
//! [`FireworksTask`] wraps an engine together with its render surface and
//! host, and owns the Running/Stopped lifecycle.

mod burst;
mod particle;
mod task;

pub use burst::Burst;
pub use particle::Particle;
use rand::{rngs::StdRng, Rng, SeedableRng};
pub use task::{FireworksTask, TaskState};

use crate::{options::Options, surface::RenderSurface};

/// Active particle set plus the bounds used for the trail fill and for
/// picking burst origins.
pub struct AnimationEngine<R = StdRng> {
    options: Options,
    particles: Vec<Particle>,
    bounds: (u32, u32),
    bursts: u64,
    rng: R,
}

impl AnimationEngine<StdRng> {
    /// An engine seeded from the operating system.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self::with_rng(options, StdRng::from_os_rng())
    }
}

impl<R: Rng> AnimationEngine<R> {
    /// An engine drawing randomness from `rng`. Seeded generators make runs
    /// reproducible.
    pub fn with_rng(options: Options, rng: R) -> Self {
        Self {
            options,
            particles: Vec::new(),
            bounds: (0, 0),
            bursts: 0,
            rng,
        }
    }

    /// Size the engine to its surface. Calling it again only moves the
    /// bounds; particles already in flight are left as they are.
    pub fn initialize(&mut self, width: u32, height: u32) {
        self.bounds = (width, height);
        log::debug!("fireworks engine initialized at {width}x{height}");
    }

    /// Update the bounds used for the trail fill and for future burst
    /// origins. Existing particles keep their position and velocity.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.bounds == (width, height) {
            return;
        }
        self.bounds = (width, height);
        log::debug!("fireworks surface resized to {width}x{height}");
    }

    /// Drop every particle.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// One frame: trail fill, draw-and-advance live particles while
    /// dropping expired ones, then maybe ignite a burst.
    pub fn step<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) {
        let (width, height) = self.bounds;
        let trail = self.options.trail;
        surface.set_global_alpha(1.0);
        surface.set_fill_style(trail.color, trail.alpha);
        surface.fill_rect(0.0, 0.0, width as f32, height as f32);

        let radius = self.options.particle.radius;
        let current = std::mem::take(&mut self.particles);
        self.particles = current
            .into_iter()
            .filter_map(|mut particle| {
                if particle.is_expired() {
                    return None;
                }
                particle.draw(&mut *surface, radius);
                particle.advance();
                Some(particle)
            })
            .collect();

        // Per-frame chance, so density follows the display refresh rate.
        if self.rng.random::<f64>() < self.options.burst.spawn_probability {
            let _ = self.spawn_burst();
        }
    }

    /// Ignite a burst now, regardless of the spawn probability.
    pub fn spawn_burst(&mut self) -> Option<Burst> {
        let burst =
            Burst::random(&mut self.rng, self.bounds, &self.options.burst)?;
        self.particles
            .extend(burst.particles(&mut self.rng, &self.options.particle));
        self.bursts += 1;
        log::debug!(
            "burst of {} at ({:.0}, {:.0}) in {}",
            burst.count,
            burst.origin.x,
            burst.origin.y,
            burst.color
        );
        Some(burst)
    }

    /// Particles currently in flight.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Bursts ignited since the engine was created.
    #[must_use]
    pub fn bursts_spawned(&self) -> u64 {
        self.bursts
    }

    /// Current surface bounds as `(width, height)`.
    #[must_use]
    pub fn bounds(&self) -> (u32, u32) {
        self.bounds
    }

    /// Active options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace the options. Particles in flight keep the physics they were
    /// spawned with.
    pub fn set_options(&mut self, options: Options) {
        self.options = options;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        color::Color,
        options::DEFAULT_PALETTE,
        surface::recording::{DrawOp, RecordingSurface},
    };

    fn engine_with(spawn_probability: f64, seed: u64) -> AnimationEngine {
        let mut options = Options::default();
        options.burst.spawn_probability = spawn_probability;
        let mut engine =
            AnimationEngine::with_rng(options, StdRng::seed_from_u64(seed));
        engine.initialize(800, 600);
        engine
    }

    #[test]
    fn step_opens_with_the_trail_fill() {
        let mut engine = engine_with(0.0, 1);
        let mut surface = RecordingSurface::new(800, 600);
        engine.step(&mut surface);
        assert_eq!(
            surface.ops,
            vec![
                DrawOp::GlobalAlpha(1.0),
                DrawOp::FillStyle(Color::new(5, 5, 5), 0.1),
                DrawOp::Rect {
                    x: 0.0,
                    y: 0.0,
                    w: 800.0,
                    h: 600.0
                },
            ]
        );
    }

    #[test]
    fn burst_spawns_thirty_particles_sharing_origin_and_color() {
        let mut engine = engine_with(0.0, 2);
        let burst = engine.spawn_burst().unwrap();
        assert_eq!(burst.count, 30);
        assert!(DEFAULT_PALETTE.contains(&burst.color));
        assert_eq!(engine.particles().len(), 30);
        for p in engine.particles() {
            assert_eq!(p.position, burst.origin);
            assert_eq!(p.color, burst.color);
            assert_eq!(p.opacity(), 1.0);
            assert!((-4.0..4.0).contains(&p.velocity.x));
            assert!((-4.0..4.0).contains(&p.velocity.y));
        }
        let first = engine.particles()[0].velocity;
        assert!(engine.particles().iter().any(|p| p.velocity != first));
    }

    #[test]
    fn particle_is_drawn_on_steps_one_to_one_hundred_only() {
        let mut engine = engine_with(0.0, 3);
        let _ = engine.spawn_burst().unwrap();
        for step in 1..=100 {
            let mut surface = RecordingSurface::new(800, 600);
            engine.step(&mut surface);
            assert_eq!(surface.circles(), 30, "step {step}");
        }
        assert_eq!(engine.particles().len(), 30);

        let mut surface = RecordingSurface::new(800, 600);
        engine.step(&mut surface);
        assert_eq!(surface.circles(), 0);
        assert!(engine.particles().is_empty());
    }

    #[test]
    fn particles_are_drawn_at_pre_update_opacity() {
        let mut engine = engine_with(0.0, 4);
        let burst = engine.spawn_burst().unwrap();
        let mut surface = RecordingSurface::new(800, 600);
        engine.step(&mut surface);
        let draw = &surface.ops[3..6];
        assert_eq!(draw[0], DrawOp::GlobalAlpha(1.0));
        assert_eq!(draw[1], DrawOp::FillStyle(burst.color, 1.0));
        assert_eq!(
            draw[2],
            DrawOp::Circle {
                x: burst.origin.x,
                y: burst.origin.y,
                r: 2.0
            }
        );
        assert!(engine
            .particles()
            .iter()
            .all(|p| (p.opacity() - 0.99).abs() < 1e-6));
    }

    #[test]
    fn population_is_bounded_under_continuous_spawning() {
        let mut engine = engine_with(1.0, 5);
        let mut surface = RecordingSurface::new(800, 600);
        for _ in 0..300 {
            engine.step(&mut surface);
            surface.ops.clear();
            assert!(engine.particles().len() <= 30 * 101);
            assert!(engine.particles().iter().all(|p| p.age() <= 100));
        }
        // Bursts from the last 101 steps are alive: 100 aged ones plus the
        // one spawned this step.
        assert_eq!(engine.particles().len(), 30 * 101);
    }

    #[test]
    fn spawn_probability_zero_never_spawns() {
        let mut engine = engine_with(0.0, 6);
        let mut surface = RecordingSurface::new(800, 600);
        for _ in 0..1000 {
            engine.step(&mut surface);
        }
        assert!(engine.particles().is_empty());
    }

    #[test]
    fn spawn_rate_tracks_probability() {
        let mut engine = engine_with(0.03, 7);
        let mut surface = RecordingSurface::new(800, 600);
        let mut spawns = 0;
        for _ in 0..10_000 {
            engine.step(&mut surface);
            surface.ops.clear();
            // Survivors have all aged; only a fresh burst has age zero.
            if engine.particles().iter().any(|p| p.age() == 0) {
                spawns += 1;
            }
        }
        assert!((200..400).contains(&spawns), "spawns = {spawns}");
    }

    #[test]
    fn resize_moves_bounds_without_touching_particles() {
        let mut engine = engine_with(0.0, 8);
        let _ = engine.spawn_burst().unwrap();
        let mut surface = RecordingSurface::new(800, 600);
        engine.step(&mut surface);
        let before = engine.particles().to_vec();

        engine.resize(320, 200);
        engine.resize(320, 200);
        assert_eq!(engine.bounds(), (320, 200));
        assert_eq!(engine.particles(), &before[..]);

        let mut surface = RecordingSurface::new(320, 200);
        engine.step(&mut surface);
        assert_eq!(
            surface.ops[2],
            DrawOp::Rect {
                x: 0.0,
                y: 0.0,
                w: 320.0,
                h: 200.0
            }
        );
    }

    #[test]
    fn bursts_land_inside_resized_bounds() {
        let mut engine = engine_with(0.0, 9);
        engine.resize(50, 40);
        for _ in 0..100 {
            let burst = engine.spawn_burst().unwrap();
            assert!(burst.origin.x < 50.0 && burst.origin.y < 40.0);
        }
    }

    #[test]
    fn reinitialize_keeps_particles_in_flight() {
        let mut engine = engine_with(0.0, 10);
        let _ = engine.spawn_burst().unwrap();
        engine.initialize(1024, 768);
        assert_eq!(engine.bursts_spawned(), 1);
        assert_eq!(engine.bounds(), (1024, 768));
        assert_eq!(engine.particles().len(), 30);
    }
}
