use glam::Vec2;
use rand::{seq::IndexedRandom, Rng};

use super::particle::Particle;
use crate::{
    color::Color,
    options::{BurstOptions, ParticleOptions},
};

/// A single ignition: where, in what color, and how many sparks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    /// Spawn point shared by every particle.
    pub origin: Vec2,
    /// Color shared by every particle.
    pub color: Color,
    /// Number of particles materialised.
    pub count: usize,
}

impl Burst {
    /// Pick a uniform color from the palette and a uniform point inside
    /// `bounds`. Returns `None` when the palette is empty.
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: (u32, u32),
        options: &BurstOptions,
    ) -> Option<Self> {
        let color = *options.palette.choose(rng)?;
        let origin = Vec2::new(
            rng.random::<f32>() * bounds.0 as f32,
            rng.random::<f32>() * bounds.1 as f32,
        );
        Some(Self {
            origin,
            color,
            count: options.particle_count,
        })
    }

    /// Materialise the burst. Each particle samples its own velocity.
    pub fn particles<'a, R: Rng + ?Sized>(
        &'a self,
        rng: &'a mut R,
        physics: &'a ParticleOptions,
    ) -> impl Iterator<Item = Particle> + 'a {
        (0..self.count).map(move |_| {
            let velocity = sample_velocity(rng, physics.speed);
            Particle::new(self.origin, velocity, self.color, physics)
        })
    }
}

/// Uniform in `[-speed, speed)` on each axis.
fn sample_velocity<R: Rng + ?Sized>(rng: &mut R, speed: f32) -> Vec2 {
    let spread = 2.0 * speed;
    Vec2::new(
        (rng.random::<f32>() - 0.5) * spread,
        (rng.random::<f32>() - 0.5) * spread,
    )
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn origin_stays_inside_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let options = BurstOptions::default();
        for _ in 0..500 {
            let burst = Burst::random(&mut rng, (640, 480), &options).unwrap();
            assert!((0.0..640.0).contains(&burst.origin.x));
            assert!((0.0..480.0).contains(&burst.origin.y));
            assert!(options.palette.contains(&burst.color));
        }
    }

    #[test]
    fn empty_palette_yields_no_burst() {
        let mut rng = StdRng::seed_from_u64(7);
        let options = BurstOptions {
            palette: Vec::new(),
            ..BurstOptions::default()
        };
        assert!(Burst::random(&mut rng, (10, 10), &options).is_none());
    }

    #[test]
    fn every_palette_entry_gets_picked() {
        let mut rng = StdRng::seed_from_u64(11);
        let options = BurstOptions::default();
        let mut seen = [false; 4];
        for _ in 0..200 {
            let burst = Burst::random(&mut rng, (10, 10), &options).unwrap();
            let idx = options
                .palette
                .iter()
                .position(|c| *c == burst.color)
                .unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn velocities_cover_the_half_open_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let burst = Burst {
            origin: Vec2::ZERO,
            color: Color::new(0, 0, 0),
            count: 2000,
        };
        let physics = ParticleOptions::default();
        let particles: Vec<_> = burst.particles(&mut rng, &physics).collect();
        assert_eq!(particles.len(), 2000);
        let (mut min, mut max) = (f32::MAX, f32::MIN);
        for p in &particles {
            for v in [p.velocity.x, p.velocity.y] {
                assert!((-4.0..4.0).contains(&v));
                min = min.min(v);
                max = max.max(v);
            }
        }
        assert!(min < -3.9 && max > 3.9);
    }
}
