use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Default burst colors: cyan, violet, red, yellow.
pub const DEFAULT_PALETTE: [Color; 4] = [
    Color::new(0x00, 0xf3, 0xff),
    Color::new(0xbc, 0x13, 0xfe),
    Color::new(0xff, 0x00, 0x43),
    Color::new(0xff, 0xe2, 0x00),
];

/// Burst ignition parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BurstOptions {
    /// Chance that a burst ignites on any given frame, in [0, 1].
    pub spawn_probability: f64,
    /// Particles created per burst.
    pub particle_count: usize,
    /// Colors a burst picks from uniformly.
    pub palette: Vec<Color>,
}

impl Default for BurstOptions {
    fn default() -> Self {
        Self {
            spawn_probability: 0.03,
            particle_count: 30,
            palette: DEFAULT_PALETTE.to_vec(),
        }
    }
}
