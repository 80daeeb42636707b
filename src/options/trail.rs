use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Translucent fill laid over the whole surface each frame. Low alpha keeps
/// a fading trail of the previous frames.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrailOptions {
    /// Fill color.
    pub color: Color,
    /// Fill alpha, in [0, 1].
    pub alpha: f32,
}

impl Default for TrailOptions {
    fn default() -> Self {
        Self {
            color: Color::new(5, 5, 5),
            alpha: 0.1,
        }
    }
}
