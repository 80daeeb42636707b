//! The 2D drawing surface the animation engine paints into.
//!
//! The engine only ever needs five primitives, captured by
//! [`RenderSurface`]. [`PixelCanvas`] is a software implementation backing
//! the native viewer and the tests; the `web` feature provides one over an
//! HTML canvas context.

mod canvas;
#[cfg(test)]
pub(crate) mod recording;

pub use canvas::PixelCanvas;

use crate::color::Color;

/// A 2D drawable area with the subset of canvas operations the fireworks
/// loop uses.
///
/// State follows the HTML canvas model: the fill style and global alpha
/// persist until changed, and every fill composites source-over using
/// `global_alpha * fill_alpha`.
pub trait RenderSurface {
    /// Current size in pixels as `(width, height)`.
    fn dimensions(&self) -> (u32, u32);

    /// Set the alpha multiplier applied to every subsequent fill.
    fn set_global_alpha(&mut self, alpha: f32);

    /// Set the color and alpha used by subsequent fills.
    fn set_fill_style(&mut self, color: Color, alpha: f32);

    /// Fill an axis-aligned rectangle with the current fill style.
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Fill a circle centred at `(x, y)` with the current fill style.
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32);
}
