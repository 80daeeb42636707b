use std::ops::Range;

use super::RenderSurface;
use crate::color::Color;

/// Software RGBA8 raster implementing [`RenderSurface`].
///
/// Pixels are stored row-major, top-left origin, straight (not
/// premultiplied) alpha. Fills cover the pixels whose centres fall inside
/// the shape and composite source-over, which is what a 2D canvas does
/// with anti-aliasing off.
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
    global_alpha: f32,
    fill_color: Color,
    fill_alpha: f32,
}

impl PixelCanvas {
    /// A transparent black canvas of the given size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 4]; width as usize * height as usize],
            global_alpha: 1.0,
            fill_color: Color::new(0, 0, 0),
            fill_alpha: 1.0,
        }
    }

    /// Reallocate to a new size. Like assigning `canvas.width`, this clears
    /// the pixels and resets the drawing state.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    /// The RGBA value at `(x, y)`, or `None` outside the canvas.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Raw RGBA8 bytes, suitable for a texture upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    fn effective_alpha(&self) -> f32 {
        (self.global_alpha * self.fill_alpha).clamp(0.0, 1.0)
    }

    fn blend(&mut self, x: u32, y: u32, alpha: f32) {
        let idx = y as usize * self.width as usize + x as usize;
        let Some(dst) = self.pixels.get_mut(idx) else {
            return;
        };
        let src = [self.fill_color.r, self.fill_color.g, self.fill_color.b];
        let dst_alpha = f32::from(dst[3]) / 255.0;
        let out_alpha = alpha + dst_alpha * (1.0 - alpha);
        if out_alpha <= 0.0 {
            *dst = [0; 4];
            return;
        }
        for (channel, s) in dst.iter_mut().zip(src) {
            let mixed = (f32::from(s) * alpha
                + f32::from(*channel) * dst_alpha * (1.0 - alpha))
                / out_alpha;
            *channel = to_u8(mixed);
        }
        dst[3] = to_u8(out_alpha * 255.0);
    }
}

fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Pixel indices whose centres lie in `[start, start + len)`, clipped to
/// `[0, limit)`.
fn span(start: f32, len: f32, limit: u32) -> Range<u32> {
    let max = limit as f32;
    let lo = (start - 0.5).ceil().clamp(0.0, max) as u32;
    let hi = (start + len - 0.5).ceil().clamp(0.0, max) as u32;
    lo..hi
}

impl RenderSurface for PixelCanvas {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.global_alpha = alpha;
    }

    fn set_fill_style(&mut self, color: Color, alpha: f32) {
        self.fill_color = color;
        self.fill_alpha = alpha;
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let alpha = self.effective_alpha();
        if alpha <= 0.0 {
            return;
        }
        for py in span(y, height, self.height) {
            for px in span(x, width, self.width) {
                self.blend(px, py, alpha);
            }
        }
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32) {
        let alpha = self.effective_alpha();
        if alpha <= 0.0 || radius <= 0.0 {
            return;
        }
        let r2 = radius * radius;
        for py in span(y - radius, 2.0 * radius, self.height) {
            let dy = py as f32 + 0.5 - y;
            for px in span(x - radius, 2.0 * radius, self.width) {
                let dx = px as f32 + 0.5 - x;
                if dx * dx + dy * dy <= r2 {
                    self.blend(px, py, alpha);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::new(255, 0, 0);

    #[test]
    fn opaque_rect_overwrites_pixels() {
        let mut canvas = PixelCanvas::new(4, 4);
        canvas.set_fill_style(RED, 1.0);
        canvas.fill_rect(1.0, 1.0, 2.0, 2.0);
        assert_eq!(canvas.pixel(1, 1), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(2, 2), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(canvas.pixel(3, 3), Some([0, 0, 0, 0]));
    }

    #[test]
    fn fills_are_clipped_to_bounds() {
        let mut canvas = PixelCanvas::new(3, 3);
        canvas.set_fill_style(RED, 1.0);
        canvas.fill_rect(-10.0, -10.0, 100.0, 100.0);
        canvas.fill_circle(-50.0, 500.0, 2.0);
        assert!((0..3).all(|y| (0..3)
            .all(|x| canvas.pixel(x, y) == Some([255, 0, 0, 255]))));
        assert_eq!(canvas.pixel(3, 0), None);
    }

    #[test]
    fn circle_covers_centre_but_not_bounding_corners() {
        let mut canvas = PixelCanvas::new(20, 20);
        canvas.set_fill_style(RED, 1.0);
        canvas.fill_circle(10.0, 10.0, 2.0);
        assert_eq!(canvas.pixel(9, 9), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(10, 10), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(8, 9), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(8, 8), Some([0, 0, 0, 0]));
        assert_eq!(canvas.pixel(12, 12), Some([0, 0, 0, 0]));
    }

    #[test]
    fn global_alpha_scales_the_fill() {
        let mut canvas = PixelCanvas::new(1, 1);
        canvas.set_fill_style(Color::new(0, 0, 0), 1.0);
        canvas.fill_rect(0.0, 0.0, 1.0, 1.0);
        canvas.set_fill_style(Color::new(200, 100, 0), 1.0);
        canvas.set_global_alpha(0.5);
        canvas.fill_rect(0.0, 0.0, 1.0, 1.0);
        assert_eq!(canvas.pixel(0, 0), Some([100, 50, 0, 255]));
    }

    #[test]
    fn zero_alpha_is_a_no_op() {
        let mut canvas = PixelCanvas::new(2, 2);
        canvas.set_global_alpha(0.0);
        canvas.set_fill_style(RED, 1.0);
        canvas.fill_rect(0.0, 0.0, 2.0, 2.0);
        assert_eq!(canvas.as_bytes(), &[0u8; 16][..]);
    }

    #[test]
    fn repeated_trail_fill_darkens_towards_fill_color() {
        let mut canvas = PixelCanvas::new(1, 1);
        canvas.set_fill_style(Color::new(255, 255, 255), 1.0);
        canvas.fill_rect(0.0, 0.0, 1.0, 1.0);
        canvas.set_fill_style(Color::new(5, 5, 5), 0.1);
        let mut previous = 255;
        for _ in 0..20 {
            canvas.fill_rect(0.0, 0.0, 1.0, 1.0);
            let now = canvas.pixel(0, 0).unwrap()[0];
            assert!(now < previous);
            previous = now;
        }
    }

    #[test]
    fn resize_clears_and_resets_state() {
        let mut canvas = PixelCanvas::new(2, 2);
        canvas.set_global_alpha(0.0);
        canvas.resize(3, 1);
        assert_eq!(canvas.dimensions(), (3, 1));
        assert_eq!(canvas.as_bytes().len(), 12);
        canvas.set_fill_style(RED, 1.0);
        canvas.fill_rect(0.0, 0.0, 3.0, 1.0);
        assert_eq!(canvas.pixel(2, 0), Some([255, 0, 0, 255]));
    }
}
