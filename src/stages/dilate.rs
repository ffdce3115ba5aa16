use image::Rgba;

use crate::bitmap::Bitmap;
use crate::tiling::PixelStage;

/// Grayscale morphological dilation: per-channel maximum over a square
/// neighborhood, so the lightest value wins. Swallows thin dark ink
/// strokes, leaving an estimate of the paper background.
pub struct Dilate {
    radius: u32,
}

impl Dilate {
    /// `radius` is the half-width of the square structuring element.
    pub fn new(radius: u32) -> Self {
        Self { radius }
    }
}

impl PixelStage for Dilate {
    fn name(&self) -> &'static str {
        "dilate"
    }

    fn margin(&self) -> u32 {
        self.radius
    }

    fn eval(&self, src: &Bitmap, x: u32, y: u32) -> Rgba<f32> {
        let (width, height) = src.dimensions();
        let x0 = x.saturating_sub(self.radius);
        let y0 = y.saturating_sub(self.radius);
        let x1 = (x + self.radius).min(width - 1);
        let y1 = (y + self.radius).min(height - 1);

        let mut max = src.get_pixel(x, y).0;
        for ny in y0..=y1 {
            for nx in x0..=x1 {
                let px = src.get_pixel(nx, ny).0;
                for c in 0..4 {
                    max[c] = max[c].max(px[c]);
                }
            }
        }
        Rgba(max)
    }
}
