use image::Rgba;

use crate::bitmap::Bitmap;
use crate::tiling::PixelStage;

/// Per-channel median blur over a square neighborhood, smoothing the
/// dilated background estimate without blurring across edges. The f32
/// channels are ordered with `total_cmp`.
pub struct MedianBlur {
    radius: u32,
}

impl MedianBlur {
    /// `radius` 1 gives the standard 3x3 window.
    pub fn new(radius: u32) -> Self {
        Self { radius }
    }
}

impl PixelStage for MedianBlur {
    fn name(&self) -> &'static str {
        "median"
    }

    fn margin(&self) -> u32 {
        self.radius
    }

    fn eval(&self, src: &Bitmap, x: u32, y: u32) -> Rgba<f32> {
        let (width, height) = src.dimensions();
        let side = 2 * self.radius + 1;
        let mut window: [Vec<f32>; 4] = std::array::from_fn(|_| {
            Vec::with_capacity((side * side) as usize)
        });

        // Border pixels are replicated by clamping the neighborhood, so the
        // window always holds side*side samples.
        for dy in 0..side {
            for dx in 0..side {
                let nx = (x + dx).saturating_sub(self.radius).min(width - 1);
                let ny = (y + dy).saturating_sub(self.radius).min(height - 1);
                let px = src.get_pixel(nx, ny).0;
                for c in 0..4 {
                    window[c].push(px[c]);
                }
            }
        }

        let mut out = [0.0f32; 4];
        for c in 0..4 {
            window[c].sort_unstable_by(f32::total_cmp);
            out[c] = window[c][window[c].len() / 2];
        }
        Rgba(out)
    }
}
