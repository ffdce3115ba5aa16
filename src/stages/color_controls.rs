use image::Rgba;

use crate::bitmap::Bitmap;
use crate::stages::threshold::luma;
use crate::tiling::PixelStage;

/// Saturation/brightness/contrast pass in the manner of a color-controls
/// filter: chroma is blended toward luma by `saturation`, then each channel
/// goes through `(v - 0.5) * contrast + 0.5 + brightness`. Alpha is left
/// alone.
pub struct ColorControls {
    saturation: f32,
    brightness: f32,
    contrast: f32,
}

impl ColorControls {
    pub fn new(saturation: f32, brightness: f32, contrast: f32) -> Self {
        Self {
            saturation,
            brightness,
            contrast,
        }
    }

    /// Full desaturation with neutral brightness and contrast. The pipeline
    /// always runs this as its final stage even though the threshold has
    /// already zeroed chroma.
    pub fn grayscale() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}

impl PixelStage for ColorControls {
    fn name(&self) -> &'static str {
        "color_controls"
    }

    fn eval(&self, src: &Bitmap, x: u32, y: u32) -> Rgba<f32> {
        let px = src.get_pixel(x, y);
        let l = luma(px);

        let mut out = px.0;
        for c in 0..3 {
            let v = l + (out[c] - l) * self.saturation;
            out[c] = (v - 0.5) * self.contrast + 0.5 + self.brightness;
        }
        Rgba(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiling;

    #[test]
    fn test_grayscale_zeroes_chroma() {
        let src = Bitmap::from_pixel(3, 3, Rgba([0.8, 0.2, 0.4, 1.0]));
        let out = ColorControls::grayscale().eval(&src, 1, 1).0;

        assert_eq!(out[0], out[1]);
        assert_eq!(out[1], out[2]);
        assert_eq!(out[3], 1.0);
    }

    #[test]
    fn test_full_desaturation_is_idempotent() {
        let src = Bitmap::from_fn(6, 6, |x, y| {
            Rgba([x as f32 / 5.0, y as f32 / 5.0, 0.3, 1.0])
        });
        let stage = ColorControls::grayscale();

        let once = tiling::run_stage(&stage, &src).unwrap();
        let twice = tiling::run_stage(&stage, &once).unwrap();

        for (a, b) in once.pixels().zip(twice.pixels()) {
            for c in 0..4 {
                assert!((a.0[c] - b.0[c]).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_neutral_settings_are_identity() {
        let src = Bitmap::from_pixel(2, 2, Rgba([0.3, 0.6, 0.9, 1.0]));
        let out = ColorControls::new(1.0, 0.0, 1.0).eval(&src, 0, 0).0;

        for c in 0..4 {
            assert!((out[c] - src.get_pixel(0, 0).0[c]).abs() < 1e-6);
        }
    }
}
