use image::Rgba;

use crate::bitmap::Bitmap;
use crate::error::EnhanceError;
use crate::tiling::PixelStage;

/// BT.709 luma coefficients (fixed, not configurable).
const LUMA_R: f32 = 0.2126;
const LUMA_G: f32 = 0.7152;
const LUMA_B: f32 = 0.0722;

/// Perceptual brightness of a pixel.
pub fn luma(pixel: &Rgba<f32>) -> f32 {
    let [r, g, b, _] = pixel.0;
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}

/// Smoothstep edges for a luminance threshold pass.
///
/// Both edges sit in [0, 1] with `low_edge < high_edge`; degenerate edges
/// would turn the smoothstep into a division by zero, so the constructor
/// rejects them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdParams {
    low_edge: f32,
    high_edge: f32,
}

impl ThresholdParams {
    pub fn new(low_edge: f32, high_edge: f32) -> Result<Self, EnhanceError> {
        if !(low_edge < high_edge) {
            return Err(EnhanceError::InvalidThresholdEdges {
                low: low_edge,
                high: high_edge,
            });
        }
        Ok(Self {
            low_edge,
            high_edge,
        })
    }
}

/// Cubic Hermite 0-to-1 transition between two edges.
fn smoothstep(low: f32, high: f32, v: f32) -> f32 {
    let t = ((v - low) / (high - low)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Adaptive luminance threshold: luma below the low edge maps to black,
/// above the high edge to white, with a smoothstep ramp in between. Output
/// is fully desaturated at full opacity.
pub struct Threshold {
    params: ThresholdParams,
}

impl Threshold {
    pub fn new(params: ThresholdParams) -> Self {
        Self { params }
    }
}

impl PixelStage for Threshold {
    fn name(&self) -> &'static str {
        "threshold"
    }

    fn eval(&self, src: &Bitmap, x: u32, y: u32) -> Rgba<f32> {
        let l = luma(src.get_pixel(x, y));
        let r = smoothstep(self.params.low_edge, self.params.high_edge, l);
        Rgba([r, r, r, 1.0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn threshold_pixel(pixel: [f32; 4], low: f32, high: f32) -> [f32; 4] {
        let src = Bitmap::from_pixel(1, 1, Rgba(pixel));
        let stage = Threshold::new(ThresholdParams::new(low, high).unwrap());
        stage.eval(&src, 0, 0).0
    }

    #[test]
    fn test_luma_below_low_edge_is_exact_black() {
        let out = threshold_pixel([0.1, 0.1, 0.1, 1.0], 0.25, 0.75);
        assert_eq!(out, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_luma_above_high_edge_is_exact_white() {
        let out = threshold_pixel([0.9, 0.9, 0.9, 1.0], 0.25, 0.75);
        assert_eq!(out, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_mid_gray_maps_through_smoothstep() {
        // luma 0.5 with edges (0.25, 0.75): t = 0.5, result = 0.5
        let out = threshold_pixel([0.5, 0.5, 0.5, 1.0], 0.25, 0.75);
        assert!((out[0] - 0.5).abs() < 1e-5, "got {}", out[0]);
        assert_eq!(out[3], 1.0);
    }

    #[test]
    fn test_smoothstep_is_monotonic_between_edges() {
        let mut prev = 0.0f32;
        for i in 0..=20 {
            let l = 0.25 + 0.5 * (i as f32 / 20.0);
            let out = threshold_pixel([l, l, l, 1.0], 0.25, 0.75);
            assert!(out[0] >= prev, "not monotonic at luma {l}");
            prev = out[0];
        }
    }

    #[test]
    fn test_colored_input_is_desaturated() {
        let out = threshold_pixel([1.0, 0.0, 0.0, 1.0], 0.1, 0.3);
        assert_eq!(out[0], out[1]);
        assert_eq!(out[1], out[2]);
        assert_eq!(out[3], 1.0);
    }

    #[test]
    fn test_degenerate_edges_rejected() {
        assert!(matches!(
            ThresholdParams::new(0.75, 0.25),
            Err(EnhanceError::InvalidThresholdEdges { .. })
        ));
        assert!(matches!(
            ThresholdParams::new(0.5, 0.5),
            Err(EnhanceError::InvalidThresholdEdges { .. })
        ));
    }
}
