use crate::bitmap::Bitmap;
use crate::error::EnhanceError;

/// Inverted absolute difference: `out = (1,1,1,1) - |original - background|`
/// per channel. Ink strokes deviate from the estimated background and come
/// out dark; paper texture washes toward white.
///
/// Alpha takes part in the arithmetic like every other channel, matching
/// the source kernel. Inputs are opaque, and the threshold pass that
/// follows restores full opacity either way.
pub fn inverted_abs_diff(original: &Bitmap, background: &Bitmap) -> Result<Bitmap, EnhanceError> {
    if original.dimensions() != background.dimensions() {
        return Err(EnhanceError::Render(
            "original and background extents differ".to_string(),
        ));
    }

    let data: Vec<f32> = original
        .as_raw()
        .iter()
        .zip(background.as_raw())
        .map(|(a, b)| 1.0 - (a - b).abs())
        .collect();

    Bitmap::from_raw(original.width(), original.height(), data).ok_or_else(|| {
        EnhanceError::Render("difference buffer does not match input extent".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_identical_inputs_give_pure_white() {
        let img = Bitmap::from_fn(8, 8, |x, y| {
            let v = (x + y) as f32 / 16.0;
            Rgba([v, v * 0.5, 1.0 - v, 1.0])
        });

        let out = inverted_abs_diff(&img, &img).unwrap();
        for px in out.pixels() {
            assert_eq!(px.0, [1.0, 1.0, 1.0, 1.0]);
        }
    }

    #[test]
    fn test_deviation_from_background_comes_out_dark() {
        let background = Bitmap::from_pixel(4, 4, Rgba([0.9, 0.9, 0.9, 1.0]));
        let mut original = background.clone();
        // An ink stroke well below the paper level
        original.put_pixel(2, 2, Rgba([0.1, 0.1, 0.1, 1.0]));

        let out = inverted_abs_diff(&original, &background).unwrap();

        let ink = out.get_pixel(2, 2).0;
        assert!((ink[0] - 0.2).abs() < 1e-6, "got {}", ink[0]);
        // Untouched paper stays white
        assert_eq!(out.get_pixel(0, 0).0, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_extent_mismatch_is_an_error() {
        let a = Bitmap::from_pixel(4, 4, Rgba([0.5; 4]));
        let b = Bitmap::from_pixel(4, 5, Rgba([0.5; 4]));
        assert!(inverted_abs_diff(&a, &b).is_err());
    }
}
