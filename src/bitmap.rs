//! Pixel buffer type and boundary conversions
//!
//! The pipeline operates on RGBA bitmaps with normalized f32 channels in
//! 0.0-1.0. Decoding from files and display stay outside the crate; the
//! conversions here sit at that boundary.

use image::{DynamicImage, Rgba32FImage, RgbaImage};

use crate::error::EnhanceError;

/// RGBA pixel buffer, each channel an f32 in 0.0-1.0.
pub type Bitmap = Rgba32FImage;

/// Rectangular pixel-coordinate bounds of a bitmap region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Extent {
    /// The full extent of a bitmap, origin (0, 0).
    pub fn of(bitmap: &Bitmap) -> Self {
        Self {
            x: 0,
            y: 0,
            width: bitmap.width(),
            height: bitmap.height(),
        }
    }

    /// Grow this extent by `margin` pixels on every side, clamped to
    /// `bounds`. Neighborhood stages use this to request the input region
    /// their output region depends on.
    pub fn inflated(&self, margin: u32, bounds: &Extent) -> Self {
        let x = self.x.saturating_sub(margin).max(bounds.x);
        let y = self.y.saturating_sub(margin).max(bounds.y);
        let right = (self.x + self.width + margin).min(bounds.x + bounds.width);
        let bottom = (self.y + self.height + margin).min(bounds.y + bounds.height);
        Self {
            x,
            y,
            width: right - x,
            height: bottom - y,
        }
    }
}

/// Convert a decoded image into the pipeline's pixel representation.
pub fn from_dynamic(image: &DynamicImage) -> Result<Bitmap, EnhanceError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(EnhanceError::Decode("image has zero extent".to_string()));
    }
    Ok(image.to_rgba32f())
}

/// Materialize a pipeline bitmap as an 8-bit RGBA image, clamping each
/// channel into 0.0-1.0.
pub fn to_rgba8(bitmap: &Bitmap) -> Result<RgbaImage, EnhanceError> {
    let data: Vec<u8> = bitmap
        .as_raw()
        .iter()
        .map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
        .collect();

    RgbaImage::from_raw(bitmap.width(), bitmap.height(), data).ok_or_else(|| {
        EnhanceError::Render("pixel buffer does not match output extent".to_string())
    })
}
