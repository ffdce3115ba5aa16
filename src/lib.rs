//! Adaptive-threshold document image enhancement
//!
//! Binarizes a photographed document into black/white via a smoothstep
//! luminance threshold, optionally after estimating the paper background
//! with a dilation and median blur and subtracting it out. The caller
//! supplies a decoded bitmap and receives one back; file decoding and
//! display stay outside the crate.

pub mod bitmap;
pub mod error;
pub mod pipeline;
pub mod stages;
pub mod tiling;

pub use bitmap::{Bitmap, Extent};
pub use error::EnhanceError;
pub use pipeline::{EnhanceResult, Mode, Pipeline, StepTiming};
