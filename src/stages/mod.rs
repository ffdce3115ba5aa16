//! Individual enhancement stages

pub mod color_controls;
pub mod diff;
pub mod dilate;
pub mod median;
pub mod threshold;

pub use color_controls::ColorControls;
pub use diff::inverted_abs_diff;
pub use dilate::Dilate;
pub use median::MedianBlur;
pub use threshold::{Threshold, ThresholdParams};
