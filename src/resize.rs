//! Height-threshold resizing.
//!
//! Frames destined for training pipelines are usually normalised to a
//! maximum height. [`compute_scale`] gives the uniform factor that brings a
//! height down to a threshold; [`resize_by_scale`] and
//! [`resize_to_threshold`] apply it to both dimensions.

use image::imageops::FilterType;

use crate::source::Frame;

/// Height threshold used when none is configured.
pub const DEFAULT_HEIGHT_THRESHOLD: u32 = 216;

/// Scale factor that shrinks `height` down to `threshold`.
///
/// Returns `threshold / height` when `height` exceeds the threshold and
/// `1.0` otherwise, so images are never enlarged. A zero height yields
/// `1.0`, and so does a zero threshold, which means "no limit". The result
/// always lies in `(0, 1]`.
///
/// # Example
///
/// ```
/// use framesample::compute_scale;
///
/// assert_eq!(compute_scale(300, 216), 0.72);
/// assert_eq!(compute_scale(100, 216), 1.0);
/// assert_eq!(compute_scale(216, 216), 1.0);
/// ```
pub fn compute_scale(height: u32, threshold: u32) -> f64 {
    if threshold > 0 && height > threshold {
        f64::from(threshold) / f64::from(height)
    } else {
        1.0
    }
}

/// Resize `frame` by multiplying both dimensions by `scale`.
///
/// New dimensions are truncated and never drop below one pixel. A scale of
/// exactly `1.0` returns a copy of the input.
pub fn resize_by_scale(frame: &Frame, scale: f64) -> Frame {
    if scale == 1.0 {
        return frame.clone();
    }

    let width = ((f64::from(frame.width()) * scale) as u32).max(1);
    let height = ((f64::from(frame.height()) * scale) as u32).max(1);
    frame.resize_exact(width, height, FilterType::Triangle)
}

/// Shrink `frame` so its height does not exceed `threshold`, preserving
/// aspect ratio.
///
/// # Example
///
/// ```
/// use framesample::{DEFAULT_HEIGHT_THRESHOLD, resize_to_threshold};
/// use image::{DynamicImage, RgbImage};
///
/// let frame = DynamicImage::ImageRgb8(RgbImage::new(1920, 1080));
/// let resized = resize_to_threshold(&frame, DEFAULT_HEIGHT_THRESHOLD);
/// assert_eq!((resized.width(), resized.height()), (384, 216));
/// ```
pub fn resize_to_threshold(frame: &Frame, threshold: u32) -> Frame {
    resize_by_scale(frame, compute_scale(frame.height(), threshold))
}
