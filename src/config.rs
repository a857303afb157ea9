//! Sampling configuration.
//!
//! [`SamplerOptions`] is a builder that threads the rate divisor, the frame
//! counting strategy, output settings and progress callbacks through
//! [`FrameSampler`](crate::FrameSampler) without polluting every function
//! signature. [`FrameOutputOptions`] controls how
//! [`VideoFile`](crate::VideoFile) converts decoded frames.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use framesample::{ProgressCallback, ProgressInfo, SamplerOptions, ScanStrategy};
//!
//! struct LogProgress;
//! impl ProgressCallback for LogProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         println!("{:?}: {} done", info.operation, info.current);
//!     }
//! }
//!
//! let options = SamplerOptions::new(6)
//!     .with_scan_strategy(ScanStrategy::FullScan)
//!     .with_height_threshold(216)
//!     .with_progress(Arc::new(LogProgress))
//!     .with_batch_size(10);
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use ffmpeg_next::format::Pixel;

use crate::progress::{NoOpProgress, ProgressCallback, ProgressSink};
use crate::selector::ScanStrategy;

/// Default divisor for rate-based sampling: keep one frame in six.
pub const DEFAULT_FRAMES_PER_SECOND: u64 = 6;

/// Default image extension used when persisting frames.
pub const DEFAULT_IMAGE_EXTENSION: &str = "jpg";

/// Output pixel format for decoded frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelFormat {
    /// 8-bit RGB (24 bpp). This is the default.
    #[default]
    Rgb8,
    /// 8-bit RGBA with alpha pre-set to 255 (32 bpp).
    Rgba8,
    /// 8-bit grayscale (8 bpp).
    Gray8,
}

impl PixelFormat {
    /// Map to the corresponding FFmpeg pixel format constant.
    pub(crate) fn to_ffmpeg_pixel(self) -> Pixel {
        match self {
            PixelFormat::Rgb8 => Pixel::RGB24,
            PixelFormat::Rgba8 => Pixel::RGBA,
            PixelFormat::Gray8 => Pixel::GRAY8,
        }
    }

    /// Bytes per pixel in a tightly-packed buffer of this format.
    pub(crate) fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
            PixelFormat::Gray8 => 1,
        }
    }
}

/// Frame conversion settings for [`VideoFile`](crate::VideoFile).
///
/// When no dimensions are set the source resolution is used. Setting one
/// dimension together with
/// [`maintain_aspect_ratio`](FrameOutputOptions::maintain_aspect_ratio)
/// computes the other dimension automatically.
#[derive(Debug, Clone)]
pub struct FrameOutputOptions {
    /// Output pixel format.
    pub pixel_format: PixelFormat,
    /// Target width. `None` keeps the source width.
    pub width: Option<u32>,
    /// Target height. `None` keeps the source height.
    pub height: Option<u32>,
    /// When `true` and only one dimension is specified, the other is
    /// computed to preserve the source aspect ratio.
    pub maintain_aspect_ratio: bool,
}

impl Default for FrameOutputOptions {
    fn default() -> Self {
        Self {
            pixel_format: PixelFormat::Rgb8,
            width: None,
            height: None,
            maintain_aspect_ratio: true,
        }
    }
}

impl FrameOutputOptions {
    /// Set the output pixel format.
    #[must_use]
    pub fn with_pixel_format(mut self, format: PixelFormat) -> Self {
        self.pixel_format = format;
        self
    }

    /// Set a custom output resolution. `None` keeps the source value.
    #[must_use]
    pub fn with_resolution(mut self, width: Option<u32>, height: Option<u32>) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Control whether aspect ratio is preserved when only one dimension is
    /// given. Defaults to `true`.
    #[must_use]
    pub fn with_maintain_aspect_ratio(mut self, maintain: bool) -> Self {
        self.maintain_aspect_ratio = maintain;
        self
    }

    /// Resolve the final output dimensions given the source size.
    ///
    /// Returns `(width, height)`.
    pub(crate) fn resolve_dimensions(&self, source_width: u32, source_height: u32) -> (u32, u32) {
        match (self.width, self.height) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) if self.maintain_aspect_ratio && source_width > 0 => {
                let ratio = w as f64 / source_width as f64;
                let h = (source_height as f64 * ratio).round() as u32;
                (w, h.max(1))
            }
            (Some(w), None) => (w, source_height),
            (None, Some(h)) if self.maintain_aspect_ratio && source_height > 0 => {
                let ratio = h as f64 / source_height as f64;
                let w = (source_width as f64 * ratio).round() as u32;
                (w.max(1), h)
            }
            (None, Some(h)) => (source_width, h),
            (None, None) => (source_width, source_height),
        }
    }
}

/// Settings for a [`FrameSampler`](crate::FrameSampler).
///
/// A default-constructed value keeps one frame in
/// [`DEFAULT_FRAMES_PER_SECOND`], trusts container metadata, writes `jpg`
/// files without resizing and reports no progress.
#[derive(Clone)]
pub struct SamplerOptions {
    /// Rate divisor used by rate-based selection.
    pub(crate) frames_per_second: u64,
    /// How the total frame count is obtained.
    pub(crate) scan_strategy: ScanStrategy,
    /// Extension (and therefore encoder) for persisted frames.
    pub(crate) image_extension: String,
    /// Shrink frames taller than this before writing.
    pub(crate) height_threshold: Option<u32>,
    /// Progress callback. Defaults to a no-op.
    pub(crate) progress: Arc<dyn ProgressCallback>,
    /// How often to fire the progress callback (every N items).
    pub(crate) batch_size: u64,
}

impl Debug for SamplerOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("SamplerOptions")
            .field("frames_per_second", &self.frames_per_second)
            .field("scan_strategy", &self.scan_strategy)
            .field("image_extension", &self.image_extension)
            .field("height_threshold", &self.height_threshold)
            .field("batch_size", &self.batch_size)
            .finish_non_exhaustive()
    }
}

impl Default for SamplerOptions {
    fn default() -> Self {
        Self::new(DEFAULT_FRAMES_PER_SECOND)
    }
}

impl SamplerOptions {
    /// Create options that keep every `frames_per_second`-th frame in rate
    /// mode.
    ///
    /// A zero divisor is accepted here and rejected when a rate-based
    /// selection runs.
    pub fn new(frames_per_second: u64) -> Self {
        Self {
            frames_per_second,
            scan_strategy: ScanStrategy::Metadata,
            image_extension: DEFAULT_IMAGE_EXTENSION.to_string(),
            height_threshold: None,
            progress: Arc::new(NoOpProgress),
            batch_size: 1,
        }
    }

    /// Choose how the total frame count is determined.
    #[must_use]
    pub fn with_scan_strategy(mut self, strategy: ScanStrategy) -> Self {
        self.scan_strategy = strategy;
        self
    }

    /// Set the image extension for persisted frames (`jpg`, `png`, ...).
    ///
    /// A leading dot is stripped.
    #[must_use]
    pub fn with_image_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.image_extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Shrink frames taller than `threshold` pixels before writing them.
    ///
    /// See [`compute_scale`](crate::compute_scale).
    #[must_use]
    pub fn with_height_threshold(mut self, threshold: u32) -> Self {
        self.height_threshold = Some(threshold);
        self
    }

    /// Attach a progress callback.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Set how often the progress callback fires. Clamped to a minimum of 1.
    #[must_use]
    pub fn with_batch_size(mut self, size: u64) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// The rate divisor used by rate-based selection.
    pub fn frames_per_second(&self) -> u64 {
        self.frames_per_second
    }

    /// The configured frame counting strategy.
    pub fn scan_strategy(&self) -> ScanStrategy {
        self.scan_strategy
    }

    /// The extension used for persisted frames.
    pub fn image_extension(&self) -> &str {
        &self.image_extension
    }

    /// The frame height above which frames are shrunk before writing.
    pub fn height_threshold(&self) -> Option<u32> {
        self.height_threshold
    }

    pub(crate) fn progress_sink(&self) -> ProgressSink {
        ProgressSink::new(self.progress.clone(), self.batch_size)
    }
}
