//! The video-decoding seam.
//!
//! [`VideoSource`] is the contract the frame selector and manual scanner
//! consume. [`VideoFile`](crate::VideoFile) implements it on top of FFmpeg;
//! tests and alternative backends can provide their own implementation.

use image::DynamicImage;

use crate::error::SamplingError;

/// A single decoded raster image from a video stream.
pub type Frame = DynamicImage;

/// An open, sequentially readable and seekable video.
///
/// Handles are not thread-safe in the sense that matters here: selection
/// calls borrow a source mutably and leave its read position wherever the
/// last read ended. Callers own the source and are responsible for opening
/// and dropping it.
pub trait VideoSource {
    /// Decode the next frame from the current read position.
    ///
    /// Returns `Ok(None)` once the stream is exhausted. An `Err` reports a
    /// failure to produce this particular frame; the source may still be
    /// readable afterwards.
    fn read_frame(&mut self) -> Result<Option<Frame>, SamplingError>;

    /// The total number of frames as reported by the container.
    ///
    /// This is best-effort metadata and may be zero or inaccurate for some
    /// files and platforms. [`ScanStrategy::FullScan`](crate::ScanStrategy)
    /// exists for sources where this value cannot be trusted.
    fn frame_count(&self) -> u64;

    /// Position the source so the next [`read_frame`](VideoSource::read_frame)
    /// returns the frame at absolute index `frame_index` (0-based).
    fn seek_frame(&mut self, frame_index: u64) -> Result<(), SamplingError>;
}

impl<S: VideoSource + ?Sized> VideoSource for &mut S {
    fn read_frame(&mut self) -> Result<Option<Frame>, SamplingError> {
        (**self).read_frame()
    }

    fn frame_count(&self) -> u64 {
        (**self).frame_count()
    }

    fn seek_frame(&mut self, frame_index: u64) -> Result<(), SamplingError> {
        (**self).seek_frame(frame_index)
    }
}

impl<S: VideoSource + ?Sized> VideoSource for Box<S> {
    fn read_frame(&mut self) -> Result<Option<Frame>, SamplingError> {
        (**self).read_frame()
    }

    fn frame_count(&self) -> u64 {
        (**self).frame_count()
    }

    fn seek_frame(&mut self, frame_index: u64) -> Result<(), SamplingError> {
        (**self).seek_frame(frame_index)
    }
}
