//! Video metadata types.
//!
//! [`VideoMetadata`] is captured once when a [`VideoFile`](crate::VideoFile)
//! is opened and cached for the lifetime of the handle.

use std::time::Duration;

/// Metadata for the selected video stream of an opened file.
///
/// # Example
///
/// ```no_run
/// use framesample::VideoFile;
///
/// let video = VideoFile::open("input.mp4").unwrap();
/// let metadata = video.metadata();
/// println!("{}x{} @ {:.2} fps", metadata.width, metadata.height, metadata.frames_per_second);
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct VideoMetadata {
    /// Source frame width in pixels.
    pub width: u32,
    /// Source frame height in pixels.
    pub height: u32,
    /// Frames per second (may be approximate for variable-frame-rate content).
    pub frames_per_second: f64,
    /// Total number of frames.
    ///
    /// Taken from the stream header when the container records it, otherwise
    /// estimated from duration and frame rate. Zero when neither is known.
    pub frame_count: u64,
    /// Total duration of the container.
    pub duration: Duration,
    /// Codec name (e.g. `"h264"`, `"vp9"`, `"av1"`).
    pub codec: String,
    /// Container format name (e.g. `"mov,mp4,m4a,3gp,3g2,mj2"`).
    pub format: String,
}
