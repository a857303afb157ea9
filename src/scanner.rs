//! Full sequential decode of a video into memory.
//!
//! Used by [`ScanStrategy::FullScan`](crate::ScanStrategy) when the
//! container's frame-count metadata or seeking cannot be trusted. Every frame
//! is decoded and held at once, so memory grows linearly with video length.

use crate::progress::{OperationType, ProgressSink};
use crate::source::{Frame, VideoSource};

/// Read every remaining frame from `source`'s current position.
///
/// Returns the frames in stream order together with their count. The scan
/// stops at end of stream. A failed read also ends the scan: the frames
/// decoded so far are returned and the failure is logged.
///
/// # Example
///
/// ```no_run
/// use framesample::VideoFile;
///
/// let mut video = VideoFile::open("input.mp4")?;
/// let (frames, count) = framesample::scan_all(&mut video);
/// assert_eq!(frames.len() as u64, count);
/// # Ok::<(), framesample::SamplingError>(())
/// ```
pub fn scan_all<S: VideoSource + ?Sized>(source: &mut S) -> (Vec<Frame>, u64) {
    scan_with_progress(source, &ProgressSink::none())
}

pub(crate) fn scan_with_progress<S: VideoSource + ?Sized>(
    source: &mut S,
    progress: &ProgressSink,
) -> (Vec<Frame>, u64) {
    let mut tracker = progress.tracker(OperationType::FrameScan, None);
    let mut frames = Vec::new();
    let mut total: u64 = 0;

    loop {
        match source.read_frame() {
            Ok(Some(frame)) => {
                frames.push(frame);
                tracker.advance(Some(total));
                total += 1;
            }
            Ok(None) => break,
            Err(error) => {
                log::warn!("Full scan stopped after {total} frames: {error}");
                break;
            }
        }
    }

    tracker.finish();
    log::debug!("Full scan decoded {total} frames");
    (frames, total)
}
