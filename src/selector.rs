//! Frame selection.
//!
//! This module turns a sampling directive into an ordered list of decoded
//! frames. Two directives exist:
//!
//! - **rate**: keep every `n`-th frame of the video ([`select_by_rate`]);
//! - **count**: keep exactly `n` frames spread uniformly over the video
//!   ([`select_by_count`], positions from [`index_schedule`]).
//!
//! Both can obtain the total frame count in two ways, chosen by
//! [`ScanStrategy`]: trust the container metadata and seek, or decode the
//! whole video into memory first.
//!
//! Selected slots are `Option<Frame>`. A `None` slot marks a read that failed
//! or ran past the end of the stream; the slot is kept so that output length
//! and positions stay stable.
//!
//! # Example
//!
//! ```no_run
//! use framesample::{ScanStrategy, VideoFile};
//!
//! let mut video = VideoFile::open("input.mp4")?;
//! let frames = framesample::select_by_count(&mut video, 10, ScanStrategy::Metadata)?;
//! assert_eq!(frames.len(), 10);
//! # Ok::<(), framesample::SamplingError>(())
//! ```

use crate::error::SamplingError;
use crate::progress::{OperationType, ProgressSink};
use crate::scanner::scan_with_progress;
use crate::source::{Frame, VideoSource};

/// How a selection obtains the total frame count and reaches frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanStrategy {
    /// Use the container's frame count and seek to individual frames.
    #[default]
    Metadata,
    /// Decode every frame into memory and index into the result.
    ///
    /// Slower and memory hungry, but independent of frame-count metadata
    /// and seek accuracy.
    FullScan,
}

impl From<bool> for ScanStrategy {
    /// `true` selects [`ScanStrategy::FullScan`].
    fn from(full_scan: bool) -> Self {
        if full_scan {
            ScanStrategy::FullScan
        } else {
            ScanStrategy::Metadata
        }
    }
}

/// A rule describing which frames to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum SamplingDirective {
    /// Keep frames whose position is divisible by the given divisor.
    Rate(u64),
    /// Keep this many frames, spread uniformly across the video.
    ///
    /// Signed so that a negative request coming from a caller can be
    /// rejected rather than wrapped.
    Count(i64),
}

impl SamplingDirective {
    /// Apply the directive to `source`.
    ///
    /// # Errors
    ///
    /// See [`select_by_rate`] and [`select_by_count`].
    pub fn select<S: VideoSource + ?Sized>(
        self,
        source: &mut S,
        strategy: ScanStrategy,
    ) -> Result<Vec<Option<Frame>>, SamplingError> {
        self.select_with_progress(source, strategy, &ProgressSink::none())
    }

    pub(crate) fn select_with_progress<S: VideoSource + ?Sized>(
        self,
        source: &mut S,
        strategy: ScanStrategy,
        progress: &ProgressSink,
    ) -> Result<Vec<Option<Frame>>, SamplingError> {
        match self {
            SamplingDirective::Rate(frames_per_second) => {
                rate_selection(source, frames_per_second, strategy, progress)
            }
            SamplingDirective::Count(requested_count) => {
                count_selection(source, requested_count, strategy, progress)
            }
        }
    }
}

/// Compute the frame positions for a count directive.
///
/// Entry `i` is `floor(i * total_frames / requested_count)` for `i` in
/// `0..requested_count`. The schedule is non-decreasing and always has
/// `requested_count` entries; when `requested_count > total_frames` some
/// positions repeat. A zero `requested_count` yields an empty schedule.
///
/// # Example
///
/// ```
/// assert_eq!(framesample::index_schedule(30, 5), vec![0, 6, 12, 18, 24]);
/// assert_eq!(framesample::index_schedule(3, 5), vec![0, 0, 1, 1, 2]);
/// assert!(framesample::index_schedule(30, 0).is_empty());
/// ```
pub fn index_schedule(total_frames: u64, requested_count: u64) -> Vec<u64> {
    if requested_count == 0 {
        return Vec::new();
    }

    let total = u128::from(total_frames);
    let requested = u128::from(requested_count);
    (0..requested)
        .map(|position| (position * total / requested) as u64)
        .collect()
}

/// Keep every `frames_per_second`-th frame of `source`.
///
/// With [`ScanStrategy::Metadata`] the source's reported frame count bounds
/// a sequential read from its current position; with
/// [`ScanStrategy::FullScan`] the whole remaining stream is decoded first.
/// In both cases a frame is kept when its 0-based read position is divisible
/// by `frames_per_second`. The source's read position is advanced.
///
/// The metadata read stops early when the stream ends before the reported
/// count, so an overstated count yields only the frames that exist.
///
/// # Errors
///
/// Returns [`SamplingError::InvalidArgument`] if `frames_per_second` is zero.
/// Individual read failures do not fail the call; they produce `None` slots.
pub fn select_by_rate<S: VideoSource + ?Sized>(
    source: &mut S,
    frames_per_second: u64,
    strategy: ScanStrategy,
) -> Result<Vec<Option<Frame>>, SamplingError> {
    rate_selection(source, frames_per_second, strategy, &ProgressSink::none())
}

/// Keep `requested_count` frames spread uniformly over `source`.
///
/// The positions come from [`index_schedule`]. With
/// [`ScanStrategy::Metadata`] each position is reached by seeking and reading
/// one frame; with [`ScanStrategy::FullScan`] the whole video is decoded and
/// positions index into the decoded list. Duplicate positions produce
/// duplicate frames.
///
/// # Errors
///
/// Returns [`SamplingError::InvalidArgument`] if `requested_count` is
/// negative, before the source is touched. Individual read or seek failures
/// do not fail the call; they produce `None` slots.
pub fn select_by_count<S: VideoSource + ?Sized>(
    source: &mut S,
    requested_count: i64,
    strategy: ScanStrategy,
) -> Result<Vec<Option<Frame>>, SamplingError> {
    count_selection(source, requested_count, strategy, &ProgressSink::none())
}

fn rate_selection<S: VideoSource + ?Sized>(
    source: &mut S,
    frames_per_second: u64,
    strategy: ScanStrategy,
    progress: &ProgressSink,
) -> Result<Vec<Option<Frame>>, SamplingError> {
    if frames_per_second == 0 {
        return Err(SamplingError::InvalidArgument(
            "frames per second must be greater than zero".to_string(),
        ));
    }

    log::debug!("Selecting every {frames_per_second}th frame ({strategy:?})");

    match strategy {
        ScanStrategy::FullScan => {
            let (frames, _) = scan_with_progress(source, progress);
            Ok(frames
                .into_iter()
                .enumerate()
                .filter(|(position, _)| *position as u64 % frames_per_second == 0)
                .map(|(_, frame)| Some(frame))
                .collect())
        }
        ScanStrategy::Metadata => {
            let total_frames = source.frame_count();
            let mut tracker = progress.tracker(OperationType::FrameSelection, Some(total_frames));
            // Grows with frames actually read, never with the reported count.
            let mut kept = Vec::new();

            for position in 0..total_frames {
                let keep = position % frames_per_second == 0;

                match source.read_frame() {
                    Ok(Some(frame)) => {
                        if keep {
                            kept.push(Some(frame));
                        }
                    }
                    Ok(None) => {
                        log::warn!(
                            "Stream ended at frame {position} of a reported {total_frames}"
                        );
                        break;
                    }
                    Err(error) => {
                        if keep {
                            log::warn!("Frame {position} could not be read: {error}");
                            kept.push(None);
                        }
                    }
                }
                tracker.advance(Some(position));
            }

            tracker.finish();
            Ok(kept)
        }
    }
}

fn count_selection<S: VideoSource + ?Sized>(
    source: &mut S,
    requested_count: i64,
    strategy: ScanStrategy,
    progress: &ProgressSink,
) -> Result<Vec<Option<Frame>>, SamplingError> {
    let requested_count = u64::try_from(requested_count).map_err(|_| {
        SamplingError::InvalidArgument(format!(
            "requested frame count must not be negative (got {requested_count})"
        ))
    })?;

    if requested_count == 0 {
        return Ok(Vec::new());
    }

    log::debug!("Selecting {requested_count} evenly spaced frames ({strategy:?})");

    match strategy {
        ScanStrategy::FullScan => {
            let (frames, total_frames) = scan_with_progress(source, progress);
            let schedule = index_schedule(total_frames, requested_count);
            Ok(pick_scheduled(frames, &schedule))
        }
        ScanStrategy::Metadata => {
            let total_frames = source.frame_count();
            let schedule = index_schedule(total_frames, requested_count);
            let mut tracker =
                progress.tracker(OperationType::FrameSelection, Some(requested_count));
            let mut selected = Vec::with_capacity(schedule.len());

            for &frame_index in &schedule {
                selected.push(seek_and_read(source, frame_index));
                tracker.advance(Some(frame_index));
            }

            tracker.finish();
            Ok(selected)
        }
    }
}

/// Seek to `frame_index` and read one frame, or `None` on any failure.
fn seek_and_read<S: VideoSource + ?Sized>(source: &mut S, frame_index: u64) -> Option<Frame> {
    if let Err(error) = source.seek_frame(frame_index) {
        log::warn!("Seek to frame {frame_index} failed: {error}");
        return None;
    }

    match source.read_frame() {
        Ok(Some(frame)) => Some(frame),
        Ok(None) => {
            log::warn!("Stream ended before frame {frame_index}");
            None
        }
        Err(error) => {
            log::warn!("Frame {frame_index} could not be read: {error}");
            None
        }
    }
}

/// Take the scheduled positions out of a fully decoded frame list.
///
/// Frames are moved out when a position is used for the last time and cloned
/// while the schedule still repeats it. Positions past the end of the list
/// yield `None`.
fn pick_scheduled(frames: Vec<Frame>, schedule: &[u64]) -> Vec<Option<Frame>> {
    let mut slots: Vec<Option<Frame>> = frames.into_iter().map(Some).collect();
    let mut picked = Vec::with_capacity(schedule.len());

    for (position, &frame_index) in schedule.iter().enumerate() {
        let repeats = schedule.get(position + 1) == Some(&frame_index);
        let slot = usize::try_from(frame_index)
            .ok()
            .and_then(|index| slots.get_mut(index));

        let frame = match slot {
            Some(slot) if repeats => slot.clone(),
            Some(slot) => slot.take(),
            None => None,
        };
        if frame.is_none() {
            log::warn!("Frame {frame_index} is not in the scanned video");
        }
        picked.push(frame);
    }

    picked
}
