//! Progress reporting.
//!
//! This module provides [`ProgressCallback`] for monitoring long-running
//! scans and writes, and [`ProgressInfo`] for progress snapshots. Callbacks
//! observe work but cannot halt it; sampling has no cancellation mechanism.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use framesample::{FrameSampler, ProgressCallback, ProgressInfo, SamplerOptions, VideoFile};
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         if let Some(pct) = info.percentage {
//!             println!("[{:?}] {pct:.1}% complete", info.operation);
//!         }
//!     }
//! }
//!
//! let sampler = FrameSampler::new(SamplerOptions::new(6).with_progress(Arc::new(PrintProgress)));
//! let mut video = VideoFile::open("input.mp4")?;
//! let frames = sampler.frames(&mut video)?;
//! # Ok::<(), framesample::SamplingError>(())
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// The kind of work currently in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum OperationType {
    /// Decoding every frame of a video into memory.
    FrameScan,
    /// Reading the frames picked by a sampling directive.
    FrameSelection,
    /// Encoding selected frames to disk.
    FrameWriting,
}

/// A snapshot of progress.
///
/// Delivered to [`ProgressCallback::on_progress`] at a cadence controlled
/// by [`SamplerOptions::with_batch_size`](crate::SamplerOptions::with_batch_size).
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// What kind of work is being performed.
    pub operation: OperationType,
    /// How many items (frames read or written) have been processed so far.
    pub current: u64,
    /// Total items expected, if known ahead of time.
    pub total: Option<u64>,
    /// Completion percentage (0.0 – 100.0), if `total` is known.
    pub percentage: Option<f32>,
    /// Wall-clock time elapsed since the operation started.
    pub elapsed: Duration,
    /// Estimated time remaining, based on current throughput.
    pub estimated_remaining: Option<Duration>,
    /// The frame position currently being processed, when meaningful.
    pub current_frame: Option<u64>,
}

/// Trait for receiving progress updates.
///
/// Implementations must be [`Send`] and [`Sync`] so one callback can be
/// shared by samplers running on different threads over different videos.
pub trait ProgressCallback: Send + Sync {
    /// Called at regular intervals during an operation.
    fn on_progress(&self, info: &ProgressInfo);
}

/// Discards all progress notifications. The default callback.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}

/// A callback plus its reporting cadence, handed to each operation so it
/// can build a [`ProgressTracker`] once it knows its total.
#[derive(Clone)]
pub(crate) struct ProgressSink {
    callback: Arc<dyn ProgressCallback>,
    batch_size: u64,
}

impl ProgressSink {
    pub(crate) fn new(callback: Arc<dyn ProgressCallback>, batch_size: u64) -> Self {
        Self {
            callback,
            batch_size,
        }
    }

    /// A sink that reports to nobody.
    pub(crate) fn none() -> Self {
        Self::new(Arc::new(NoOpProgress), 1)
    }

    pub(crate) fn tracker(&self, operation: OperationType, total: Option<u64>) -> ProgressTracker {
        ProgressTracker::new(self.callback.clone(), operation, total, self.batch_size)
    }
}

impl Debug for ProgressSink {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ProgressSink")
            .field("batch_size", &self.batch_size)
            .finish_non_exhaustive()
    }
}

/// Tracks progress timing and emits callbacks.
pub(crate) struct ProgressTracker {
    callback: Arc<dyn ProgressCallback>,
    operation: OperationType,
    total: Option<u64>,
    current: u64,
    batch_size: u64,
    start_time: Instant,
    items_since_last_report: u64,
}

impl ProgressTracker {
    pub(crate) fn new(
        callback: Arc<dyn ProgressCallback>,
        operation: OperationType,
        total: Option<u64>,
        batch_size: u64,
    ) -> Self {
        Self {
            callback,
            operation,
            total,
            current: 0,
            batch_size: batch_size.max(1),
            start_time: Instant::now(),
            items_since_last_report: 0,
        }
    }

    /// Record one completed item and fire the callback if the batch
    /// threshold is reached.
    pub(crate) fn advance(&mut self, frame_index: Option<u64>) {
        self.current += 1;
        self.items_since_last_report += 1;

        if self.items_since_last_report >= self.batch_size {
            self.report(frame_index);
            self.items_since_last_report = 0;
        }
    }

    /// Unconditionally emit a final progress report.
    pub(crate) fn finish(&mut self) {
        self.report(None);
    }

    fn report(&self, frame_index: Option<u64>) {
        let elapsed = self.start_time.elapsed();

        let percentage = self
            .total
            .filter(|&t| t > 0)
            .map(|t| (self.current as f32 / t as f32) * 100.0);

        let estimated_remaining = if self.current > 0 {
            self.total.map(|t| {
                let remaining = t.saturating_sub(self.current);
                let per_item = elapsed.div_f64(self.current as f64);
                per_item.mul_f64(remaining as f64)
            })
        } else {
            None
        };

        let info = ProgressInfo {
            operation: self.operation,
            current: self.current,
            total: self.total,
            percentage,
            elapsed,
            estimated_remaining,
            current_frame: frame_index,
        };

        self.callback.on_progress(&info);
    }
}
