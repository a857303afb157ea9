//! # framesample
//!
//! Sample still frames from video files and write them to disk, for
//! preprocessing video corpora into per-video frame directories.
//!
//! Frames are selected by one of two directives:
//!
//! - **rate**: keep every `n`-th frame ([`select_by_rate`]);
//! - **count**: keep exactly `n` frames spread evenly across the video
//!   ([`select_by_count`]).
//!
//! Each directive can trust the container's frame-count metadata and seek,
//! or decode the whole video first ([`ScanStrategy::FullScan`]) on platforms
//! where metadata and seeking are unreliable. Decoding goes through the
//! [`VideoSource`] trait; [`VideoFile`] implements it with FFmpeg via the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate.
//!
//! ## Quick Start
//!
//! ```no_run
//! use framesample::{FrameSampler, SamplerOptions, ScanStrategy, VideoFile};
//!
//! // Every 6th frame, written as frames/clip-<n>.jpg
//! let sampler = FrameSampler::new(SamplerOptions::new(6));
//! let mut video = VideoFile::open("clip.mp4")?;
//! let frames = sampler.frames(&mut video)?;
//! sampler.writer("frames").write("clip", &frames)?;
//!
//! // Ten evenly spaced frames, decoding the whole video first
//! let mut video = VideoFile::open("clip.mp4")?;
//! let frames = framesample::select_by_count(&mut video, 10, ScanStrategy::FullScan)?;
//! assert_eq!(frames.len(), 10);
//! # Ok::<(), framesample::SamplingError>(())
//! ```
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system.

pub mod config;
pub mod error;
pub mod ffmpeg;
pub mod media;
pub mod metadata;
pub mod progress;
pub mod resize;
pub mod sampler;
pub mod scanner;
pub mod selector;
pub mod source;
mod utilities;
pub mod writer;

pub use config::{
    DEFAULT_FRAMES_PER_SECOND, DEFAULT_IMAGE_EXTENSION, FrameOutputOptions, PixelFormat,
    SamplerOptions,
};
pub use error::SamplingError;
pub use ffmpeg::{FfmpegLogLevel, get_ffmpeg_log_level, set_ffmpeg_log_level};
pub use media::VideoFile;
pub use metadata::VideoMetadata;
pub use progress::{OperationType, ProgressCallback, ProgressInfo};
pub use resize::{DEFAULT_HEIGHT_THRESHOLD, compute_scale, resize_by_scale, resize_to_threshold};
pub use sampler::FrameSampler;
pub use scanner::scan_all;
pub use selector::{
    SamplingDirective, ScanStrategy, index_schedule, select_by_count, select_by_rate,
};
pub use source::{Frame, VideoSource};
pub use writer::{FrameWriter, mirrored_output_directory};
