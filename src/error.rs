//! Error types for the `framesample` crate.
//!
//! This module defines [`SamplingError`], the unified error type returned by
//! all fallible operations in the crate. Errors carry enough context to
//! diagnose the problem (file paths, frame positions, upstream messages)
//! without extra logging at the call site.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

/// The unified error type for all `framesample` operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SamplingError {
    /// A sampling directive or path argument was rejected before any work
    /// was performed (negative frame count, zero rate divisor, ...).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The video file could not be opened.
    #[error("Failed to open video file at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to [`crate::VideoFile::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The file does not contain a video stream.
    #[error("No video stream found in file")]
    NoVideoStream,

    /// A single frame read or seek failed.
    ///
    /// The selector tolerates this error by recording a placeholder for the
    /// affected slot; it only reaches callers that use a
    /// [`VideoSource`](crate::VideoSource) directly.
    #[error("Failed to decode video frame: {0}")]
    DecodeFailure(String),

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),

    /// An I/O error occurred while creating directories or writing files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// A frame could not be encoded to its output file.
    #[error("Failed to encode frame: {0}")]
    EncodingFailure(#[from] ImageError),
}

impl From<FfmpegError> for SamplingError {
    fn from(error: FfmpegError) -> Self {
        SamplingError::FfmpegError(error.to_string())
    }
}
