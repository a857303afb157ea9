//! FFmpeg console verbosity.
//!
//! FFmpeg writes its own warnings to stderr independently of the Rust
//! [`log`](https://crates.io/crates/log) facade used by this crate. Batch
//! jobs over thousands of clips usually want that output quieter:
//!
//! ```no_run
//! use framesample::FfmpegLogLevel;
//!
//! framesample::set_ffmpeg_log_level(FfmpegLogLevel::Error);
//! ```

use ffmpeg_next::util::log::Level;

/// FFmpeg internal log verbosity, from most quiet to most verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FfmpegLogLevel {
    /// Print nothing.
    Quiet,
    /// Only unrecoverable errors.
    Fatal,
    /// Recoverable errors.
    Error,
    /// Warnings (FFmpeg's default).
    Warning,
    /// Informational messages.
    Info,
    /// Debugging output.
    Debug,
}

impl From<FfmpegLogLevel> for Level {
    fn from(level: FfmpegLogLevel) -> Self {
        match level {
            FfmpegLogLevel::Quiet => Level::Quiet,
            FfmpegLogLevel::Fatal => Level::Fatal,
            FfmpegLogLevel::Error => Level::Error,
            FfmpegLogLevel::Warning => Level::Warning,
            FfmpegLogLevel::Info => Level::Info,
            FfmpegLogLevel::Debug => Level::Debug,
        }
    }
}

impl FfmpegLogLevel {
    /// Map FFmpeg's level onto the closest variant.
    fn from_ffmpeg_level(level: Level) -> Self {
        match level {
            Level::Quiet => FfmpegLogLevel::Quiet,
            Level::Panic | Level::Fatal => FfmpegLogLevel::Fatal,
            Level::Error => FfmpegLogLevel::Error,
            Level::Warning => FfmpegLogLevel::Warning,
            Level::Info | Level::Verbose => FfmpegLogLevel::Info,
            Level::Debug | Level::Trace => FfmpegLogLevel::Debug,
        }
    }
}

/// Set FFmpeg's console verbosity. Does not affect `log` output.
pub fn set_ffmpeg_log_level(level: FfmpegLogLevel) {
    ffmpeg_next::util::log::set_level(level.into());
}

/// Current FFmpeg console verbosity, or `None` if FFmpeg reports a value
/// outside the known levels.
pub fn get_ffmpeg_log_level() -> Option<FfmpegLogLevel> {
    ffmpeg_next::util::log::get_level()
        .ok()
        .map(FfmpegLogLevel::from_ffmpeg_level)
}
