//! Persisting selected frames to disk.
//!
//! [`FrameWriter`] encodes frame lists into a directory using the naming
//! scheme `<name>-<index>.<extension>`. The image format is inferred from the
//! extension by the `image` crate.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::DEFAULT_IMAGE_EXTENSION;
use crate::error::SamplingError;
use crate::progress::{OperationType, ProgressSink};
use crate::resize::resize_to_threshold;
use crate::source::Frame;

/// Writes frame lists into one output directory.
///
/// # Example
///
/// ```no_run
/// use framesample::{FrameWriter, ScanStrategy, VideoFile};
///
/// let mut video = VideoFile::open("input.mp4")?;
/// let frames = framesample::select_by_rate(&mut video, 6, ScanStrategy::Metadata)?;
///
/// let writer = FrameWriter::new("frames/actor1").with_extension("png");
/// let written = writer.write("clip", &frames)?;
/// println!("wrote {written} files");
/// # Ok::<(), framesample::SamplingError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FrameWriter {
    output_directory: PathBuf,
    extension: String,
    height_threshold: Option<u32>,
    progress: ProgressSink,
}

impl FrameWriter {
    /// Create a writer targeting `output_directory`, writing `jpg` files.
    ///
    /// The directory is created on the first write, not here.
    pub fn new<P: AsRef<Path>>(output_directory: P) -> Self {
        Self {
            output_directory: output_directory.as_ref().to_path_buf(),
            extension: DEFAULT_IMAGE_EXTENSION.to_string(),
            height_threshold: None,
            progress: ProgressSink::none(),
        }
    }

    /// Set the file extension (and therefore the encoder). A leading dot is
    /// stripped.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    /// Shrink frames taller than `threshold` pixels before encoding.
    #[must_use]
    pub fn with_height_threshold(mut self, threshold: u32) -> Self {
        self.height_threshold = Some(threshold);
        self
    }

    pub(crate) fn with_progress(mut self, progress: ProgressSink) -> Self {
        self.progress = progress;
        self
    }

    /// The directory frames are written into.
    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// Path of the file for frame `index` of `name`.
    pub fn frame_path(&self, name: &str, index: usize) -> PathBuf {
        self.output_directory
            .join(format!("{name}-{index}.{}", self.extension))
    }

    /// Write every present frame of `frames` under `name`.
    ///
    /// Frame `i` of the list is written to [`frame_path(name, i)`](FrameWriter::frame_path);
    /// `None` slots are skipped but still consume their index. The output
    /// directory and its parents are created if missing. Returns the number
    /// of files written.
    ///
    /// # Errors
    ///
    /// Returns [`SamplingError::IoError`] if the directory cannot be created
    /// and [`SamplingError::EncodingFailure`] on the first frame that cannot
    /// be encoded. Files written before the failure are left in place.
    pub fn write(&self, name: &str, frames: &[Option<Frame>]) -> Result<usize, SamplingError> {
        fs::create_dir_all(&self.output_directory)?;

        let mut tracker = self
            .progress
            .tracker(OperationType::FrameWriting, Some(frames.len() as u64));
        let mut written = 0;

        for (index, frame) in frames.iter().enumerate() {
            let Some(frame) = frame else {
                log::debug!("Skipping empty slot {index} of {name}");
                continue;
            };

            let path = self.frame_path(name, index);
            match self.height_threshold {
                Some(threshold) => resize_to_threshold(frame, threshold).save(&path)?,
                None => frame.save(&path)?,
            }
            written += 1;
            tracker.advance(Some(index as u64));
        }

        tracker.finish();
        log::debug!(
            "Wrote {written} of {} frames for {name} to {}",
            frames.len(),
            self.output_directory.display()
        );
        Ok(written)
    }
}

/// Map a video path below `input_root` to its frame directory below
/// `output_root`.
///
/// The relative path is preserved, so `videos/actor1/clip.mp4` under input
/// root `videos` and output root `frames` becomes `frames/actor1/clip.mp4`.
/// This mirrors a corpus organised as one directory per actor.
///
/// # Errors
///
/// Returns [`SamplingError::InvalidArgument`] if `video_path` is not inside
/// `input_root`.
///
/// # Example
///
/// ```
/// use std::path::Path;
///
/// let directory = framesample::mirrored_output_directory(
///     "videos",
///     "videos/actor1/clip.mp4",
///     "frames",
/// )?;
/// assert_eq!(directory, Path::new("frames/actor1/clip.mp4"));
/// # Ok::<(), framesample::SamplingError>(())
/// ```
pub fn mirrored_output_directory<I, V, O>(
    input_root: I,
    video_path: V,
    output_root: O,
) -> Result<PathBuf, SamplingError>
where
    I: AsRef<Path>,
    V: AsRef<Path>,
    O: AsRef<Path>,
{
    let input_root = input_root.as_ref();
    let video_path = video_path.as_ref();
    let relative = video_path.strip_prefix(input_root).map_err(|_| {
        SamplingError::InvalidArgument(format!(
            "{} is not inside {}",
            video_path.display(),
            input_root.display()
        ))
    })?;

    if relative.as_os_str().is_empty() {
        return Err(SamplingError::InvalidArgument(format!(
            "{} names the input root itself, not a video",
            video_path.display()
        )));
    }

    Ok(output_root.as_ref().join(relative))
}
