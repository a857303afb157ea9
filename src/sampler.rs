//! The configured sampling front end.
//!
//! [`FrameSampler`] bundles [`SamplerOptions`] with the selection and
//! persistence operations, so a preprocessing job configures the rate,
//! strategy and output format once and reuses them for every video.

use std::path::Path;

use crate::config::SamplerOptions;
use crate::error::SamplingError;
use crate::selector::SamplingDirective;
use crate::source::{Frame, VideoSource};
use crate::writer::FrameWriter;

/// Extracts frames from video sources according to fixed options.
///
/// # Example
///
/// ```no_run
/// use framesample::{FrameSampler, SamplerOptions, VideoFile};
///
/// let sampler = FrameSampler::new(SamplerOptions::new(6).with_height_threshold(216));
///
/// let videos = vec![
///     ("video1".to_string(), VideoFile::open("1.mp4")?),
///     ("video2".to_string(), VideoFile::open("2.mp4")?),
/// ];
/// sampler.save(videos, "output", Some(10))?;
/// # Ok::<(), framesample::SamplingError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct FrameSampler {
    options: SamplerOptions,
}

impl FrameSampler {
    /// Create a sampler with the given options.
    pub fn new(options: SamplerOptions) -> Self {
        Self { options }
    }

    /// The options this sampler was created with.
    pub fn options(&self) -> &SamplerOptions {
        &self.options
    }

    /// Keep every `frames_per_second`-th frame of `source`.
    ///
    /// # Errors
    ///
    /// See [`select_by_rate`](crate::select_by_rate).
    pub fn frames<S: VideoSource + ?Sized>(
        &self,
        source: &mut S,
    ) -> Result<Vec<Option<Frame>>, SamplingError> {
        self.select(source, SamplingDirective::Rate(self.options.frames_per_second))
    }

    /// Keep `requested_count` frames spread uniformly over `source`.
    ///
    /// # Errors
    ///
    /// See [`select_by_count`](crate::select_by_count).
    pub fn frames_by_count<S: VideoSource + ?Sized>(
        &self,
        source: &mut S,
        requested_count: i64,
    ) -> Result<Vec<Option<Frame>>, SamplingError> {
        self.select(source, SamplingDirective::Count(requested_count))
    }

    /// Apply an arbitrary directive with this sampler's strategy and progress
    /// reporting.
    ///
    /// # Errors
    ///
    /// See [`SamplingDirective::select`].
    pub fn select<S: VideoSource + ?Sized>(
        &self,
        source: &mut S,
        directive: SamplingDirective,
    ) -> Result<Vec<Option<Frame>>, SamplingError> {
        directive.select_with_progress(
            source,
            self.options.scan_strategy,
            &self.options.progress_sink(),
        )
    }

    /// A writer for `output_directory` configured from these options.
    pub fn writer<P: AsRef<Path>>(&self, output_directory: P) -> FrameWriter {
        let writer = FrameWriter::new(output_directory)
            .with_extension(self.options.image_extension.clone())
            .with_progress(self.options.progress_sink());
        match self.options.height_threshold {
            Some(threshold) => writer.with_height_threshold(threshold),
            None => writer,
        }
    }

    /// Select frames from each named source and write them to
    /// `output_directory`.
    ///
    /// Each entry is sampled with [`frames_by_count`](FrameSampler::frames_by_count)
    /// when `requested_count` is given and with [`frames`](FrameSampler::frames)
    /// otherwise, then written as `<name>-<index>.<extension>`. Empty slots
    /// are skipped. Sources are consumed and dropped once written. Returns
    /// the total number of files written.
    ///
    /// # Errors
    ///
    /// A negative `requested_count` fails with
    /// [`SamplingError::InvalidArgument`] before anything is created. Other
    /// errors stop the batch at the failing entry; earlier entries stay on
    /// disk.
    pub fn save<I, N, S, P>(
        &self,
        collection: I,
        output_directory: P,
        requested_count: Option<i64>,
    ) -> Result<usize, SamplingError>
    where
        I: IntoIterator<Item = (N, S)>,
        N: AsRef<str>,
        S: VideoSource,
        P: AsRef<Path>,
    {
        if let Some(count) = requested_count.filter(|count| *count < 0) {
            return Err(SamplingError::InvalidArgument(format!(
                "requested frame count must not be negative (got {count})"
            )));
        }

        let writer = self.writer(output_directory);
        let mut written = 0;

        for (name, mut source) in collection {
            let name = name.as_ref();
            let frames = match requested_count {
                Some(count) => self.frames_by_count(&mut source, count)?,
                None => self.frames(&mut source)?,
            };
            log::debug!("Selected {} frames from {name}", frames.len());
            written += writer.write(name, &frames)?;
        }

        Ok(written)
    }
}
