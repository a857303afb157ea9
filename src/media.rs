//! FFmpeg-backed [`VideoSource`].
//!
//! [`VideoFile`] opens a media file, selects its best video stream, caches
//! [`VideoMetadata`] and decodes frames one at a time into
//! [`image::DynamicImage`] values in the configured pixel format and
//! resolution.

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};
use std::time::Duration;

use ffmpeg_next::{
    Error as FfmpegError, Packet, Rational,
    codec::context::Context as CodecContext,
    decoder::Video as VideoDecoder,
    format::context::Input,
    frame::Video as VideoFrame,
    media::Type,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};

use crate::config::{FrameOutputOptions, PixelFormat};
use crate::error::SamplingError;
use crate::metadata::VideoMetadata;
use crate::source::{Frame, VideoSource};

/// An open video file.
///
/// The file stays open until the value is dropped. Reads advance a single
/// decode position; [`seek_frame`](VideoSource::seek_frame) moves it.
///
/// # Example
///
/// ```no_run
/// use framesample::{VideoFile, VideoSource};
///
/// let mut video = VideoFile::open("input.mp4")?;
/// println!("{} frames", video.frame_count());
/// if let Some(frame) = video.read_frame()? {
///     frame.save("first_frame.png")?;
/// }
/// # Ok::<(), framesample::SamplingError>(())
/// ```
pub struct VideoFile {
    input: Input,
    decoder: VideoDecoder,
    scaler: ScalingContext,
    video_stream_index: usize,
    time_base: Rational,
    /// Stream start time in `time_base` units, subtracted from every PTS.
    start_pts: i64,
    metadata: VideoMetadata,
    output: FrameOutputOptions,
    target_width: u32,
    target_height: u32,
    decoded_frame: VideoFrame,
    scaled_frame: VideoFrame,
    /// Index the next decoded frame is assumed to have when it carries no PTS.
    next_index: u64,
    /// Frames before this index are discarded after a seek.
    seek_target: Option<u64>,
    eof_sent: bool,
    path: PathBuf,
}

impl Debug for VideoFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("VideoFile")
            .field("path", &self.path)
            .field("metadata", &self.metadata)
            .field("video_stream_index", &self.video_stream_index)
            .field("next_index", &self.next_index)
            .finish_non_exhaustive()
    }
}

impl VideoFile {
    /// Open a video file, decoding frames as RGB8 at source resolution.
    ///
    /// # Errors
    ///
    /// Returns [`SamplingError::FileOpen`] if the file cannot be opened or
    /// its decoder cannot be created, and [`SamplingError::NoVideoStream`]
    /// if it contains no video.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SamplingError> {
        Self::open_with_options(path, &FrameOutputOptions::default())
    }

    /// Open a video file with custom frame conversion settings.
    ///
    /// # Errors
    ///
    /// Same as [`open`](VideoFile::open).
    pub fn open_with_options<P: AsRef<Path>>(
        path: P,
        output: &FrameOutputOptions,
    ) -> Result<Self, SamplingError> {
        let path = path.as_ref().to_path_buf();
        log::debug!("Opening video file: {}", path.display());

        ffmpeg_next::init().map_err(|error| SamplingError::FileOpen {
            path: path.clone(),
            reason: format!("FFmpeg initialisation failed: {error}"),
        })?;

        let input = ffmpeg_next::format::input(&path).map_err(|error| SamplingError::FileOpen {
            path: path.clone(),
            reason: error.to_string(),
        })?;

        let stream = input
            .streams()
            .best(Type::Video)
            .ok_or(SamplingError::NoVideoStream)?;
        let video_stream_index = stream.index();
        let time_base = stream.time_base();
        let start_pts = match stream.start_time() {
            // AV_NOPTS_VALUE
            i64::MIN => 0,
            start => start,
        };

        let decoder_context = CodecContext::from_parameters(stream.parameters()).map_err(
            |error| SamplingError::FileOpen {
                path: path.clone(),
                reason: format!("Failed to read video codec parameters: {error}"),
            },
        )?;
        let decoder = decoder_context
            .decoder()
            .video()
            .map_err(|error| SamplingError::FileOpen {
                path: path.clone(),
                reason: format!("Failed to create video decoder: {error}"),
            })?;

        let duration_microseconds = input.duration();
        let duration = if duration_microseconds > 0 {
            Duration::from_micros(duration_microseconds as u64)
        } else {
            Duration::ZERO
        };

        let frame_rate = stream.avg_frame_rate();
        let frames_per_second = if frame_rate.denominator() != 0 {
            frame_rate.numerator() as f64 / frame_rate.denominator() as f64
        } else {
            let rate = stream.rate();
            if rate.denominator() != 0 {
                rate.numerator() as f64 / rate.denominator() as f64
            } else {
                0.0
            }
        };

        // Prefer the container's own count; estimate only when it is absent.
        let frame_count = match stream.frames() {
            frames if frames > 0 => frames as u64,
            _ if frames_per_second > 0.0 => (duration.as_secs_f64() * frames_per_second) as u64,
            _ => 0,
        };

        let codec = decoder
            .codec()
            .map(|codec| codec.name().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let metadata = VideoMetadata {
            width: decoder.width(),
            height: decoder.height(),
            frames_per_second,
            frame_count,
            duration,
            codec,
            format: input.format().name().to_string(),
        };

        let (target_width, target_height) =
            output.resolve_dimensions(metadata.width, metadata.height);

        let scaler = ScalingContext::get(
            decoder.format(),
            decoder.width(),
            decoder.height(),
            output.pixel_format.to_ffmpeg_pixel(),
            target_width,
            target_height,
            ScalingFlags::BILINEAR,
        )?;

        log::info!(
            "Opened {} ({}x{}, {:.2} fps, {} frames, {})",
            path.display(),
            metadata.width,
            metadata.height,
            metadata.frames_per_second,
            metadata.frame_count,
            metadata.codec,
        );

        Ok(Self {
            input,
            decoder,
            scaler,
            video_stream_index,
            time_base,
            start_pts,
            metadata,
            output: output.clone(),
            target_width,
            target_height,
            decoded_frame: VideoFrame::empty(),
            scaled_frame: VideoFrame::empty(),
            next_index: 0,
            seek_target: None,
            eof_sent: false,
            path,
        })
    }

    /// Metadata captured when the file was opened.
    pub fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    /// Path the file was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Frame index of the current decoded frame, or `None` when it cannot
    /// be determined.
    ///
    /// Derived from the best-effort timestamp when present, otherwise from
    /// the read counter.
    fn current_frame_index(&self) -> Option<u64> {
        crate::utilities::locate_frame(
            self.decoded_frame
                .timestamp()
                .map(|timestamp| timestamp - self.start_pts),
            self.time_base,
            self.metadata.frames_per_second,
            self.next_index,
            self.seek_target.is_some(),
        )
    }

    /// Scale and convert the current `decoded_frame` to a `DynamicImage`.
    fn convert_current_frame(&mut self) -> Result<Frame, SamplingError> {
        self.scaler.run(&self.decoded_frame, &mut self.scaled_frame)?;

        let width = self.target_width;
        let height = self.target_height;
        let pixel_format = self.output.pixel_format;
        let buffer = crate::utilities::frame_to_buffer(
            &self.scaled_frame,
            width,
            height,
            pixel_format.bytes_per_pixel(),
        );

        let image = match pixel_format {
            PixelFormat::Rgb8 => RgbImage::from_raw(width, height, buffer).map(DynamicImage::ImageRgb8),
            PixelFormat::Rgba8 => {
                RgbaImage::from_raw(width, height, buffer).map(DynamicImage::ImageRgba8)
            }
            PixelFormat::Gray8 => {
                GrayImage::from_raw(width, height, buffer).map(DynamicImage::ImageLuma8)
            }
        };

        image.ok_or_else(|| {
            SamplingError::DecodeFailure(format!(
                "Failed to construct {pixel_format:?} image from decoded frame data"
            ))
        })
    }
}

impl VideoSource for VideoFile {
    fn read_frame(&mut self) -> Result<Option<Frame>, SamplingError> {
        loop {
            // Drain frames the decoder has already produced.
            if self.decoder.receive_frame(&mut self.decoded_frame).is_ok() {
                let Some(frame_index) = self.current_frame_index() else {
                    let target = self.seek_target.take().unwrap_or(self.next_index);
                    return Err(SamplingError::DecodeFailure(format!(
                        "Frame after seeking to {target} carries no timestamp"
                    )));
                };

                if let Some(target) = self.seek_target {
                    if frame_index < target {
                        continue;
                    }
                    self.seek_target = None;
                }

                self.next_index = frame_index + 1;
                return self.convert_current_frame().map(Some);
            }

            if self.eof_sent {
                return Ok(None);
            }

            let mut packet = Packet::empty();
            match packet.read(&mut self.input) {
                Ok(()) => {
                    if packet.stream() == self.video_stream_index {
                        self.decoder.send_packet(&packet).map_err(|error| {
                            SamplingError::DecodeFailure(format!(
                                "Failed to decode packet near frame {}: {error}",
                                self.next_index
                            ))
                        })?;
                    }
                }
                Err(FfmpegError::Eof) => {
                    self.decoder.send_eof()?;
                    self.eof_sent = true;
                }
                Err(error) => {
                    return Err(SamplingError::DecodeFailure(format!(
                        "Failed to read packet near frame {}: {error}",
                        self.next_index
                    )));
                }
            }
        }
    }

    fn frame_count(&self) -> u64 {
        self.metadata.frame_count
    }

    fn seek_frame(&mut self, frame_index: u64) -> Result<(), SamplingError> {
        if self.metadata.frames_per_second <= 0.0 {
            return Err(SamplingError::DecodeFailure(
                "Cannot seek: stream reports no frame rate".to_string(),
            ));
        }

        let timestamp = crate::utilities::frame_index_to_seek_timestamp(
            frame_index,
            self.metadata.frames_per_second,
        );

        // Lands on the nearest keyframe at or before the target; read_frame
        // decodes forward from there.
        self.input.seek(timestamp, ..timestamp)?;
        self.decoder.flush();
        self.eof_sent = false;
        self.next_index = frame_index;
        self.seek_target = Some(frame_index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_missing_file_reports_path() {
        let error = VideoFile::open("does/not/exist.mp4").unwrap_err();
        match error {
            SamplingError::FileOpen { path, .. } => {
                assert_eq!(path, Path::new("does/not/exist.mp4"));
            }
            other => panic!("Expected FileOpen, got: {other}"),
        }
    }
}
