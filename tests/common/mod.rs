//! In-memory video source shared by the integration tests.
//!
//! Each frame is a 2x1 grayscale image whose pixels encode the frame's
//! position (`high byte`, `low byte`), so tests can tell exactly which
//! frames a selection returned.

#![allow(dead_code)]

use std::collections::HashSet;

use framesample::{Frame, SamplingError, VideoSource};
use image::{DynamicImage, GrayImage, Luma};

/// A finite, seekable synthetic video.
pub struct SyntheticVideo {
    total_frames: u64,
    reported_frames: u64,
    position: u64,
    failing_reads: HashSet<u64>,
    seekable: bool,
    pub reads: u64,
    pub seeks: Vec<u64>,
}

impl SyntheticVideo {
    /// A video of `total_frames` frames whose metadata is accurate.
    pub fn new(total_frames: u64) -> Self {
        Self {
            total_frames,
            reported_frames: total_frames,
            position: 0,
            failing_reads: HashSet::new(),
            seekable: true,
            reads: 0,
            seeks: Vec::new(),
        }
    }

    /// Report `reported` frames regardless of the real length.
    pub fn with_reported_frames(mut self, reported: u64) -> Self {
        self.reported_frames = reported;
        self
    }

    /// Make reads of the frame at `position` fail.
    pub fn with_failing_read(mut self, position: u64) -> Self {
        self.failing_reads.insert(position);
        self
    }

    /// Make every seek fail.
    pub fn without_seeking(mut self) -> Self {
        self.seekable = false;
        self
    }

    pub fn position(&self) -> u64 {
        self.position
    }
}

impl VideoSource for SyntheticVideo {
    fn read_frame(&mut self) -> Result<Option<Frame>, SamplingError> {
        self.reads += 1;
        if self.position >= self.total_frames {
            return Ok(None);
        }

        let position = self.position;
        self.position += 1;
        if self.failing_reads.contains(&position) {
            return Err(SamplingError::DecodeFailure(format!(
                "synthetic failure at {position}"
            )));
        }
        Ok(Some(frame_at(position)))
    }

    fn frame_count(&self) -> u64 {
        self.reported_frames
    }

    fn seek_frame(&mut self, frame_index: u64) -> Result<(), SamplingError> {
        self.seeks.push(frame_index);
        if !self.seekable {
            return Err(SamplingError::DecodeFailure("seek unsupported".to_string()));
        }
        self.position = frame_index;
        Ok(())
    }
}

/// The frame a [`SyntheticVideo`] produces at `position`.
pub fn frame_at(position: u64) -> Frame {
    let mut image = GrayImage::new(2, 1);
    image.put_pixel(0, 0, Luma([(position >> 8) as u8]));
    image.put_pixel(1, 0, Luma([(position & 0xff) as u8]));
    DynamicImage::ImageLuma8(image)
}

/// Decode the position a synthetic frame was generated for.
pub fn position_of(frame: &Frame) -> u64 {
    let luma = frame.to_luma8();
    (u64::from(luma.get_pixel(0, 0)[0]) << 8) | u64::from(luma.get_pixel(1, 0)[0])
}

/// Positions of a selection, `None` for empty slots.
pub fn positions(frames: &[Option<Frame>]) -> Vec<Option<u64>> {
    frames.iter().map(|frame| frame.as_ref().map(position_of)).collect()
}
