//! Internal utility functions.
//!
//! Helpers for pixel-data copying and frame/timestamp conversion shared by
//! the FFmpeg-backed source.

use ffmpeg_next::{Rational, frame::Video as VideoFrame};

/// Copy pixel data from an FFmpeg video frame into a tightly-packed buffer.
///
/// `bytes_per_pixel` is the number of bytes per pixel for the output format
/// (3 for RGB24, 4 for RGBA, 1 for GRAY8).
pub fn frame_to_buffer(
    video_frame: &VideoFrame,
    width: u32,
    height: u32,
    bytes_per_pixel: usize,
) -> Vec<u8> {
    let stride = video_frame.stride(0);
    let expected_stride = (width as usize) * bytes_per_pixel;
    let data = video_frame.data(0);

    if stride == expected_stride {
        data[..expected_stride * (height as usize)].to_vec()
    } else {
        let mut buffer = Vec::with_capacity(expected_stride * (height as usize));
        for row in 0..(height as usize) {
            let row_start = row * stride;
            buffer.extend_from_slice(&data[row_start..row_start + expected_stride]);
        }
        buffer
    }
}

/// Rescale a PTS value from stream time base to seconds.
pub fn pts_to_seconds(pts: i64, time_base: Rational) -> f64 {
    pts as f64 * time_base.numerator() as f64 / time_base.denominator() as f64
}

/// Rescale a PTS value to a frame index.
///
/// Rounds to the nearest index so that timestamps which land a hair below a
/// frame boundary still map to that frame.
pub fn pts_to_frame_index(pts: i64, time_base: Rational, frames_per_second: f64) -> u64 {
    let frame = pts_to_seconds(pts, time_base) * frames_per_second;
    if frame <= 0.0 { 0 } else { frame.round() as u64 }
}

/// Frame index of a decoded frame.
///
/// `timestamp` is the frame's best-effort timestamp in stream time base,
/// already offset by the stream start. Without one the read counter
/// `next_index` is used, except right after a seek: the counter then holds
/// the seek target, not the index of the keyframe decoding resumed from, so
/// the frame cannot be located and `None` is returned.
pub fn locate_frame(
    timestamp: Option<i64>,
    time_base: Rational,
    frames_per_second: f64,
    next_index: u64,
    seek_pending: bool,
) -> Option<u64> {
    match timestamp {
        Some(timestamp) if frames_per_second > 0.0 => Some(pts_to_frame_index(
            timestamp,
            time_base,
            frames_per_second,
        )),
        _ if seek_pending => None,
        _ => Some(next_index),
    }
}

/// Convert a frame index to a seek timestamp in AV_TIME_BASE (microseconds).
///
/// `input.seek()` (via `avformat_seek_file` with `stream_index = -1`)
/// expects container-level timestamps, not stream time-base units.
pub fn frame_index_to_seek_timestamp(frame_index: u64, frames_per_second: f64) -> i64 {
    if frames_per_second <= 0.0 {
        return 0;
    }
    let seconds = frame_index as f64 / frames_per_second;
    (seconds * 1_000_000.0) as i64
}
