//! FFmpeg-backed source tests.
//!
//! Tests require fixture files from `tests/fixtures/generate_fixtures.sh`
//! and return early when they are missing.

use std::path::Path;

use framesample::{
    FrameOutputOptions, PixelFormat, SamplingError, ScanStrategy, VideoFile, VideoSource,
};

fn sample_video_path() -> &'static str {
    "tests/fixtures/sample_video.mp4"
}

fn sample_audio_only_path() -> &'static str {
    "tests/fixtures/sample_audio_only.mp4"
}

// ── opening ──────────────────────────────────────────────────────

#[test]
fn open_nonexistent_file() {
    let result = VideoFile::open("this_file_does_not_exist.mp4");
    let error_message = result.unwrap_err().to_string();
    assert!(
        error_message.contains("Failed to open video file"),
        "Error message should mention file open failure: {error_message}",
    );
}

#[test]
fn open_invalid_file() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let invalid_file_path = temporary_directory.path().join("invalid.mp4");
    std::fs::write(&invalid_file_path, b"this is not a media file")
        .expect("Failed to write invalid file");

    assert!(VideoFile::open(&invalid_file_path).is_err());
}

#[test]
fn open_audio_only_file() {
    let path = sample_audio_only_path();
    if !Path::new(path).exists() {
        return;
    }

    let result = VideoFile::open(path);
    assert!(matches!(result, Err(SamplingError::NoVideoStream)));
}

#[test]
fn metadata_matches_fixture() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let video = VideoFile::open(path).expect("Failed to open fixture");
    let metadata = video.metadata();
    assert_eq!((metadata.width, metadata.height), (320, 240));
    assert!((metadata.frames_per_second - 30.0).abs() < 0.01);
    assert_eq!(metadata.frame_count, 30);
    assert_eq!(video.frame_count(), 30);
}

// ── reading ──────────────────────────────────────────────────────

#[test]
fn sequential_reads_reach_end_of_stream() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let mut video = VideoFile::open(path).expect("Failed to open fixture");
    let (frames, count) = framesample::scan_all(&mut video);
    assert_eq!(count, 30);
    assert_eq!(frames[0].width(), 320);
    assert!(video.read_frame().expect("Read after end failed").is_none());
}

#[test]
fn output_options_control_conversion() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let options = FrameOutputOptions::default()
        .with_pixel_format(PixelFormat::Gray8)
        .with_resolution(None, Some(120));
    let mut video = VideoFile::open_with_options(path, &options).expect("Failed to open fixture");
    let frame = video
        .read_frame()
        .expect("Read failed")
        .expect("Fixture has no frames");

    assert!(matches!(frame, image::DynamicImage::ImageLuma8(_)));
    assert_eq!((frame.width(), frame.height()), (160, 120));
}

// ── selection ────────────────────────────────────────────────────

#[test]
fn rate_selection_on_fixture() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    for strategy in [ScanStrategy::Metadata, ScanStrategy::FullScan] {
        let mut video = VideoFile::open(path).expect("Failed to open fixture");
        let frames = framesample::select_by_rate(&mut video, 6, strategy)
            .expect("Rate selection failed");
        assert_eq!(frames.len(), 5, "{strategy:?}");
        assert!(frames.iter().all(Option::is_some));
    }
}

#[test]
fn count_selection_by_seeking_matches_full_scan() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let mut video = VideoFile::open(path).expect("Failed to open fixture");
    let seeked = framesample::select_by_count(&mut video, 10, ScanStrategy::Metadata)
        .expect("Count selection failed");

    let mut video = VideoFile::open(path).expect("Failed to open fixture");
    let scanned = framesample::select_by_count(&mut video, 10, ScanStrategy::FullScan)
        .expect("Count selection failed");

    assert_eq!(seeked.len(), 10);
    assert_eq!(scanned.len(), 10);
    assert!(seeked.iter().chain(&scanned).all(Option::is_some));

    let first_seeked = seeked[0].as_ref().expect("Seek read failed");
    let first_scanned = scanned[0].as_ref().expect("Scan slot empty");
    assert_eq!(first_seeked.as_bytes(), first_scanned.as_bytes());
}
