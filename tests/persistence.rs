//! FrameSampler / FrameWriter persistence tests.

mod common;

use std::path::Path;

use common::SyntheticVideo;
use framesample::{FrameSampler, FrameWriter, SamplerOptions, SamplingError, ScanStrategy};
use image::{DynamicImage, RgbImage};

fn files_in(directory: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(directory)
        .expect("Failed to read output directory")
        .map(|entry| {
            entry
                .expect("Failed to read entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}

// ── FrameSampler::save ───────────────────────────────────────────

#[test]
fn save_by_count_names_files_per_video() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let output = temporary_directory.path().join("generated_frames");

    let sampler = FrameSampler::default();
    let videos = vec![
        ("video1", SyntheticVideo::new(30)),
        ("video2", SyntheticVideo::new(45)),
    ];
    let written = sampler
        .save(videos, &output, Some(3))
        .expect("Failed to save frames");

    assert_eq!(written, 6);
    assert_eq!(
        files_in(&output),
        vec![
            "video1-0.jpg",
            "video1-1.jpg",
            "video1-2.jpg",
            "video2-0.jpg",
            "video2-1.jpg",
            "video2-2.jpg",
        ],
    );
}

#[test]
fn save_without_count_uses_rate() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let sampler = FrameSampler::new(SamplerOptions::new(6));

    let written = sampler
        .save(
            [("clip".to_string(), SyntheticVideo::new(30))],
            temporary_directory.path(),
            None,
        )
        .expect("Failed to save frames");

    assert_eq!(written, 5);
    for index in 0..5 {
        assert!(temporary_directory.path().join(format!("clip-{index}.jpg")).exists());
    }
}

#[test]
fn save_honours_strategy_and_extension() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let sampler = FrameSampler::new(
        SamplerOptions::new(10)
            .with_scan_strategy(ScanStrategy::FullScan)
            .with_image_extension("png"),
    );

    // Metadata claims nothing, the full scan still finds 30 frames.
    let video = SyntheticVideo::new(30).with_reported_frames(0);
    let written = sampler
        .save([("clip", video)], temporary_directory.path(), None)
        .expect("Failed to save frames");

    assert_eq!(written, 3);
    assert_eq!(
        files_in(temporary_directory.path()),
        vec!["clip-0.png", "clip-1.png", "clip-2.png"],
    );
}

#[test]
fn save_skips_empty_slots() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let sampler = FrameSampler::default();

    let video = SyntheticVideo::new(30).with_failing_read(12);
    let written = sampler
        .save([("clip", video)], temporary_directory.path(), Some(5))
        .expect("Failed to save frames");

    assert_eq!(written, 4);
    assert!(!temporary_directory.path().join("clip-2.jpg").exists());
    assert!(temporary_directory.path().join("clip-3.jpg").exists());
}

#[test]
fn save_rejects_negative_count_before_creating_output() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let output = temporary_directory.path().join("never_created");

    let result = FrameSampler::default().save(
        [("clip", SyntheticVideo::new(30))],
        &output,
        Some(-1),
    );

    assert!(matches!(result, Err(SamplingError::InvalidArgument(_))));
    assert!(!output.exists());
}

#[test]
fn save_resizes_tall_frames() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let sampler = FrameSampler::new(
        SamplerOptions::default()
            .with_image_extension("png")
            .with_height_threshold(216),
    );

    let frame = DynamicImage::ImageRgb8(RgbImage::new(400, 300));
    sampler
        .writer(temporary_directory.path())
        .write("tall", &[Some(frame)])
        .expect("Failed to write frame");

    let saved = image::open(temporary_directory.path().join("tall-0.png"))
        .expect("Failed to reopen frame");
    assert_eq!((saved.width(), saved.height()), (288, 216));
}

// ── FrameWriter ──────────────────────────────────────────────────

#[test]
fn unknown_extension_is_an_encoding_failure() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let frame = DynamicImage::ImageRgb8(RgbImage::new(4, 4));

    let result = FrameWriter::new(temporary_directory.path())
        .with_extension("notanimage")
        .write("clip", &[Some(frame)]);

    assert!(matches!(result, Err(SamplingError::EncodingFailure(_))));
}

#[test]
fn writing_nothing_still_creates_directory() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let output = temporary_directory.path().join("empty");

    let written = FrameWriter::new(&output)
        .write("clip", &[None, None])
        .expect("Failed to write frames");

    assert_eq!(written, 0);
    assert!(output.is_dir());
    assert!(files_in(&output).is_empty());
}

// ── mirrored layout ──────────────────────────────────────────────

#[test]
fn mirrored_directory_follows_group_layout() {
    let directory = framesample::mirrored_output_directory(
        "./videos",
        "./videos/actor1/video.mp4",
        "./frames",
    )
    .expect("Failed to map path");

    assert_eq!(directory, Path::new("./frames/actor1/video.mp4"));
}
