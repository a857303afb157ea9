//! Count-based selection over synthetic sources.

mod common;

use common::{SyntheticVideo, positions};
use framesample::{SamplingDirective, SamplingError, ScanStrategy};

const STRATEGIES: [ScanStrategy; 2] = [ScanStrategy::Metadata, ScanStrategy::FullScan];

// ── scheduled positions ──────────────────────────────────────────

#[test]
fn ten_frames_of_thirty() {
    let expected: Vec<Option<u64>> = (0..10).map(|i| Some(i * 3)).collect();
    for strategy in STRATEGIES {
        let mut video = SyntheticVideo::new(30);
        let frames = framesample::select_by_count(&mut video, 10, strategy)
            .expect("Count selection failed");
        assert_eq!(positions(&frames), expected, "{strategy:?}");
    }
}

#[test]
fn metadata_strategy_seeks_to_each_scheduled_index() {
    let mut video = SyntheticVideo::new(30);
    framesample::select_by_count(&mut video, 4, ScanStrategy::Metadata)
        .expect("Count selection failed");

    assert_eq!(video.seeks, framesample::index_schedule(30, 4));
    assert_eq!(video.seeks, vec![0, 7, 15, 22]);
    assert_eq!(video.reads, 4);
}

#[test]
fn full_scan_never_seeks() {
    let mut video = SyntheticVideo::new(30);
    framesample::select_by_count(&mut video, 4, ScanStrategy::FullScan)
        .expect("Count selection failed");

    assert!(video.seeks.is_empty());
    assert_eq!(video.reads, 31);
}

#[test]
fn result_length_matches_request() {
    for strategy in STRATEGIES {
        for requested in 0..=60 {
            let mut video = SyntheticVideo::new(30);
            let frames = framesample::select_by_count(&mut video, requested, strategy)
                .expect("Count selection failed");
            assert_eq!(frames.len() as i64, requested, "{strategy:?}");
        }
    }
}

#[test]
fn positions_are_non_decreasing() {
    for strategy in STRATEGIES {
        let mut video = SyntheticVideo::new(17);
        let frames = framesample::select_by_count(&mut video, 9, strategy)
            .expect("Count selection failed");
        let positions: Vec<u64> = positions(&frames).into_iter().flatten().collect();
        assert_eq!(positions.len(), 9);
        assert!(positions.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}

#[test]
fn oversampling_repeats_frames() {
    let expected = vec![
        Some(0),
        Some(0),
        Some(0),
        Some(1),
        Some(1),
        Some(2),
        Some(2),
        Some(2),
        Some(3),
        Some(3),
    ];
    for strategy in STRATEGIES {
        let mut video = SyntheticVideo::new(4);
        let frames = framesample::select_by_count(&mut video, 10, strategy)
            .expect("Count selection failed");
        assert_eq!(positions(&frames), expected, "{strategy:?}");
    }
}

#[test]
fn directive_dispatches_to_count_selection() {
    let mut video = SyntheticVideo::new(30);
    let frames = SamplingDirective::Count(3)
        .select(&mut video, ScanStrategy::FullScan)
        .expect("Count selection failed");
    assert_eq!(positions(&frames), vec![Some(0), Some(10), Some(20)]);
}

// ── validation ───────────────────────────────────────────────────

#[test]
fn zero_count_is_empty_and_touches_nothing() {
    for strategy in STRATEGIES {
        let mut video = SyntheticVideo::new(30);
        let frames = framesample::select_by_count(&mut video, 0, strategy)
            .expect("Count selection failed");

        assert!(frames.is_empty());
        assert_eq!(video.reads, 0);
        assert!(video.seeks.is_empty());
    }
}

#[test]
fn negative_count_is_rejected_without_reading() {
    for strategy in STRATEGIES {
        let mut video = SyntheticVideo::new(30);
        let result = framesample::select_by_count(&mut video, -1, strategy);

        match result {
            Err(SamplingError::InvalidArgument(message)) => {
                assert!(message.contains("-1"), "Unexpected message: {message}");
            }
            other => panic!("Expected InvalidArgument, got: {other:?}"),
        }
        assert_eq!(video.reads, 0);
        assert!(video.seeks.is_empty());
    }
}

// ── decode failures ──────────────────────────────────────────────

#[test]
fn failed_read_becomes_placeholder() {
    let mut video = SyntheticVideo::new(30).with_failing_read(9);
    let frames = framesample::select_by_count(&mut video, 5, ScanStrategy::Metadata)
        .expect("Count selection failed");

    assert_eq!(
        positions(&frames),
        vec![Some(0), Some(6), Some(12), Some(18), Some(24)],
    );

    let mut video = SyntheticVideo::new(30).with_failing_read(12);
    let frames = framesample::select_by_count(&mut video, 5, ScanStrategy::Metadata)
        .expect("Count selection failed");

    assert_eq!(
        positions(&frames),
        vec![Some(0), Some(6), None, Some(18), Some(24)],
    );
}

#[test]
fn failed_seeks_keep_output_length() {
    let mut video = SyntheticVideo::new(30).without_seeking();
    let frames = framesample::select_by_count(&mut video, 3, ScanStrategy::Metadata)
        .expect("Count selection failed");

    assert_eq!(positions(&frames), vec![None, None, None]);
    assert_eq!(video.reads, 0);
}

#[test]
fn overstated_frame_count_leaves_empty_slots() {
    let mut video = SyntheticVideo::new(30).with_reported_frames(40);
    let frames = framesample::select_by_count(&mut video, 4, ScanStrategy::Metadata)
        .expect("Count selection failed");

    assert_eq!(positions(&frames), vec![Some(0), Some(10), Some(20), None]);
}

#[test]
fn empty_video_yields_placeholders_when_scanning() {
    let mut video = SyntheticVideo::new(0);
    let frames = framesample::select_by_count(&mut video, 3, ScanStrategy::FullScan)
        .expect("Count selection failed");

    assert_eq!(positions(&frames), vec![None, None, None]);
}
