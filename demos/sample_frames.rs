//! Sample frames from a single video by rate and by count.
//!
//! Usage:
//!   cargo run --example sample_frames -- <input_file> [output_dir]

use std::error::Error;

use framesample::{FfmpegLogLevel, FrameWriter, ScanStrategy, VideoFile, VideoSource};

fn main() -> Result<(), Box<dyn Error>> {
    let mut arguments = std::env::args().skip(1);
    let input_path = arguments.next().unwrap_or_else(|| "input.mp4".to_string());
    let output_directory = arguments.next().unwrap_or_else(|| "frames".to_string());

    framesample::set_ffmpeg_log_level(FfmpegLogLevel::Error);
    println!("FFmpeg log level: {:?}", framesample::get_ffmpeg_log_level());

    println!("Opening {input_path}...");
    let mut video = VideoFile::open(&input_path)?;

    let metadata = video.metadata();
    println!(
        "Video: {}x{}, {:.2} fps, {} frames, codec {}",
        metadata.width,
        metadata.height,
        metadata.frames_per_second,
        metadata.frame_count,
        metadata.codec,
    );

    // Every 6th frame, trusting the frame count.
    println!("Selecting every 6th frame...");
    let by_rate = framesample::select_by_rate(&mut video, 6, ScanStrategy::Metadata)?;
    let missing = by_rate.iter().filter(|frame| frame.is_none()).count();
    println!("Selected {} frames ({missing} unreadable)", by_rate.len());

    // Ten evenly spaced frames, seeking to each one.
    println!("Selecting 10 evenly spaced frames...");
    let mut video = VideoFile::open(&input_path)?;
    println!("Schedule: {:?}", framesample::index_schedule(video.frame_count(), 10));
    let by_count = framesample::select_by_count(&mut video, 10, ScanStrategy::Metadata)?;

    // The same ten frames from a full decode.
    println!("Selecting 10 frames from a full scan...");
    let mut video = VideoFile::open(&input_path)?;
    let scanned = framesample::select_by_count(&mut video, 10, ScanStrategy::FullScan)?;
    println!("Full scan returned {} frames", scanned.len());

    let writer = FrameWriter::new(&output_directory).with_extension("png");
    let written = writer.write("rate", &by_rate)? + writer.write("count", &by_count)?;
    println!("Wrote {written} images to {output_directory}");

    println!("Done!");
    Ok(())
}
