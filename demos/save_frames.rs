//! Write sampled frames for every video under a directory, mirroring the
//! input layout on the output side.
//!
//! Usage:
//!   cargo run --example save_frames -- <input_dir> <output_dir> [count]

use std::error::Error;
use std::path::{Path, PathBuf};

use framesample::{FfmpegLogLevel, FrameSampler, SamplerOptions, VideoFile};

fn collect_videos(directory: &Path, videos: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(directory)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_videos(&path, videos)?;
        } else if path.extension().is_some_and(|extension| extension == "mp4") {
            videos.push(path);
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut arguments = std::env::args().skip(1);
    let input_root = PathBuf::from(arguments.next().unwrap_or_else(|| "videos".to_string()));
    let output_root = PathBuf::from(arguments.next().unwrap_or_else(|| "frames".to_string()));
    let requested_count = arguments.next().map(|value| value.parse::<i64>()).transpose()?;

    framesample::set_ffmpeg_log_level(FfmpegLogLevel::Error);

    let mut videos = Vec::new();
    collect_videos(&input_root, &mut videos)?;
    videos.sort();
    println!("Found {} videos under {}", videos.len(), input_root.display());

    let sampler = FrameSampler::new(SamplerOptions::new(6).with_height_threshold(216));

    let mut total = 0;
    for path in &videos {
        // One directory per video, named after the file.
        let output_directory = framesample::mirrored_output_directory(&input_root, path, &output_root)?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        let video = VideoFile::open(path)?;
        let written = sampler.save([(name, video)], &output_directory, requested_count)?;
        println!("{} -> {} ({written} images)", path.display(), output_directory.display());
        total += written;
    }

    println!("Done! Wrote {total} images.");
    Ok(())
}
