//! Media metadata extraction.
//!
//! Durations come from `ffprobe`, thumbnails from `ffmpeg`; both run as
//! child processes under a deadline so a broken file cannot stall a scan.

mod extract;
mod probe;
mod process;
mod thumbnail;

pub use extract::{Extractor, FfmpegExtractor, format_timestamp};
