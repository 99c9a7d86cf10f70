use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::SystemTime;

use chrono::{DateTime, Local};
use tempfile::TempDir;
use tracing::{debug, warn};

use crate::config::MediaSettings;
use crate::error::ExtractError;
use crate::library::display::{format_from_path, name_from_path};
use crate::library::{MediaEntry, Thumbnail, UNKNOWN_AUTHOR, UNKNOWN_CREATED_AT};

use super::probe::probe_duration;
use super::thumbnail::capture_thumbnail;

/// Turns one video file into a `MediaEntry`.
///
/// An error means the file could not be opened or decoded; the scanner
/// leaves such files out of the library.
pub trait Extractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<MediaEntry, ExtractError>;
}

/// Extractor backed by the `ffprobe` and `ffmpeg` command line tools.
///
/// Thumbnails are written into a private temporary directory that lives as
/// long as the extractor.
pub struct FfmpegExtractor {
    settings: MediaSettings,
    thumbs_dir: Option<TempDir>,
    next_thumb: AtomicU64,
}

impl FfmpegExtractor {
    pub fn new(settings: MediaSettings) -> Self {
        let thumbs_dir = if settings.thumbnails {
            match tempfile::Builder::new().prefix("reel-thumbs-").tempdir() {
                Ok(dir) => Some(dir),
                Err(e) => {
                    warn!(error = %e, "cannot create thumbnail directory, thumbnails disabled");
                    None
                }
            }
        } else {
            None
        };

        Self {
            settings,
            thumbs_dir,
            next_thumb: AtomicU64::new(0),
        }
    }

    fn thumbnail_for(&self, path: &Path) -> Option<Arc<Thumbnail>> {
        let dir = self.thumbs_dir.as_ref()?;
        let n = self.next_thumb.fetch_add(1, Ordering::Relaxed);
        // Owning the file before capture means a failed attempt cleans up after itself.
        let thumb = Thumbnail::new(dir.path().join(format!("{n:06}.png")));

        match capture_thumbnail(path, thumb.path(), &self.settings) {
            Ok(()) => Some(Arc::new(thumb)),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no thumbnail");
                None
            }
        }
    }
}

impl Extractor for FfmpegExtractor {
    fn extract(&self, path: &Path) -> Result<MediaEntry, ExtractError> {
        let meta = fs::metadata(path)?;
        let created_at = meta
            .modified()
            .map(format_timestamp)
            .unwrap_or_else(|_| UNKNOWN_CREATED_AT.to_string());

        let (duration, thumbnail) = thread::scope(|s| {
            let thumb = s.spawn(|| self.thumbnail_for(path));
            let duration = probe_duration(path, &self.settings);
            (duration, thumb.join().unwrap_or(None))
        });

        Ok(MediaEntry {
            path: path.to_path_buf(),
            name: name_from_path(path),
            format: format_from_path(path),
            duration_secs: duration?,
            size_bytes: meta.len(),
            created_at,
            author: UNKNOWN_AUTHOR.to_string(),
            thumbnail,
        })
    }
}

/// Local wall-clock rendering of a file timestamp.
pub fn format_timestamp(t: SystemTime) -> String {
    DateTime::<Local>::from(t)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
