use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::error::ScanError;
use crate::media::Extractor;

use super::model::MediaEntry;

fn normalized_extensions(settings: &LibrarySettings) -> Vec<String> {
    settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

fn is_video_file(path: &Path, exts: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Walk `root` depth-first and extract every video file found, in traversal
/// order (siblings sorted by file name).
///
/// Files the extractor rejects are skipped. Any traversal error aborts the
/// whole scan and discards what was found so far. `on_progress` receives
/// the running number of accepted entries.
pub fn scan(
    root: &Path,
    settings: &LibrarySettings,
    extractor: &dyn Extractor,
    mut on_progress: impl FnMut(usize),
) -> Result<Vec<MediaEntry>, ScanError> {
    if let Ok(meta) = fs::metadata(root) {
        if !meta.is_dir() {
            return Err(ScanError::NotADirectory(root.to_path_buf()));
        }
    }

    let exts = normalized_extensions(settings);
    let mut walker = WalkDir::new(root)
        .follow_links(settings.follow_links)
        .sort_by_file_name();
    if let Some(d) = settings.max_depth {
        walker = walker.max_depth(d);
    }

    let mut entries: Vec<MediaEntry> = Vec::new();
    let mut skipped = 0usize;

    for item in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
    {
        let item = item?;
        if !item.file_type().is_file() || !is_video_file(item.path(), &exts) {
            continue;
        }

        match extractor.extract(item.path()) {
            Ok(entry) => {
                entries.push(entry);
                on_progress(entries.len());
            }
            Err(e) => {
                skipped += 1;
                debug!(path = %item.path().display(), error = %e, "skipping undecodable file");
            }
        }
    }

    if entries.is_empty() && skipped > 0 {
        warn!(root = %root.display(), skipped, "no video could be decoded, check media.ffprobe_path");
    }
    info!(
        root = %root.display(),
        found = entries.len(),
        skipped,
        "scan finished"
    );
    Ok(entries)
}
