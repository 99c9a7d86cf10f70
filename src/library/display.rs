use std::path::Path;

use super::model::MediaEntry;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Uppercased file extension, e.g. `Foo.mp4` -> `MP4`.
///
/// Returns an empty string when the path has no (UTF-8) extension.
pub fn format_from_path(path: &Path) -> String {
    path.extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_uppercase)
        .unwrap_or_default()
}

/// Display label for a path: the file name, falling back to the full path.
pub fn name_from_path(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

/// Duration in seconds with two decimals, e.g. `12.50 s`.
pub fn duration_text(secs: f64) -> String {
    format!("{:.2} s", secs.max(0.0))
}

/// Size in megabytes with two decimals, e.g. `1.50 MB`.
pub fn size_text(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / BYTES_PER_MB)
}

/// The secondary list line: `MP4 · 12.50 s · 1.50 MB`.
pub fn summary_line(entry: &MediaEntry) -> String {
    format!(
        "{} · {} · {}",
        entry.format,
        duration_text(entry.duration_secs),
        size_text(entry.size_bytes)
    )
}

/// The tertiary list line: `<created at> · <author>`.
pub fn provenance_line(entry: &MediaEntry) -> String {
    format!("{} · {}", entry.created_at, entry.author)
}

/// Multi-line details used by the metadata popup.
pub fn details_text(entry: &MediaEntry) -> String {
    format!(
        "Name: {}\nFormat: {}\nDuration: {}\nSize: {}\nCreated: {}\nAuthor: {}\nPath: {}",
        entry.name,
        entry.format,
        duration_text(entry.duration_secs),
        size_text(entry.size_bytes),
        entry.created_at,
        entry.author,
        entry.path.display()
    )
}
