use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Placeholder used when the modification time cannot be read.
pub const UNKNOWN_CREATED_AT: &str = "unknown";
/// Videos carry no author metadata we extract; every entry gets this.
pub const UNKNOWN_AUTHOR: &str = "unknown author";

/// One discovered video file and its derived metadata.
///
/// Entries are identified by `path`: two entries are equal when they point
/// at the same file, whatever their other fields say.
#[derive(Clone, Debug)]
pub struct MediaEntry {
    pub path: PathBuf,
    pub name: String,
    pub format: String,
    pub duration_secs: f64,
    pub size_bytes: u64,
    pub created_at: String,
    pub author: String,
    pub thumbnail: Option<Arc<Thumbnail>>,
}

impl PartialEq for MediaEntry {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for MediaEntry {}

impl MediaEntry {
    /// The path the player opens for this entry.
    pub fn resource(&self) -> &Path {
        &self.path
    }
}

/// A captured still frame stored as a PNG in the session thumbnail
/// directory. The file is removed once the last entry holding it is dropped.
#[derive(Debug)]
pub struct Thumbnail {
    path: PathBuf,
}

impl Thumbnail {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for Thumbnail {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::debug!(path = %self.path.display(), error = %e, "failed to remove thumbnail");
            }
        }
    }
}
