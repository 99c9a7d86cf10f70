//! The session's library state and the intents that mutate it.

use tracing::debug;

use super::model::MediaEntry;

/// Discovered entries plus the selection, loading and looping flags.
///
/// Fields are private; everything goes through the intent methods below.
#[derive(Debug, Default)]
pub struct LibraryStore {
    entries: Vec<MediaEntry>,
    selected: Option<MediaEntry>,
    is_loading: bool,
    is_looping: bool,
}

impl LibraryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a scan as running.
    pub fn begin_scan(&mut self) {
        self.is_loading = true;
    }

    /// Replace the entry list wholesale and clear the loading flag.
    ///
    /// The selection is left as is, even when it no longer appears in the
    /// new list.
    pub fn complete_scan(&mut self, entries: Vec<MediaEntry>) {
        self.entries = entries;
        self.is_loading = false;
    }

    /// Clear the loading flag after a failed scan; entries stay untouched.
    pub fn fail_scan(&mut self) {
        self.is_loading = false;
    }

    /// Select `entry`. Returns whether it belongs to the current list.
    pub fn select(&mut self, entry: MediaEntry) -> bool {
        let known = self.entries.contains(&entry);
        if !known {
            debug!(path = %entry.path.display(), "selecting an entry outside the current list");
        }
        self.selected = Some(entry);
        known
    }

    pub fn toggle_loop(&mut self) {
        self.is_looping = !self.is_looping;
    }

    pub fn entries(&self) -> &[MediaEntry] {
        &self.entries
    }

    pub fn selected(&self) -> Option<&MediaEntry> {
        self.selected.as_ref()
    }

    /// Position of the selected entry in the current list, if it is there.
    pub fn selected_index(&self) -> Option<usize> {
        let selected = self.selected.as_ref()?;
        self.entries.iter().position(|e| e == selected)
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_looping(&self) -> bool {
        self.is_looping
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
