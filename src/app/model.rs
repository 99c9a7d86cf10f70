//! Application model types: `App` and `PlaybackState`.
//!
//! `App` owns the library store and the loop controller and is only touched
//! from the event loop thread. Views read it; key handlers call its intent
//! methods.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::config::LibrarySettings;
use crate::library::{
    LibraryStore, LoopController, LoopState, MediaEntry, ScanEvent, ScanWorker, resolve_directory,
};
use crate::media::Extractor;

/// What the player pane reports for the selected entry.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Finished,
}

/// The main application model.
pub struct App {
    store: LibraryStore,
    looping: LoopController,
    extractor: Arc<dyn Extractor>,
    library_settings: LibrarySettings,
    scan: Option<ScanWorker>,

    /// Row under the cursor in the list pane.
    pub cursor: usize,
    /// Directory of the last successful scan.
    pub current_dir: Option<PathBuf>,
    /// Entries found so far by the running scan.
    pub scan_found: usize,
    pub playback: PlaybackState,
    pub autoplay: bool,

    pub alert: Option<String>,
    pub status_message: Option<String>,
    /// Folder prompt input; `Some` while the prompt is open.
    pub prompt: Option<String>,
    pub metadata_window: bool,
}

impl App {
    pub fn new(library_settings: LibrarySettings, extractor: Arc<dyn Extractor>) -> Self {
        let store = LibraryStore::new();
        let looping = LoopController::new(&store);
        Self {
            store,
            looping,
            extractor,
            library_settings,
            scan: None,

            cursor: 0,
            current_dir: None,
            scan_found: 0,
            playback: PlaybackState::Stopped,
            autoplay: true,

            alert: None,
            status_message: None,
            prompt: None,
            metadata_window: false,
        }
    }

    pub fn library(&self) -> &LibraryStore {
        &self.store
    }

    pub fn loop_state(&self) -> LoopState {
        self.looping.state()
    }

    /// Root of the scan in progress, if any.
    pub fn scanning_dir(&self) -> Option<&Path> {
        self.scan.as_ref().map(ScanWorker::root)
    }

    /// Start scanning `root` in the background.
    ///
    /// Only one scan runs at a time; a request made while loading is
    /// rejected and `false` is returned.
    pub fn request_scan(&mut self, root: PathBuf) -> bool {
        if self.store.is_loading() {
            warn!(root = %root.display(), "scan already running, ignoring request");
            self.status_message = Some("A scan is already running".to_string());
            return false;
        }

        self.store.begin_scan();
        self.scan_found = 0;
        self.status_message = None;
        self.scan = Some(ScanWorker::spawn(
            root,
            self.library_settings.clone(),
            self.extractor.clone(),
        ));
        true
    }

    /// Apply events from the running scan. Returns `true` once it has ended.
    pub fn poll_scan(&mut self) -> bool {
        let Some(worker) = self.scan.as_ref() else {
            return false;
        };
        let root = worker.root().to_path_buf();

        for event in worker.poll() {
            match event {
                ScanEvent::Progress { found } => self.scan_found = found,
                ScanEvent::Finished(Ok(entries)) => {
                    info!(root = %root.display(), count = entries.len(), "library replaced");
                    self.store.complete_scan(entries);
                    self.current_dir = Some(root);
                    self.cursor = self.store.selected_index().unwrap_or(0);
                    self.looping.reconcile(&self.store);
                    self.scan = None;
                    return true;
                }
                ScanEvent::Finished(Err(e)) => {
                    error!(root = %root.display(), error = %e, "scan failed");
                    self.store.fail_scan();
                    self.raise_alert(format!("Failed to read directory: {e}"));
                    self.scan = None;
                    return true;
                }
            }
        }
        false
    }

    /// The entry under the cursor.
    pub fn cursor_entry(&self) -> Option<&MediaEntry> {
        self.store.entries().get(self.cursor)
    }

    /// Select the entry under the cursor and return it for playback.
    pub fn select_at_cursor(&mut self) -> Option<MediaEntry> {
        let entry = self.cursor_entry()?.clone();
        self.store.select(entry.clone());
        self.looping.reconcile(&self.store);
        self.playback = PlaybackState::Stopped;
        Some(entry)
    }

    pub fn toggle_loop(&mut self) {
        self.looping.toggle(&mut self.store);
    }

    /// Bring looping to `on` (used for the configured default).
    pub fn set_looping(&mut self, on: bool) {
        if self.store.is_looping() != on {
            self.toggle_loop();
        }
    }

    pub fn playback_started(&mut self, path: &Path) {
        if self.is_selected(path) {
            self.playback = PlaybackState::Playing;
        }
    }

    pub fn playback_stopped(&mut self) {
        self.playback = PlaybackState::Stopped;
    }

    /// The player finished `path`. When looping advances, the cursor
    /// follows and the next entry is returned for playback.
    pub fn playback_completed(&mut self, path: &Path) -> Option<MediaEntry> {
        if self.is_selected(path) {
            self.playback = PlaybackState::Finished;
        }

        let next = self.looping.on_playback_completed(path, &mut self.store)?;
        if let Some(i) = self.store.selected_index() {
            self.cursor = i;
        }
        self.playback = PlaybackState::Stopped;
        Some(next)
    }

    pub fn playback_failed(&mut self, path: &Path, reason: &str) {
        if self.is_selected(path) {
            self.playback = PlaybackState::Stopped;
        }
        self.raise_alert(format!("Playback failed: {reason}"));
    }

    fn is_selected(&self, path: &Path) -> bool {
        self.store.selected().is_some_and(|e| e.path == path)
    }

    pub fn raise_alert(&mut self, msg: String) {
        self.alert = Some(msg);
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Open the folder prompt, pre-filled with the current directory.
    pub fn open_prompt(&mut self) {
        let initial = self
            .current_dir
            .as_ref()
            .map(|d| d.display().to_string())
            .unwrap_or_default();
        self.prompt = Some(initial);
    }

    pub fn push_prompt_char(&mut self, c: char) {
        if let Some(p) = self.prompt.as_mut() {
            p.push(c);
        }
    }

    pub fn pop_prompt_char(&mut self) {
        if let Some(p) = self.prompt.as_mut() {
            p.pop();
        }
    }

    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
    }

    /// Close the prompt and scan the directory it names. An unusable path
    /// raises an alert instead.
    pub fn submit_prompt(&mut self) -> bool {
        let Some(input) = self.prompt.take() else {
            return false;
        };
        self.pick_directory(&input)
    }

    /// Resolve `input` to a directory and scan it.
    pub fn pick_directory(&mut self, input: &str) -> bool {
        match resolve_directory(input) {
            Ok(dir) => self.request_scan(dir),
            Err(e) => {
                warn!(input, error = %e, "directory pick refused");
                self.raise_alert(format!("Cannot open folder: {e}"));
                false
            }
        }
    }

    pub fn toggle_metadata_window(&mut self) {
        self.metadata_window = !self.metadata_window;
    }

    /// Move the cursor down, wrapping to the top.
    pub fn next(&mut self) {
        let len = self.store.len();
        if len > 0 {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    /// Move the cursor up, wrapping to the bottom.
    pub fn prev(&mut self) {
        let len = self.store.len();
        if len > 0 {
            self.cursor = if self.cursor == 0 || self.cursor >= len {
                len - 1
            } else {
                self.cursor - 1
            };
        }
    }

    pub fn top(&mut self) {
        self.cursor = 0;
    }

    pub fn bottom(&mut self) {
        self.cursor = self.store.len().saturating_sub(1);
    }
}
