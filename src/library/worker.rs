use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use tracing::info;

use crate::config::LibrarySettings;
use crate::error::ScanError;
use crate::media::Extractor;

use super::model::MediaEntry;
use super::scan::scan;

#[derive(Debug)]
pub enum ScanEvent {
    /// Number of entries accepted so far.
    Progress { found: usize },
    /// The scan ended; no further events follow.
    Finished(Result<Vec<MediaEntry>, ScanError>),
}

/// One scan running on a background thread.
///
/// The worker only reports; applying the result to the library is up to the
/// owner of the store.
pub struct ScanWorker {
    root: PathBuf,
    rx: Receiver<ScanEvent>,
}

impl ScanWorker {
    pub fn spawn(
        root: PathBuf,
        settings: LibrarySettings,
        extractor: Arc<dyn Extractor>,
    ) -> Self {
        let (tx, rx) = mpsc::channel::<ScanEvent>();
        let thread_root = root.clone();

        thread::spawn(move || {
            info!(root = %thread_root.display(), "scan started");
            let progress_tx = tx.clone();
            let result = scan(&thread_root, &settings, extractor.as_ref(), |found| {
                let _ = progress_tx.send(ScanEvent::Progress { found });
            });
            let _ = tx.send(ScanEvent::Finished(result));
        });

        Self { root, rx }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Drain pending events without blocking.
    ///
    /// Stops after `Finished`. A thread that died without finishing shows
    /// up as `Finished(Err(ScanError::WorkerLost))`.
    pub fn poll(&self) -> Vec<ScanEvent> {
        let mut events = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(ev) => {
                    let done = matches!(ev, ScanEvent::Finished(_));
                    events.push(ev);
                    if done {
                        break;
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    events.push(ScanEvent::Finished(Err(ScanError::WorkerLost)));
                    break;
                }
            }
        }
        events
    }
}
