//! Auto-advance through the library when playback finishes.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::model::MediaEntry;
use super::store::LibraryStore;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LoopState {
    #[default]
    Idle,
    Looping,
}

/// Interest in the completion of one specific resource.
///
/// Only completions of `resource` are acted on; anything else is stale.
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription {
    resource: PathBuf,
}

impl Subscription {
    fn new(resource: &Path) -> Self {
        debug!(resource = %resource.display(), "watching for playback completion");
        Self {
            resource: resource.to_path_buf(),
        }
    }

    pub fn resource(&self) -> &Path {
        &self.resource
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        debug!(resource = %self.resource.display(), "stopped watching");
    }
}

/// Two-state controller: while `Looping`, each completion of the selected
/// entry selects the next one, wrapping at the end of the list.
#[derive(Debug, Default)]
pub struct LoopController {
    state: LoopState,
    subscription: Option<Subscription>,
}

impl LoopController {
    /// Start in the state matching `store.is_looping()`.
    pub fn new(store: &LibraryStore) -> Self {
        let mut controller = Self::default();
        controller.reconcile(store);
        controller
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn subscription(&self) -> Option<&Subscription> {
        self.subscription.as_ref()
    }

    /// Flip looping on the store and follow it.
    pub fn toggle(&mut self, store: &mut LibraryStore) {
        store.toggle_loop();
        self.reconcile(store);
    }

    /// Bring state and subscription in line with the store: subscribed to
    /// the selected resource while looping, unsubscribed otherwise.
    pub fn reconcile(&mut self, store: &LibraryStore) {
        self.state = if store.is_looping() {
            LoopState::Looping
        } else {
            LoopState::Idle
        };

        let wanted = match (self.state, store.selected()) {
            (LoopState::Looping, Some(entry)) => Some(entry.resource()),
            _ => None,
        };

        match wanted {
            Some(resource) => {
                let current = self.subscription.as_ref().map(Subscription::resource);
                if current != Some(resource) {
                    // Release the old one before taking the new one.
                    self.subscription = None;
                    self.subscription = Some(Subscription::new(resource));
                }
            }
            None => self.subscription = None,
        }
    }

    /// Handle the end of playback of `resource`.
    ///
    /// Returns the newly selected entry when the loop advanced. A selection
    /// that is no longer in the list restarts from the first entry.
    pub fn on_playback_completed(
        &mut self,
        resource: &Path,
        store: &mut LibraryStore,
    ) -> Option<MediaEntry> {
        let subscribed = self
            .subscription
            .as_ref()
            .is_some_and(|s| s.resource() == resource);
        if self.state != LoopState::Looping || !subscribed || store.is_empty() {
            debug!(resource = %resource.display(), "ignoring completion");
            return None;
        }

        let next_index = match store.selected_index() {
            Some(i) => (i + 1) % store.len(),
            None => 0,
        };
        let next = store.entries()[next_index].clone();
        store.select(next.clone());
        self.reconcile(store);
        Some(next)
    }
}
