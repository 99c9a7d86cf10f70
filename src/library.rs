//! The video library: discovery, state, and loop playback.

pub mod display;
mod looping;
mod model;
mod pick;
mod scan;
mod store;
mod worker;

pub use looping::{LoopController, LoopState, Subscription};
pub use model::{MediaEntry, Thumbnail, UNKNOWN_AUTHOR, UNKNOWN_CREATED_AT};
pub use pick::resolve_directory;
pub use store::LibraryStore;
pub use worker::{ScanEvent, ScanWorker};

#[cfg(test)]
mod tests;
