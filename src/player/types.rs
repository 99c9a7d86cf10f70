//! Commands and events exchanged with the player thread.

use std::path::PathBuf;

#[derive(Debug)]
pub enum PlayerCmd {
    /// Start playing the file, replacing whatever is playing.
    Play(PathBuf),
    /// Stop playback immediately.
    Stop,
    /// Stop playback and end the player thread.
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    /// The external player was launched for this file.
    Started(PathBuf),
    /// The file played to the end (the player exited cleanly).
    Completed(PathBuf),
    /// The player could not be launched or exited with an error.
    Failed { path: PathBuf, reason: String },
}
