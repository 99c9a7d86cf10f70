//! Error types for each failure domain.
//!
//! Per-file decode problems (`ExtractError`) never leave the scanner; a
//! `ScanError` aborts a whole scan; `PickError` and `PlayerError` end up in
//! a single user-facing alert.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {status}")]
    ToolFailed { tool: String, status: String },

    #[error("{tool} did not finish within {timeout_ms}ms")]
    Timeout { tool: String, timeout_ms: u64 },

    #[error("failed to parse probe output: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("{0}")]
    Walk(#[from] walkdir::Error),

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("scan worker stopped unexpectedly")]
    WorkerLost,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PickError {
    #[error("no directory given")]
    Empty,

    #[error("{} does not exist", .0.display())]
    Missing(PathBuf),

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),
}

#[derive(Error, Debug)]
pub enum PlayerError {
    #[error("failed to start player `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("player exited with {0}")]
    Exited(String),
}
