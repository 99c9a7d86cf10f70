use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{LoggingSettings, default_log_path};

/// Where log lines go: the configured file, else the XDG state default.
pub fn log_path(settings: &LoggingSettings) -> Option<PathBuf> {
    settings.file.clone().or_else(default_log_path)
}

/// Install the global subscriber writing to the log file.
///
/// The terminal belongs to the TUI, so nothing is logged to stdout/stderr.
/// `RUST_LOG` takes precedence over `logging.level`. Returns the file in
/// use, or `None` when logging stays disabled.
pub fn init(settings: &LoggingSettings) -> Option<PathBuf> {
    let path = log_path(settings)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .ok()?;

    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_log_file_wins() {
        let settings = LoggingSettings {
            file: Some(PathBuf::from("/tmp/reel-test.log")),
            level: "debug".to_string(),
        };
        assert_eq!(log_path(&settings), Some(PathBuf::from("/tmp/reel-test.log")));
    }
}
