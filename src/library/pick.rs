use std::env;
use std::path::PathBuf;

use crate::error::PickError;

/// Turn user input into a directory to scan.
///
/// Accepts a leading `~` for the home directory. The directory must exist.
pub fn resolve_directory(input: &str) -> Result<PathBuf, PickError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(PickError::Empty);
    }

    let path = expand_home(input);
    if !path.exists() {
        return Err(PickError::Missing(path));
    }
    if !path.is_dir() {
        return Err(PickError::NotADirectory(path));
    }
    Ok(path)
}

fn expand_home(input: &str) -> PathBuf {
    let rest = if input == "~" {
        Some("")
    } else {
        input.strip_prefix("~/")
    };

    match (rest, env::var_os("HOME")) {
        (Some(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => PathBuf::from(input),
    }
}
