use std::path::Path;

use crate::config;

/// Load settings, falling back to defaults when the file is unreadable or
/// invalid. The second value explains the fallback, if one happened.
pub fn load_settings(path: Option<&Path>) -> (config::Settings, Option<String>) {
    let loaded = match path {
        Some(p) => config::Settings::load_file(p),
        None => config::Settings::load(),
    };

    match loaded {
        Ok(s) => match s.validate() {
            Ok(()) => (s, None),
            Err(msg) => (
                config::Settings::default(),
                Some(format!("invalid config, using defaults: {msg}")),
            ),
        },
        // Config is optional; failures should not prevent the app from starting.
        Err(e) => (
            config::Settings::default(),
            Some(format!("failed to load config, using defaults: {e}")),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_cli_config_falls_back_with_warning() {
        let dir = tempfile::tempdir().unwrap();
        let (settings, warning) = load_settings(Some(&dir.path().join("absent.toml")));
        assert_eq!(settings.player.command, "mpv");
        assert!(warning.unwrap().starts_with("failed to load config"));
    }
}
