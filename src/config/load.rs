use std::{
    env,
    path::{Path, PathBuf},
};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then environment
/// variables (prefix `REEL__`), and falls back to struct defaults.
impl Settings {
    /// Load settings from the resolved config path and the environment.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        Self::load_from(resolve_config_path().as_deref())
    }

    /// Load settings from an explicit (optional) config file and the environment.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ::config::ConfigError> {
        Self::build(config_path, false)
    }

    /// Like `load_from`, but a missing file is an error. Used for a path the
    /// user named on the command line.
    pub fn load_file(config_path: &Path) -> Result<Self, ::config::ConfigError> {
        Self::build(Some(config_path), true)
    }

    fn build(config_path: Option<&Path>, required: bool) -> Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(::config::File::from(path).required(required));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("REEL")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        let scale = self.media.thumbnail_scale;
        if !(scale > 0.0 && scale <= 1.0) {
            return Err("media.thumbnail_scale must be in (0, 1]".to_string());
        }
        if self.media.thumbnail_offset_secs < 0.0 {
            return Err("media.thumbnail_offset_secs must be >= 0".to_string());
        }
        if self.media.probe_timeout_ms == 0 {
            return Err("media.probe_timeout_ms must be >= 1".to_string());
        }
        if self.player.command.trim().is_empty() {
            return Err("player.command must not be empty".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `REEL_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("REEL_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/reel/config.toml`
/// or `~/.config/reel/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join("reel").join("config.toml"))
}

/// Compute the default log path under `$XDG_STATE_HOME/reel/reel.log`
/// or `~/.local/state/reel/reel.log`.
pub fn default_log_path() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", ".local/state").map(|d| d.join("reel").join("reel.log"))
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(xdg) = env::var_os(var) {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}
