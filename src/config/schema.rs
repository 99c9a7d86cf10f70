use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/reel/config.toml` or `~/.config/reel/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `REEL__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub media: MediaSettings,
    pub player: PlayerSettings,
    pub playback: PlaybackSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as video (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec![
                "mp4".into(),
                "mkv".into(),
                "avi".into(),
                "mov".into(),
                "webm".into(),
            ],
            follow_links: true,
            include_hidden: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MediaSettings {
    pub ffprobe_path: String,
    pub ffmpeg_path: String,
    /// Deadline for each ffprobe/ffmpeg invocation (milliseconds).
    /// A file whose tools do not finish in time is skipped.
    pub probe_timeout_ms: u64,
    /// Where to grab the thumbnail frame from (seconds into the video).
    pub thumbnail_offset_secs: f64,
    /// Thumbnail size relative to the source frame, in `(0, 1]`.
    pub thumbnail_scale: f64,
    /// Set to false to skip thumbnail capture entirely.
    pub thumbnails: bool,
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            ffprobe_path: "ffprobe".to_string(),
            ffmpeg_path: "ffmpeg".to_string(),
            probe_timeout_ms: 10_000,
            thumbnail_offset_secs: 1.0,
            thumbnail_scale: 0.5,
            thumbnails: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// External player executable. The video path is appended to `args`.
    pub command: String,
    pub args: Vec<String>,
    /// Start playback as soon as an entry is selected.
    pub autoplay: bool,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            command: "mpv".to_string(),
            args: vec!["--really-quiet".to_string()],
            autoplay: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Whether loop playback starts enabled.
    pub looping: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Render the thumbnail of the selected video in the player pane.
    pub show_thumbnails: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ Roll the reel ~ ".to_string(),
            show_thumbnails: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log file. Defaults to `$XDG_STATE_HOME/reel/reel.log`.
    pub file: Option<PathBuf>,
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}
