use std::path::Path;
use std::process::Command;
use std::time::Duration;

use serde::Deserialize;

use crate::config::MediaSettings;
use crate::error::ExtractError;

use super::process::run_with_timeout;

#[derive(Debug, Default, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    format: Option<ProbeFormat>,
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    codec_type: Option<String>,
    duration: Option<String>,
}

/// Ask `ffprobe` for the duration of `path` in seconds.
pub fn probe_duration(path: &Path, settings: &MediaSettings) -> Result<f64, ExtractError> {
    let mut cmd = Command::new(&settings.ffprobe_path);
    cmd.args([
        "-v",
        "quiet",
        "-print_format",
        "json",
        "-show_entries",
        "format=duration:stream=codec_type,duration",
    ])
    .arg(path);

    let stdout = run_with_timeout(
        cmd,
        &settings.ffprobe_path,
        Duration::from_millis(settings.probe_timeout_ms),
    )?;
    parse_duration(&stdout)
}

/// Extract a duration from ffprobe's JSON output.
///
/// The container duration wins; otherwise the first video stream's, then any
/// stream's. Non-finite or non-positive values count as missing. A probe that
/// succeeded without any usable duration (live recordings report `N/A` or
/// infinity) yields `0.0`.
pub(crate) fn parse_duration(json: &[u8]) -> Result<f64, ExtractError> {
    let probe: ProbeOutput = serde_json::from_slice(json)?;

    let container = probe
        .format
        .as_ref()
        .and_then(|f| f.duration.as_deref())
        .and_then(parse_secs);

    let video_stream = || {
        probe
            .streams
            .iter()
            .filter(|s| s.codec_type.as_deref() == Some("video"))
            .find_map(|s| s.duration.as_deref().and_then(parse_secs))
    };
    let any_stream = || {
        probe
            .streams
            .iter()
            .find_map(|s| s.duration.as_deref().and_then(parse_secs))
    };

    Ok(container
        .or_else(video_stream)
        .or_else(any_stream)
        .unwrap_or(0.0))
}

fn parse_secs(s: &str) -> Option<f64> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}
