use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::process::Command;
use std::time::Duration;

use tracing::debug;

use crate::config::MediaSettings;
use crate::error::ExtractError;

use super::process::run_with_timeout;

/// Grab one downscaled frame of `input` into the PNG at `output`.
///
/// Tries the configured offset first and falls back to the very first frame,
/// which covers clips shorter than the offset.
pub fn capture_thumbnail(
    input: &Path,
    output: &Path,
    settings: &MediaSettings,
) -> Result<(), ExtractError> {
    let offset = settings.thumbnail_offset_secs;
    match capture_at(input, output, offset, settings) {
        Err(e) if offset > 0.0 => {
            debug!(path = %input.display(), error = %e, "thumbnail at offset failed, retrying at 0s");
            capture_at(input, output, 0.0, settings)
        }
        other => other,
    }
}

fn capture_at(
    input: &Path,
    output: &Path,
    offset: f64,
    settings: &MediaSettings,
) -> Result<(), ExtractError> {
    let mut cmd = Command::new(&settings.ffmpeg_path);
    cmd.args(thumbnail_args(input, output, offset, settings.thumbnail_scale));

    run_with_timeout(
        cmd,
        &settings.ffmpeg_path,
        Duration::from_millis(settings.probe_timeout_ms),
    )?;

    // ffmpeg exits cleanly when seeking past the end, it just writes nothing.
    match fs::metadata(output) {
        Ok(m) if m.len() > 0 => Ok(()),
        _ => Err(ExtractError::ToolFailed {
            tool: settings.ffmpeg_path.clone(),
            status: "no frame written".to_string(),
        }),
    }
}

pub(crate) fn thumbnail_args(input: &Path, output: &Path, offset: f64, scale: f64) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-v", "quiet", "-y", "-ss"]
        .into_iter()
        .map(OsString::from)
        .collect();
    args.push(format!("{offset:.3}").into());
    args.push("-i".into());
    args.push(input.as_os_str().to_owned());
    args.push("-frames:v".into());
    args.push("1".into());
    args.push("-vf".into());
    args.push(format!("scale=iw*{scale}:ih*{scale}").into());
    args.push(output.as_os_str().to_owned());
    args
}
