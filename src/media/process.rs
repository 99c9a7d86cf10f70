//! Running external media tools under a deadline.

use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::ExtractError;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Kill `child` and wait for it so no zombie is left behind.
pub(crate) fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

/// Run `cmd` to completion and return its stdout.
///
/// Stdout is drained on a helper thread so a chatty tool cannot block on a
/// full pipe while we wait. When `timeout` elapses the child is killed and
/// `ExtractError::Timeout` is returned.
pub(crate) fn run_with_timeout(
    mut cmd: Command,
    tool: &str,
    timeout: Duration,
) -> Result<Vec<u8>, ExtractError> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null());

    let mut child = cmd.spawn().map_err(|source| ExtractError::Spawn {
        tool: tool.to_string(),
        source,
    })?;

    let stdout = child.stdout.take();
    let reader = thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut out) = stdout {
            let _ = out.read_to_end(&mut buf);
        }
        buf
    });

    let deadline = Instant::now() + timeout;
    let status = loop {
        let polled = match child.try_wait() {
            Ok(polled) => polled,
            Err(e) => {
                reap(&mut child);
                return Err(e.into());
            }
        };
        match polled {
            Some(status) => break status,
            None if Instant::now() >= deadline => {
                reap(&mut child);
                // The reader finishes on its own once the pipe closes.
                return Err(ExtractError::Timeout {
                    tool: tool.to_string(),
                    timeout_ms: timeout.as_millis() as u64,
                });
            }
            None => thread::sleep(POLL_INTERVAL),
        }
    };

    let stdout = reader.join().unwrap_or_default();
    if !status.success() {
        return Err(ExtractError::ToolFailed {
            tool: tool.to_string(),
            status: status.to_string(),
        });
    }
    Ok(stdout)
}
