use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::PlayerSettings;
use crate::error::PlayerError;

use super::types::{PlayerCmd, PlayerEvent};

const POLL_INTERVAL: Duration = Duration::from_millis(200);

struct Playing {
    path: PathBuf,
    child: Child,
}

fn spawn_child(settings: &PlayerSettings, path: &Path) -> Result<Child, PlayerError> {
    Command::new(&settings.command)
        .args(&settings.args)
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| PlayerError::Spawn {
            command: settings.command.clone(),
            source,
        })
}

fn do_stop(current: &mut Option<Playing>) {
    if let Some(mut playing) = current.take() {
        debug!(path = %playing.path.display(), "stopping player");
        let _ = playing.child.kill();
        let _ = playing.child.wait();
    }
}

fn do_play(
    path: PathBuf,
    settings: &PlayerSettings,
    current: &mut Option<Playing>,
    events: &Sender<PlayerEvent>,
) {
    do_stop(current);

    match spawn_child(settings, &path) {
        Ok(child) => {
            info!(path = %path.display(), "playing");
            *current = Some(Playing {
                path: path.clone(),
                child,
            });
            let _ = events.send(PlayerEvent::Started(path));
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "player failed to start");
            let _ = events.send(PlayerEvent::Failed {
                path,
                reason: e.to_string(),
            });
        }
    }
}

/// Check whether the current child has exited and report how.
fn check_finished(current: &mut Option<Playing>, events: &Sender<PlayerEvent>) {
    let exited = match current.as_mut() {
        Some(playing) => playing.child.try_wait(),
        None => return,
    };

    match exited {
        Ok(None) => {}
        Ok(Some(status)) => {
            let Some(playing) = current.take() else {
                return;
            };
            if status.success() {
                info!(path = %playing.path.display(), "playback completed");
                let _ = events.send(PlayerEvent::Completed(playing.path));
            } else {
                let reason = PlayerError::Exited(status.to_string()).to_string();
                warn!(path = %playing.path.display(), %reason, "player failed");
                let _ = events.send(PlayerEvent::Failed {
                    path: playing.path,
                    reason,
                });
            }
        }
        Err(e) => {
            warn!(error = %e, "lost track of player process");
            do_stop(current);
        }
    }
}

pub(super) fn spawn_player_thread(
    settings: PlayerSettings,
    rx: Receiver<PlayerCmd>,
    events: Sender<PlayerEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut current: Option<Playing> = None;

        loop {
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(PlayerCmd::Play(path)) => do_play(path, &settings, &mut current, &events),
                Ok(PlayerCmd::Stop) => do_stop(&mut current),
                Ok(PlayerCmd::Quit) | Err(RecvTimeoutError::Disconnected) => {
                    do_stop(&mut current);
                    break;
                }
                // periodic check for end of playback
                Err(RecvTimeoutError::Timeout) => check_finished(&mut current, &events),
            }
        }
    })
}
