//! External video player control.
//!
//! Playback is delegated to a separate program (mpv by default). A
//! dedicated thread owns the child process; the process exiting cleanly is
//! the "playback completed" signal that drives loop playback.

mod thread;
mod types;

use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, SendError, Sender};
use std::thread::JoinHandle;

use crate::config::PlayerSettings;

use thread::spawn_player_thread;
pub use types::{PlayerCmd, PlayerEvent};

pub struct Player {
    tx: Sender<PlayerCmd>,
    events: Receiver<PlayerEvent>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl Player {
    pub fn new(settings: PlayerSettings) -> Self {
        let (tx, rx) = mpsc::channel::<PlayerCmd>();
        let (event_tx, events) = mpsc::channel::<PlayerEvent>();
        let handle = spawn_player_thread(settings, rx, event_tx);

        Self {
            tx,
            events,
            join: Mutex::new(Some(handle)),
        }
    }

    pub fn send(&self, cmd: PlayerCmd) -> Result<(), SendError<PlayerCmd>> {
        self.tx.send(cmd)
    }

    /// Events emitted since the last call, oldest first.
    pub fn drain_events(&self) -> Vec<PlayerEvent> {
        self.events.try_iter().collect()
    }

    /// Stop playback and wait for the player thread to finish.
    pub fn quit(&self) {
        let _ = self.send(PlayerCmd::Quit);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}
