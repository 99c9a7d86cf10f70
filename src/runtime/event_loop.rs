use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::warn;

use crate::app::App;
use crate::config;
use crate::library::MediaEntry;
use crate::player::{Player, PlayerCmd, PlayerEvent};
use crate::ui::{self, PreviewCache};

/// State tracked by the runtime event loop across iterations.
#[derive(Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    pub preview: PreviewCache,
}

/// Main terminal event loop: applies scan progress and player events,
/// draws, and handles input. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    player: &Player,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = EventLoopState::default();

    loop {
        app.poll_scan();

        for ev in player.drain_events() {
            handle_player_event(ev, app, player);
        }

        if settings.ui.show_thumbnails {
            let thumb = app
                .library()
                .selected()
                .and_then(|e| e.thumbnail.as_deref())
                .map(|t| t.path());
            state.preview.sync(thumb);
        }

        terminal.draw(|f| ui::draw(f, app, state.preview.get(), &settings.ui))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, app, player, &mut state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn play(player: &Player, entry: &MediaEntry) {
    if player.send(PlayerCmd::Play(entry.path.clone())).is_err() {
        warn!(path = %entry.path.display(), "player thread is gone");
    }
}

fn handle_player_event(ev: PlayerEvent, app: &mut App, player: &Player) {
    match ev {
        PlayerEvent::Started(path) => app.playback_started(&path),
        PlayerEvent::Completed(path) => {
            if let Some(next) = app.playback_completed(&path) {
                play(player, &next);
            }
        }
        PlayerEvent::Failed { path, reason } => app.playback_failed(&path, &reason),
    }
}

fn handle_key_event(
    key: KeyEvent,
    app: &mut App,
    player: &Player,
    state: &mut EventLoopState,
) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if app.alert.is_some() {
        app.dismiss_alert();
        return false;
    }

    if app.prompt.is_some() {
        state.pending_gg = false;
        match key.code {
            KeyCode::Esc => app.cancel_prompt(),
            KeyCode::Enter => {
                app.submit_prompt();
            }
            KeyCode::Backspace => app.pop_prompt_char(),
            KeyCode::Char(c) if !c.is_control() => app.push_prompt_char(c),
            _ => {}
        }
        return false;
    }

    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Esc if app.metadata_window => app.toggle_metadata_window(),
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.top();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => app.bottom(),
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Enter => {
            if let Some(entry) = app.select_at_cursor() {
                if app.autoplay {
                    play(player, &entry);
                } else {
                    let _ = player.send(PlayerCmd::Stop);
                }
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            if let Some(entry) = app.library().selected().cloned() {
                play(player, &entry);
            }
        }
        KeyCode::Char('x') => {
            let _ = player.send(PlayerCmd::Stop);
            app.playback_stopped();
        }
        KeyCode::Char('o') => app.open_prompt(),
        KeyCode::Char('r') => app.toggle_loop(),
        KeyCode::Char('K') => app.toggle_metadata_window(),
        _ => {}
    }

    false
}
