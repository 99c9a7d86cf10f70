use std::sync::Arc;

use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::media::{Extractor, FfmpegExtractor};
use crate::player::Player;

mod cli;
mod event_loop;
mod logging;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = cli::Cli::parse();
    let (settings, config_warning) = settings::load_settings(cli.config.as_deref());

    let log_file = logging::init(&settings.logging);
    if let Some(msg) = &config_warning {
        eprintln!("reel: {msg}");
        warn!("{msg}");
    }
    info!(log_file = ?log_file, "reel starting");

    let extractor: Arc<dyn Extractor> = Arc::new(FfmpegExtractor::new(settings.media.clone()));
    let player = Player::new(settings.player.clone());
    let mut app = App::new(settings.library.clone(), extractor);

    startup::apply_startup_defaults(&mut app, &settings, cli.dir.as_deref());

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &player);

    player.quit();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("reel stopped");
    run_result
}
