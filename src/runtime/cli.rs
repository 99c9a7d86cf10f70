use std::path::PathBuf;

use clap::Parser;

/// A simple TUI video browser with Vim bindings.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan on start-up
    pub dir: Option<String>,

    /// Config file to use instead of `$REEL_CONFIG_PATH` or the XDG default
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
