use crate::app::App;
use crate::config;

/// Apply configured defaults and kick off the initial scan, if a directory
/// was given on the command line.
pub fn apply_startup_defaults(app: &mut App, settings: &config::Settings, dir: Option<&str>) {
    app.autoplay = settings.player.autoplay;
    app.set_looping(settings.playback.looping);

    if let Some(dir) = dir {
        app.pick_directory(dir);
    }
}
