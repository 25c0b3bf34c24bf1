use std::env;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::time::Duration;

use tracing::{error, info};

use crate::audio::{AudioEngine, RodioEngine};
use crate::config::Settings;
use crate::player::Player;

mod logging;
mod menu;
mod prompt;
mod settings;
mod view;


use menu::Menu;
use prompt::{LinePrompt, Prompt, TerminalPrompt};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    match logging::init_logging(&settings) {
        Ok(Some(path)) => info!(log = %path.display(), "chordlink starting"),
        Ok(None) => {}
        Err(e) => eprintln!("chordlink: logging disabled: {e}"),
    }

    let folder = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| settings.music_folder());

    println!("Initializing ChordLink Music Player...");

    // The engine lives for the whole process; without an output device there
    // is nothing useful to do.
    let engine = RodioEngine::open().inspect_err(|e| {
        error!(error = %e, "audio initialization failed");
    })?;
    let mut player = Player::new(engine);

    let result = if io::stdin().is_terminal() {
        let prompt = TerminalPrompt::new(Duration::from_millis(settings.ui.idle_poll_ms));
        drive(&mut player, prompt, &settings, folder)
    } else {
        let prompt = LinePrompt::new(io::stdin().lock(), io::stdout());
        drive(&mut player, prompt, &settings, folder)
    };

    player.shutdown(Duration::from_millis(settings.audio.quit_fade_out_ms));
    info!("chordlink stopped");

    result.map_err(Into::into)
}

fn drive<E: AudioEngine, P: Prompt>(
    player: &mut Player<E>,
    prompt: P,
    settings: &Settings,
    folder: PathBuf,
) -> io::Result<()> {
    let mut stdout = io::stdout();
    let styled = stdout.is_terminal();
    let result = Menu::new(player, prompt, &mut stdout, settings, folder)
        .styled(styled)
        .run();
    stdout.flush()?;
    result
}
