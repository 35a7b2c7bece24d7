use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::{debug, error, info};

use crate::audio::{Controller, RodioEngine};
use crate::cli::Cli;
use crate::input::{Keymap, RawModeGuard, TerminalEvents};
use crate::library::build_playlist;
use crate::logging;

mod event_loop;
mod settings;
mod startup;


const NO_TRACKS: u8 = 1;
const NO_OUTPUT: u8 = 2;

pub fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // `--help` and `--version` print and exit here, before anything else starts.
    let cli = Cli::parse();

    let mut settings = settings::load_settings(cli.config.as_deref());
    if let Some(volume) = cli.volume {
        settings.audio.volume = volume;
    }
    logging::init(&settings.log);

    let keymap = Keymap::from_settings(&settings.controls)?;
    let roots = cli.playlist_roots()?;
    let playlist = build_playlist(&roots, &settings.library);
    startup::announce(&keymap, &playlist);

    if playlist.is_empty() {
        error!(
            "No tracks were found. Provide a path to song files or place song files in the current directory."
        );
        return Ok(ExitCode::from(NO_TRACKS));
    }

    let engine = match RodioEngine::open_default() {
        Ok(engine) => engine,
        Err(e) => {
            error!("{e}");
            return Ok(ExitCode::from(NO_OUTPUT));
        }
    };

    let mut controller = Controller::new(engine, settings.audio.volume);
    for entry in playlist.entries {
        controller.enqueue(entry.into_track());
    }

    let raw_mode = RawModeGuard::acquire()?;

    startup::start_playback(&mut controller);

    let mut events = TerminalEvents::new(settings.controls.event_capacity);
    let mut state = event_loop::EventLoopState::default();
    let result = event_loop::run(
        &mut controller,
        &mut events,
        &keymap,
        settings.audio.volume_step,
        Duration::from_millis(settings.audio.tick_ms),
        &mut state,
    );

    // Stop the channel and release every stream before the terminal is restored.
    drop(controller);
    drop(raw_mode);
    debug!(ticks = state.ticks, "control loop finished");

    result?;
    info!("Bye.");
    Ok(ExitCode::SUCCESS)
}
