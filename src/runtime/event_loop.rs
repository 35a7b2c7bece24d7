use std::io;
use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use crate::audio::{Controller, Engine, PlaybackState};
use crate::input::{Action, EventSource, Keymap};

/// State tracked by the control loop across ticks.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Set by the quit key or when the playlist runs out.
    pub quit: bool,
    pub ticks: u64,
}

/// Tick until quit is requested or nothing is left to play.
pub fn run<E: Engine, S: EventSource>(
    controller: &mut Controller<E>,
    events: &mut S,
    keymap: &Keymap,
    volume_step: f32,
    idle: Duration,
    state: &mut EventLoopState,
) -> io::Result<()> {
    while !state.quit {
        tick(controller, events, keymap, volume_step, state)?;
        if !state.quit {
            thread::sleep(idle);
        }
    }
    Ok(())
}

/// One pass: engine housekeeping (finish notifications included), input,
/// then the end-of-playlist check.
pub fn tick<E: Engine, S: EventSource>(
    controller: &mut Controller<E>,
    events: &mut S,
    keymap: &Keymap,
    volume_step: f32,
    state: &mut EventLoopState,
) -> io::Result<()> {
    state.ticks += 1;
    controller.update();
    events.update()?;

    while let Some(event) = events.poll() {
        let Some(action) = keymap.action_for(&event) else {
            continue;
        };
        debug!(
            ?action,
            waited = ?event.timestamp.elapsed(),
            state = %controller.state(),
            "key action"
        );
        handle_action(action, controller, volume_step, state);
        if state.quit {
            return Ok(());
        }
    }

    if controller.current_track().is_none() && controller.queue_size() == 0 {
        info!("Nothing left to play.");
        state.quit = true;
    }
    Ok(())
}

fn handle_action<E: Engine>(
    action: Action,
    controller: &mut Controller<E>,
    volume_step: f32,
    state: &mut EventLoopState,
) {
    match action {
        Action::Quit => state.quit = true,
        Action::TogglePlayback => match controller.state() {
            PlaybackState::Playing => controller.pause(),
            PlaybackState::Paused | PlaybackState::Stopped => controller.play(),
        },
        Action::Next => controller.next_track(),
        Action::Previous => controller.previous_track(),
        Action::Stop => controller.stop(),
        // Both are no-ops while no channel is held.
        Action::VolumeUp => controller.set_volume(controller.get_volume() + volume_step),
        Action::VolumeDown => controller.set_volume(controller.get_volume() - volume_step),
    }
}
