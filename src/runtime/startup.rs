use tracing::{debug, info, warn};

use crate::audio::{Controller, Engine};
use crate::input::Keymap;
use crate::library::{Playlist, format_mmss};

const HEADER: &str = "=== spindle ===";

/// Header, controls and playlist listing shown before playback starts.
pub fn announce(keymap: &Keymap, playlist: &Playlist) {
    info!("{HEADER}");
    info!("{}", keymap.controls_text());

    for warning in &playlist.warnings {
        warn!("Warning: {warning}");
    }

    info!("Playlist ({} total tracks):", playlist.len());
    for entry in &playlist.entries {
        debug!(
            path = %entry.path.display(),
            title = %entry.title,
            artist = entry.artist.as_deref(),
            album = entry.album.as_deref(),
            "tags"
        );
        match entry.duration {
            Some(d) => info!("\t{} [{}]", entry.display, format_mmss(d)),
            None => info!("\t{}", entry.display),
        }
    }
}

/// Start the first playable track.
///
/// `play` leaves an unopenable head where it is; advancing once skips past it
/// so startup does not sit idle on a bad first file.
pub fn start_playback<E: Engine>(controller: &mut Controller<E>) {
    controller.play();
    if !controller.is_playing() && controller.current_track().is_none() && controller.queue_size() > 0
    {
        controller.next_track();
    }
}
