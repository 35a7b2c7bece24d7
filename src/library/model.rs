use std::path::PathBuf;
use std::time::Duration;

use crate::audio::Track;
use crate::error::PlaylistError;

/// A playable file found while building the playlist.
#[derive(Debug, Clone)]
pub struct TrackInfo {
    pub path: PathBuf,
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub duration: Option<Duration>,
    pub display: String,
}

impl TrackInfo {
    pub fn into_track<S>(self) -> Track<S> {
        Track::new(self.path).with_label(self.display)
    }
}

/// Ordered playable files plus the per-item problems found along the way.
#[derive(Debug, Default)]
pub struct Playlist {
    pub entries: Vec<TrackInfo>,
    pub warnings: Vec<PlaylistError>,
}

impl Playlist {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
