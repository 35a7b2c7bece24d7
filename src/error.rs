//! Error types shared across the player.
//!
//! Engine errors never escape the playback controller; playlist errors are
//! collected as per-item warnings; keymap errors surface during config
//! validation.

use std::path::PathBuf;

use thiserror::Error;

/// Failures at the audio engine boundary.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The path could not be turned into a playable stream.
    #[error("cannot open {}: {reason}", path.display())]
    Open { path: PathBuf, reason: String },

    /// An opened stream was refused by the output.
    #[error("cannot play {}: {reason}", path.display())]
    Play { path: PathBuf, reason: String },

    /// The audio output device could not be opened.
    #[error("audio output unavailable: {0}")]
    Output(String),
}

impl EngineError {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }
}

/// Per-item problems found while building the startup playlist.
#[derive(Debug, Error)]
pub enum PlaylistError {
    #[error("{} is an unsupported file type", .0.display())]
    UnsupportedFileType(PathBuf),

    #[error("cannot access {}: {source}", path.display())]
    NotFound {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        source: walkdir::Error,
    },
}

/// A `[controls]` binding that cannot be turned into a keymap.
#[derive(Debug, Error)]
pub enum KeymapError {
    #[error("unknown key {name:?} in controls.{action}")]
    UnknownKey { name: String, action: &'static str },

    #[error("key {name:?} in controls.{action} is already bound in controls.{bound_to}")]
    Conflict {
        name: String,
        action: &'static str,
        bound_to: &'static str,
    },
}
