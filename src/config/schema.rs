use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/spindle/config.toml` or `~/.config/spindle/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `SPINDLE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub controls: ControlsSettings,
    pub library: LibrarySettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Volume applied to the first channel, between 0.0 and 1.0.
    pub volume: f32,
    /// Amount added or removed by the volume keys.
    pub volume_step: f32,
    /// Idle time between control loop ticks (milliseconds).
    pub tick_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            volume: 1.0,
            volume_step: 0.1,
            tick_ms: 10,
        }
    }
}

/// Key bindings. Each action accepts several key names.
///
/// Names are `space`, `enter`, `esc`, `tab`, `backspace`, `left`, `right`,
/// `up`, `down`, or any single character.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    pub quit: Vec<String>,
    pub toggle: Vec<String>,
    pub next: Vec<String>,
    pub previous: Vec<String>,
    pub stop: Vec<String>,
    pub volume_up: Vec<String>,
    pub volume_down: Vec<String>,
    /// Maximum number of key presses buffered between ticks.
    pub event_capacity: usize,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            quit: vec!["q".into()],
            toggle: vec!["space".into()],
            next: vec!["right".into(), "n".into()],
            previous: vec!["left".into(), "p".into()],
            stop: vec!["s".into()],
            volume_up: vec!["+".into(), "=".into()],
            volume_down: vec!["-".into()],
            event_capacity: 64,
        }
    }
}

#[derive(Debug, Copy, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackDisplayField {
    Title,
    Artist,
    Album,
    Filename,
    Path,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories of a directory argument.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,

    /// Which fields make up a track's label in log output.
    ///
    /// Example: ["artist", "title"] -> "Artist - Title"
    pub display_fields: Vec<TrackDisplayField>,
    /// Separator used to join `display_fields`.
    pub display_separator: String,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: false,
            recursive: false,
            max_depth: None,
            display_fields: vec![TrackDisplayField::Artist, TrackDisplayField::Title],
            display_separator: " - ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Maximum level printed (`error`, `warn`, `info`, `debug`, `trace`, `off`).
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
