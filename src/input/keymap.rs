use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers};

use crate::config::ControlsSettings;
use crate::error::KeymapError;

use super::source::KeyEvent;

/// Something a key press asks the player to do.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    /// Pause when playing, otherwise play.
    TogglePlayback,
    Next,
    Previous,
    Stop,
    VolumeUp,
    VolumeDown,
}

impl Action {
    /// Listing order for the controls banner.
    pub const ALL: [Action; 7] = [
        Action::TogglePlayback,
        Action::Quit,
        Action::Previous,
        Action::Next,
        Action::Stop,
        Action::VolumeUp,
        Action::VolumeDown,
    ];

    pub fn describe(self) -> &'static str {
        match self {
            Action::Quit => "quit",
            Action::TogglePlayback => "pause/play",
            Action::Next => "next track",
            Action::Previous => "previous track",
            Action::Stop => "stop",
            Action::VolumeUp => "volume up",
            Action::VolumeDown => "volume down",
        }
    }

    fn settings_key(self) -> &'static str {
        match self {
            Action::Quit => "quit",
            Action::TogglePlayback => "toggle",
            Action::Next => "next",
            Action::Previous => "previous",
            Action::Stop => "stop",
            Action::VolumeUp => "volume_up",
            Action::VolumeDown => "volume_down",
        }
    }

    fn bound_names(self, controls: &ControlsSettings) -> &[String] {
        match self {
            Action::Quit => &controls.quit,
            Action::TogglePlayback => &controls.toggle,
            Action::Next => &controls.next,
            Action::Previous => &controls.previous,
            Action::Stop => &controls.stop,
            Action::VolumeUp => &controls.volume_up,
            Action::VolumeDown => &controls.volume_down,
        }
    }
}

/// Parse a configured key name into a terminal key code.
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let trimmed = name.trim();
    let lower = trimmed.to_ascii_lowercase();
    let code = match lower.as_str() {
        "space" => KeyCode::Char(' '),
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        _ => {
            // Single characters are case-sensitive: `n` and `N` are different keys.
            let mut chars = trimmed.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };
    Some(code)
}

/// Lookup table from key codes to actions.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<KeyCode, Action>,
    labels: Vec<(Action, String)>,
}

impl Keymap {
    pub fn from_settings(controls: &ControlsSettings) -> Result<Self, KeymapError> {
        let mut bindings = HashMap::new();
        let mut labels = Vec::new();

        for action in Action::ALL {
            let names = action.bound_names(controls);
            for name in names {
                let code = parse_key(name).ok_or_else(|| KeymapError::UnknownKey {
                    name: name.clone(),
                    action: action.settings_key(),
                })?;
                // Repeating a key within one action is harmless.
                match bindings.insert(code, action) {
                    Some(bound) if bound != action => {
                        return Err(KeymapError::Conflict {
                            name: name.clone(),
                            action: action.settings_key(),
                            bound_to: bound.settings_key(),
                        });
                    }
                    _ => {}
                }
            }
            if !names.is_empty() {
                labels.push((action, names.join("/")));
            }
        }

        Ok(Self { bindings, labels })
    }

    /// Resolve a key press. Ctrl+C always quits since raw mode swallows SIGINT.
    pub fn action_for(&self, event: &KeyEvent) -> Option<Action> {
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            return match event.code {
                KeyCode::Char('c') => Some(Action::Quit),
                _ => None,
            };
        }
        self.bindings.get(&event.code).copied()
    }

    /// Render the bound keys as a multi-line controls listing.
    pub fn controls_text(&self) -> String {
        let width = self
            .labels
            .iter()
            .map(|(_, keys)| keys.len())
            .max()
            .unwrap_or(0);
        let mut out = String::from("Controls:");
        for (action, keys) in &self.labels {
            out.push_str(&format!("\n   {keys:<width$}   =   {}", action.describe()));
        }
        out
    }
}
