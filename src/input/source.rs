use std::io;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyModifiers};

/// A single key press, stamped when it was read from the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
    pub timestamp: Instant,
}

impl KeyEvent {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
            timestamp: Instant::now(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Producer of discrete input events.
///
/// `update` performs the non-blocking device poll and buffers whatever arrived;
/// `poll` hands out buffered events one at a time in arrival order.
pub trait EventSource {
    fn update(&mut self) -> io::Result<()>;
    fn poll(&mut self) -> Option<KeyEvent>;
}
