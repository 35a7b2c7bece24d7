use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tracing::debug;

use super::source::{EventSource, KeyEvent};

/// Raw terminal mode for the lifetime of the guard.
///
/// Acquire once at startup; dropping it restores the terminal on every exit
/// path, including early returns and unwinding.
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    pub fn acquire() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Key presses read from the controlling terminal through crossterm.
pub struct TerminalEvents {
    queue: VecDeque<KeyEvent>,
    capacity: usize,
}

impl TerminalEvents {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            queue: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Buffer one press. Once `capacity` presses are waiting, new ones are dropped.
    pub fn push(&mut self, event: KeyEvent) {
        if self.queue.len() >= self.capacity {
            debug!(code = ?event.code, "input queue full, dropping key press");
            return;
        }
        self.queue.push_back(event);
    }
}

impl EventSource for TerminalEvents {
    fn update(&mut self) -> io::Result<()> {
        // Zero timeout: only read what is already waiting.
        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            self.push(KeyEvent::new(key.code).with_modifiers(key.modifiers));
        }
        Ok(())
    }

    fn poll(&mut self) -> Option<KeyEvent> {
        self.queue.pop_front()
    }
}
