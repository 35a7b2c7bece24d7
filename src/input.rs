//! Keyboard input: the event source contract, the crossterm-backed source and
//! the key-to-action map consumed by the control loop.

mod keymap;
mod source;
mod terminal;

pub use keymap::{Action, Keymap};
pub use source::{EventSource, KeyEvent};
pub use terminal::{RawModeGuard, TerminalEvents};
