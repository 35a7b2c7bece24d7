//! Playback: the engine contract, tracks, the queue/state-machine controller
//! and the rodio output that backs it at runtime.

mod controller;
mod engine;
mod output;
mod track;
mod types;

pub use controller::Controller;
pub use engine::{Channel, Engine};
pub use output::RodioEngine;
pub use track::Track;
pub use types::PlaybackState;

#[cfg(test)]
pub(crate) mod memory;
