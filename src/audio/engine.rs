use std::path::Path;

use crate::error::EngineError;

use super::types::ChannelId;

/// Decode/output backend driven by the playback controller.
///
/// Streams are opened from paths and owned by whoever holds them; handing a
/// stream back through `release_stream` disposes of its decode resources.
/// Finish notifications are queued during `update` and drained with
/// `poll_finished`, so nothing calls back into the controller.
pub trait Engine {
    type Stream;
    type Channel: Channel;

    fn open_stream(&mut self, path: &Path) -> Result<Self::Stream, EngineError>;

    fn release_stream(&mut self, stream: Self::Stream);

    /// Start playing `stream` on a fresh channel.
    fn play(&mut self, stream: &Self::Stream) -> Result<Self::Channel, EngineError>;

    /// Engine housekeeping, run once per control loop tick.
    fn update(&mut self) {}

    /// Next channel that reached its natural end since the last call.
    ///
    /// Each channel is reported at most once, and never after `Channel::stop`.
    fn poll_finished(&mut self) -> Option<ChannelId>;
}

/// One playing or paused stream instance.
pub trait Channel {
    fn id(&self) -> ChannelId;
    fn pause(&mut self, paused: bool);
    fn stop(&mut self);
    /// Playing: not paused, not stopped, and audio still queued.
    #[cfg(test)]
    fn is_active(&self) -> bool;
    fn volume(&self) -> f32;
    /// `volume` is in `[0.0, 1.0]`.
    fn set_volume(&mut self, volume: f32);
}
