//! The playback queue and state machine.
//!
//! Every track lives in exactly one place at a time: the pending queue, the
//! current slot, or the history stack. Tracks are owned values moved between
//! those containers, so a track can never be queued and playing at once.

use std::collections::VecDeque;

use tracing::{debug, info, warn};

use crate::error::EngineError;

use super::engine::{Channel, Engine};
use super::track::Track;
use super::types::{ChannelId, PlaybackState};

pub struct Controller<E: Engine> {
    engine: E,
    pending: VecDeque<Track<E::Stream>>,
    /// Most recently completed track is last.
    history: Vec<Track<E::Stream>>,
    current: Option<Track<E::Stream>>,
    channel: Option<E::Channel>,
    state: PlaybackState,
    /// Applied to every new channel; follows `set_volume`.
    volume: f32,
}

impl<E: Engine> Controller<E> {
    pub fn new(engine: E, volume: f32) -> Self {
        Self {
            engine,
            pending: VecDeque::new(),
            history: Vec::new(),
            current: None,
            channel: None,
            state: PlaybackState::Stopped,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    #[cfg(test)]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    #[cfg(test)]
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn current_track(&self) -> Option<&Track<E::Stream>> {
        self.current.as_ref()
    }

    pub fn channel_id(&self) -> Option<ChannelId> {
        self.channel.as_ref().map(Channel::id)
    }

    /// Pending tracks in playback order.
    #[cfg(test)]
    pub fn queue(&self) -> impl Iterator<Item = &Track<E::Stream>> {
        self.pending.iter()
    }

    pub fn queue_size(&self) -> usize {
        self.pending.len()
    }

    /// Completed tracks, most recent first.
    #[cfg(test)]
    pub fn history(&self) -> impl Iterator<Item = &Track<E::Stream>> {
        self.history.iter().rev()
    }

    #[cfg(test)]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn enqueue(&mut self, track: Track<E::Stream>) {
        debug!(track = track.label(), "enqueued");
        self.pending.push_back(track);
    }

    /// Drop every pending track. Current and history are untouched.
    pub fn clear_queue(&mut self) {
        for mut track in self.pending.drain(..) {
            track.release_stream(&mut self.engine);
        }
    }

    /// Resume a paused channel, or start the current track (else the queue head).
    pub fn play(&mut self) {
        if let Some(channel) = self.channel.as_mut() {
            channel.pause(false);
            self.state = PlaybackState::Playing;
            debug!("resumed");
            return;
        }

        let (mut track, from_queue) = match self.current.take() {
            Some(track) => (track, false),
            None => match self.pending.pop_front() {
                Some(track) => (track, true),
                None => {
                    info!("Queue is empty, nothing to play.");
                    self.state = PlaybackState::Stopped;
                    return;
                }
            },
        };

        match self.start(&mut track) {
            Ok(channel) => self.begin(track, channel),
            Err(err) => {
                warn!("{err}");
                // Put the track back where it came from; the queue does not advance.
                if from_queue {
                    self.pending.push_front(track);
                } else {
                    self.current = Some(track);
                }
            }
        }
    }

    /// Pause in place. The channel is kept so `play` can resume it.
    pub fn pause(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        if let Some(channel) = self.channel.as_mut() {
            channel.pause(true);
            self.state = PlaybackState::Paused;
            debug!("paused");
        }
    }

    /// Stop playback and rewind: the current track and every completed track go
    /// back to the head of the queue in their original order.
    pub fn stop(&mut self) {
        self.halt_channel();
        self.state = PlaybackState::Stopped;

        if let Some(mut track) = self.current.take() {
            track.release_stream(&mut self.engine);
            self.pending.push_front(track);
        }
        while let Some(track) = self.history.pop() {
            self.pending.push_front(track);
        }
        debug!(queued = self.pending.len(), "stopped");
    }

    /// Complete the current track and start the next one in the queue.
    pub fn next_track(&mut self) {
        self.complete_current();
        self.advance();
    }

    /// Return to the most recently completed track. With no history this is `stop`.
    pub fn previous_track(&mut self) {
        let Some(previous) = self.history.pop() else {
            self.stop();
            return;
        };

        self.halt_channel();
        self.state = PlaybackState::Stopped;
        if let Some(mut track) = self.current.take() {
            track.release_stream(&mut self.engine);
            self.pending.push_front(track);
        }
        self.current = Some(previous);
        self.play();
    }

    /// Volume of the held channel, `0.0` without one.
    pub fn get_volume(&self) -> f32 {
        self.channel.as_ref().map_or(0.0, Channel::volume)
    }

    /// Set the held channel's volume. No-op without a channel.
    pub fn set_volume(&mut self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        if let Some(channel) = self.channel.as_mut() {
            channel.set_volume(volume);
            self.volume = volume;
            info!("Volume {:.0}%", volume * 100.0);
        }
    }

    /// The held channel reached its natural end.
    pub fn on_track_finished(&mut self) {
        if !self.pending.is_empty() {
            self.next_track();
            return;
        }
        self.complete_current();
        info!("Reached the end of the playlist.");
    }

    /// Engine housekeeping plus delivery of finish notifications.
    ///
    /// Runs before input is handled in a tick. Notifications for channels that
    /// are no longer held are ignored.
    pub fn update(&mut self) {
        self.engine.update();
        while let Some(id) = self.engine.poll_finished() {
            if self.channel_id() == Some(id) {
                self.on_track_finished();
            } else {
                debug!(?id, "ignoring finish notification for a released channel");
            }
        }
    }

    fn start(&mut self, track: &mut Track<E::Stream>) -> Result<E::Channel, EngineError> {
        let stream = track.ensure_stream(&mut self.engine)?;
        self.engine.play(stream)
    }

    fn begin(&mut self, track: Track<E::Stream>, mut channel: E::Channel) {
        channel.set_volume(self.volume);
        info!("Playing track {}...", track.label());
        self.current = Some(track);
        self.channel = Some(channel);
        self.state = PlaybackState::Playing;
    }

    /// Pop queue heads until one starts. Unopenable tracks are skipped into
    /// history; a play failure leaves the track at the head.
    fn advance(&mut self) {
        while let Some(mut track) = self.pending.pop_front() {
            match self.start(&mut track) {
                Ok(channel) => {
                    self.begin(track, channel);
                    return;
                }
                Err(err) if err.is_open() => {
                    warn!("Skipping {}: {err}", track.label());
                    self.history.push(track);
                }
                Err(err) => {
                    warn!("{err}");
                    self.pending.push_front(track);
                    return;
                }
            }
        }
        info!("No more tracks.");
    }

    fn complete_current(&mut self) {
        self.halt_channel();
        self.state = PlaybackState::Stopped;
        if let Some(mut track) = self.current.take() {
            track.release_stream(&mut self.engine);
            self.history.push(track);
        }
    }

    fn halt_channel(&mut self) {
        if let Some(mut channel) = self.channel.take() {
            channel.stop();
        }
    }
}

impl<E: Engine> Drop for Controller<E> {
    fn drop(&mut self) {
        self.halt_channel();
        self.clear_queue();
        let tracks = self.current.take().into_iter().chain(self.history.drain(..));
        for mut track in tracks {
            track.release_stream(&mut self.engine);
        }
    }
}
