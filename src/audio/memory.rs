//! In-memory engine for exercising the controller without an audio device.

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::EngineError;

use super::engine::{Channel, Engine};
use super::types::ChannelId;

#[derive(Debug)]
pub struct MemoryStream {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelState {
    pub path: PathBuf,
    pub paused: bool,
    pub stopped: bool,
    pub volume: f32,
}

pub struct MemoryChannel {
    id: ChannelId,
    state: Rc<RefCell<ChannelState>>,
}

impl Channel for MemoryChannel {
    fn id(&self) -> ChannelId {
        self.id
    }

    fn pause(&mut self, paused: bool) {
        self.state.borrow_mut().paused = paused;
    }

    fn stop(&mut self) {
        self.state.borrow_mut().stopped = true;
    }

    #[cfg(test)]
    fn is_active(&self) -> bool {
        let s = self.state.borrow();
        !s.paused && !s.stopped
    }

    fn volume(&self) -> f32 {
        self.state.borrow().volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.state.borrow_mut().volume = volume;
    }
}

#[derive(Default)]
pub struct MemoryEngine {
    /// Every successful `open_stream`, in order.
    pub opened: Vec<PathBuf>,
    /// Every `release_stream`, in order.
    pub released: Vec<PathBuf>,
    pub updates: usize,
    unopenable: HashSet<PathBuf>,
    unplayable: HashSet<PathBuf>,
    channels: Vec<(ChannelId, Rc<RefCell<ChannelState>>)>,
    finished: VecDeque<ChannelId>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `open_stream` fail for `path`.
    pub fn refuse_open(&mut self, path: impl Into<PathBuf>) {
        self.unopenable.insert(path.into());
    }

    /// Make `play` fail for streams opened from `path`.
    pub fn refuse_play(&mut self, path: impl Into<PathBuf>) {
        self.unplayable.insert(path.into());
    }

    pub fn allow(&mut self, path: &Path) {
        self.unopenable.remove(path);
        self.unplayable.remove(path);
    }

    pub fn open_count(&self, path: &str) -> usize {
        self.opened.iter().filter(|p| p.as_path() == Path::new(path)).count()
    }

    pub fn live_streams(&self) -> usize {
        self.opened.len() - self.released.len()
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn channel(&self, id: ChannelId) -> Option<ChannelState> {
        self.channels
            .iter()
            .find(|(cid, _)| *cid == id)
            .map(|(_, state)| state.borrow().clone())
    }

    /// Simulate `id` playing to its natural end; picked up on the next `update`.
    pub fn finish(&mut self, id: ChannelId) {
        let stopped = self
            .channel(id)
            .map(|state| state.stopped)
            .unwrap_or(true);
        if !stopped {
            self.finished.push_back(id);
        }
    }
}

impl Engine for MemoryEngine {
    type Stream = MemoryStream;
    type Channel = MemoryChannel;

    fn open_stream(&mut self, path: &Path) -> Result<MemoryStream, EngineError> {
        if self.unopenable.contains(path) {
            return Err(EngineError::Open {
                path: path.to_path_buf(),
                reason: "unsupported codec".into(),
            });
        }
        self.opened.push(path.to_path_buf());
        Ok(MemoryStream {
            path: path.to_path_buf(),
        })
    }

    fn release_stream(&mut self, stream: MemoryStream) {
        self.released.push(stream.path);
    }

    fn play(&mut self, stream: &MemoryStream) -> Result<MemoryChannel, EngineError> {
        if self.unplayable.contains(&stream.path) {
            return Err(EngineError::Play {
                path: stream.path.clone(),
                reason: "no free channel".into(),
            });
        }
        let id = ChannelId(self.channels.len() as u64);
        let state = Rc::new(RefCell::new(ChannelState {
            path: stream.path.clone(),
            volume: 1.0,
            ..ChannelState::default()
        }));
        self.channels.push((id, Rc::clone(&state)));
        Ok(MemoryChannel { id, state })
    }

    fn update(&mut self) {
        self.updates += 1;
    }

    fn poll_finished(&mut self) -> Option<ChannelId> {
        self.finished.pop_front()
    }
}
