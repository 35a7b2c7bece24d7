//! `rodio`-backed engine: one output stream, one `Sink` per channel.
//!
//! Streams keep the encoded file in memory so the same stream can be started
//! again after a stop without touching the disk.

use std::collections::VecDeque;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};
use tracing::debug;

use crate::error::EngineError;

use super::engine::{Channel, Engine};
use super::types::ChannelId;

/// An opened, decodable file.
pub struct RodioStream {
    path: PathBuf,
    bytes: Arc<[u8]>,
}

impl RodioStream {
    fn decoder(&self) -> Result<Decoder<Cursor<Arc<[u8]>>>, rodio::decoder::DecoderError> {
        Decoder::new(Cursor::new(Arc::clone(&self.bytes)))
    }
}

/// Read `path` and check that rodio can decode it.
pub fn load_stream(path: &Path) -> Result<RodioStream, EngineError> {
    let bytes = fs::read(path).map_err(|e| EngineError::Open {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let stream = RodioStream {
        path: path.to_path_buf(),
        bytes: bytes.into(),
    };
    stream.decoder().map_err(|e| EngineError::Open {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(stream)
}

struct SinkSlot {
    sink: Sink,
    stopped: AtomicBool,
}

pub struct RodioChannel {
    id: ChannelId,
    slot: Arc<SinkSlot>,
}

impl Channel for RodioChannel {
    fn id(&self) -> ChannelId {
        self.id
    }

    fn pause(&mut self, paused: bool) {
        if paused {
            self.slot.sink.pause();
        } else {
            self.slot.sink.play();
        }
    }

    fn stop(&mut self) {
        self.slot.stopped.store(true, Ordering::SeqCst);
        self.slot.sink.stop();
    }

    #[cfg(test)]
    fn is_active(&self) -> bool {
        !self.slot.stopped.load(Ordering::SeqCst)
            && !self.slot.sink.is_paused()
            && !self.slot.sink.empty()
    }

    fn volume(&self) -> f32 {
        self.slot.sink.volume()
    }

    fn set_volume(&mut self, volume: f32) {
        self.slot.sink.set_volume(volume.clamp(0.0, 1.0));
    }
}

/// Queue every live channel whose sink ran dry and forget it.
///
/// Stopped and dropped channels are forgotten without a report, so each
/// channel is reported at most once.
fn collect_finished(
    live: &mut Vec<(ChannelId, Weak<SinkSlot>)>,
    finished: &mut VecDeque<ChannelId>,
) {
    live.retain(|(id, weak)| {
        let Some(slot) = weak.upgrade() else {
            return false;
        };
        if slot.stopped.load(Ordering::SeqCst) {
            return false;
        }
        if slot.sink.empty() {
            finished.push_back(*id);
            return false;
        }
        true
    });
}

pub struct RodioEngine {
    output: OutputStream,
    live: Vec<(ChannelId, Weak<SinkSlot>)>,
    finished: VecDeque<ChannelId>,
    next_id: u64,
}

impl RodioEngine {
    /// Open the default output device.
    pub fn open_default() -> Result<Self, EngineError> {
        let mut output = OutputStreamBuilder::open_default_stream()
            .map_err(|e| EngineError::Output(e.to_string()))?;
        // rodio logs to stderr when the OutputStream is dropped; noisy in a terminal app.
        output.log_on_drop(false);
        Ok(Self {
            output,
            live: Vec::new(),
            finished: VecDeque::new(),
            next_id: 0,
        })
    }
}

impl Engine for RodioEngine {
    type Stream = RodioStream;
    type Channel = RodioChannel;

    fn open_stream(&mut self, path: &Path) -> Result<RodioStream, EngineError> {
        load_stream(path)
    }

    fn release_stream(&mut self, stream: RodioStream) {
        debug!(path = %stream.path.display(), bytes = stream.bytes.len(), "stream released");
        drop(stream);
    }

    fn play(&mut self, stream: &RodioStream) -> Result<RodioChannel, EngineError> {
        let source = stream.decoder().map_err(|e| EngineError::Play {
            path: stream.path.clone(),
            reason: e.to_string(),
        })?;

        let sink = Sink::connect_new(self.output.mixer());
        sink.append(source);
        sink.play();

        let id = ChannelId(self.next_id);
        self.next_id += 1;
        let slot = Arc::new(SinkSlot {
            sink,
            stopped: AtomicBool::new(false),
        });
        self.live.push((id, Arc::downgrade(&slot)));
        Ok(RodioChannel { id, slot })
    }

    fn update(&mut self) {
        collect_finished(&mut self.live, &mut self.finished);
    }

    fn poll_finished(&mut self) -> Option<ChannelId> {
        self.finished.pop_front()
    }
}
