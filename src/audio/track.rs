use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::EngineError;

use super::engine::Engine;

/// One playable item: a path and, once played, the engine stream opened from it.
///
/// `S` is the engine's stream handle type. A track owns its handle exclusively
/// and gives it back to the engine through `release_stream`.
#[derive(Debug)]
pub struct Track<S> {
    path: PathBuf,
    label: String,
    stream: Option<S>,
}

impl<S> Track<S> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| path.display().to_string());
        Self {
            path,
            label,
            stream: None,
        }
    }

    /// Replace the name shown in log output.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        if !label.trim().is_empty() {
            self.label = label;
        }
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    #[cfg(test)]
    pub fn has_stream(&self) -> bool {
        self.stream.is_some()
    }

    /// Open the stream if this track does not hold one yet.
    pub fn ensure_stream<E>(&mut self, engine: &mut E) -> Result<&S, EngineError>
    where
        E: Engine<Stream = S>,
    {
        let stream = match self.stream.take() {
            Some(stream) => stream,
            None => {
                debug!(path = %self.path.display(), "opening stream");
                engine.open_stream(&self.path)?
            }
        };
        Ok(self.stream.insert(stream))
    }

    /// Give the stream back to the engine. Safe to call without one.
    pub fn release_stream<E>(&mut self, engine: &mut E)
    where
        E: Engine<Stream = S>,
    {
        if let Some(stream) = self.stream.take() {
            debug!(path = %self.path.display(), "releasing stream");
            engine.release_stream(stream);
        }
    }
}
