//! Recorder seam, chunk collection, and finished recordings.
//!
//! A [`RecorderBackend`] is bound to a resolved stream when recording starts
//! and emits an ordered sequence of binary fragments followed by exactly one
//! stop-completion event. Fragments may be empty; the collector filters them.

use chrono::{DateTime, Utc};
use podium_common::PodiumResult;
use tokio::sync::mpsc;

use crate::stream::MediaStream;

/// Events emitted by a recorder backend.
#[derive(Debug, Clone)]
pub enum RecorderEvent {
    /// A binary media fragment became available. May be empty.
    Data(Vec<u8>),
    /// The recorder finished flushing after a stop request. Emitted exactly
    /// once, strictly after every `Data` event of the recording.
    Stopped,
}

/// Channel the backend delivers its events on. Unbounded FIFO, so fragment
/// order is emission order.
pub type RecorderSink = mpsc::UnboundedSender<RecorderEvent>;

/// A recorder bound to a media stream.
///
/// Contract:
/// - `start` binds the backend to the stream and begins emitting `Data`
///   events on the sink.
/// - `stop` flushes any buffered final fragment, then emits `Stopped`.
/// - A backend may be restarted for a new recording after `Stopped`.
pub trait RecorderBackend: Send {
    fn start(&mut self, stream: &MediaStream, events: RecorderSink) -> PodiumResult<()>;

    fn stop(&mut self) -> PodiumResult<()>;

    fn is_active(&self) -> bool;
}

/// Ordered accumulation of recorded fragments for one recording.
#[derive(Debug, Default)]
pub struct ChunkCollector {
    chunks: Vec<Vec<u8>>,
}

impl ChunkCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment. Size-zero fragments are dropped.
    pub fn push(&mut self, chunk: Vec<u8>) {
        if chunk.is_empty() {
            tracing::debug!("Discarding empty recorder fragment");
            return;
        }
        self.chunks.push(chunk);
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Discard everything collected so far.
    pub fn clear(&mut self) {
        self.chunks.clear();
    }

    /// Concatenate all fragments, in arrival order, into one finished
    /// recording. Drains the collector; the concatenation happens once.
    pub fn finalize(&mut self, media_type: impl Into<String>) -> RecordingResult {
        let total: usize = self.chunks.iter().map(Vec::len).sum();
        let mut data = Vec::with_capacity(total);
        for chunk in self.chunks.drain(..) {
            data.extend_from_slice(&chunk);
        }
        RecordingResult {
            data,
            media_type: media_type.into(),
            created_at: Utc::now(),
        }
    }
}

/// The finished media blob of one recording. Immutable once created.
#[derive(Debug, Clone)]
pub struct RecordingResult {
    data: Vec<u8>,
    media_type: String,
    created_at: DateTime<Utc>,
}

impl RecordingResult {
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Wrap the blob as a named file attachment for the submission form.
    pub fn as_file(&self, name: impl Into<String>) -> RecordedFile {
        RecordedFile {
            name: name.into(),
            media_type: self.media_type.clone(),
            data: self.data.clone(),
        }
    }
}

/// A named file attachment handed to the external form collaborator.
#[derive(Debug, Clone)]
pub struct RecordedFile {
    pub name: String,
    pub media_type: String,
    pub data: Vec<u8>,
}
