//! Preview and playback binding surfaces.
//!
//! These are the two video slots the capture session drives: one shows the
//! live stream while recording, the other holds the finished recording for
//! local review. The surrounding shell observes them; the core only binds
//! and clears.

use crate::recorder::RecordingResult;
use crate::stream::MediaStream;

/// The live preview slot (a video element fed by the active stream).
#[derive(Debug, Default)]
pub struct PreviewSurface {
    stream: Option<MediaStream>,
}

impl PreviewSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the live stream for visual feedback.
    pub fn bind(&mut self, stream: MediaStream) {
        self.stream = Some(stream);
    }

    /// Drop the live binding. Idempotent.
    pub fn clear(&mut self) {
        self.stream = None;
    }

    pub fn is_bound(&self) -> bool {
        self.stream.is_some()
    }

    pub fn stream(&self) -> Option<&MediaStream> {
        self.stream.as_ref()
    }
}

/// The review slot holding the finished recording for local playback.
#[derive(Debug, Default)]
pub struct PlaybackSurface {
    recording: Option<RecordingResult>,
}

impl PlaybackSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, recording: RecordingResult) {
        self.recording = Some(recording);
    }

    pub fn recording(&self) -> Option<&RecordingResult> {
        self.recording.as_ref()
    }
}
