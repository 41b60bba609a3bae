//! Media tracks, streams, and the device acquisition seam.
//!
//! A [`MediaStream`] is a live handle onto a device or display capture: a set
//! of tracks that can be stopped individually or all at once. Release is
//! always idempotent; a stopped track stays stopped. The OS-level capture
//! indicator follows track liveness, so every code path that drops a stream
//! must stop its tracks first.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use podium_common::PodiumResult;

use crate::frame::FrameCell;

/// Kind of a media track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    Audio,
    Video,
}

/// One track of a live media stream.
///
/// Clones share the underlying liveness flag and frame cell, mirroring how a
/// stream handle can be bound to several consumers at once.
#[derive(Debug, Clone)]
pub struct MediaTrack {
    id: String,
    kind: TrackKind,
    live: Arc<AtomicBool>,
    frames: Option<FrameCell>,
}

impl MediaTrack {
    /// Create a live audio track.
    pub fn audio(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: TrackKind::Audio,
            live: Arc::new(AtomicBool::new(true)),
            frames: None,
        }
    }

    /// Create a live video track publishing frames into the given cell.
    pub fn video(id: impl Into<String>, frames: FrameCell) -> Self {
        Self {
            id: id.into(),
            kind: TrackKind::Video,
            live: Arc::new(AtomicBool::new(true)),
            frames: Some(frames),
        }
    }

    /// Create a video track whose liveness is an externally owned flag.
    ///
    /// The composite pipe uses this to tie its synthetic output track to the
    /// redraw loop: stopping the track stops the loop.
    pub fn video_with_liveness(
        id: impl Into<String>,
        frames: FrameCell,
        live: Arc<AtomicBool>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: TrackKind::Video,
            live,
            frames: Some(frames),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> TrackKind {
        self.kind
    }

    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }

    /// Stop this track. Repeated calls are no-ops.
    pub fn stop(&self) {
        if self.live.swap(false, Ordering::SeqCst) {
            tracing::debug!(track = %self.id, kind = ?self.kind, "Track stopped");
        }
    }

    /// Frame cell of a video track.
    pub fn frames(&self) -> Option<&FrameCell> {
        self.frames.as_ref()
    }
}

/// A live device/display stream: an owned set of tracks.
#[derive(Debug, Clone, Default)]
pub struct MediaStream {
    tracks: Vec<MediaTrack>,
}

impl MediaStream {
    pub fn new(tracks: Vec<MediaTrack>) -> Self {
        Self { tracks }
    }

    /// Convenience constructor for a combined audio+video stream, the shape
    /// every acquisition in this system requests.
    pub fn audio_video(label: &str) -> Self {
        Self::new(vec![
            MediaTrack::audio(format!("{label}-audio")),
            MediaTrack::video(format!("{label}-video"), FrameCell::new()),
        ])
    }

    pub fn tracks(&self) -> &[MediaTrack] {
        &self.tracks
    }

    /// Whether any track is still live.
    pub fn is_live(&self) -> bool {
        self.tracks.iter().any(MediaTrack::is_live)
    }

    /// Stop every track. Idempotent.
    pub fn stop_all(&self) {
        for track in &self.tracks {
            track.stop();
        }
    }

    /// Frame cell of the first video track, if present.
    pub fn video_frames(&self) -> Option<FrameCell> {
        self.tracks
            .iter()
            .find(|t| t.kind() == TrackKind::Video)
            .and_then(|t| t.frames().cloned())
    }
}

/// Asynchronous device/display acquisition.
///
/// The contract mirrors the platform capture APIs: each call may suspend,
/// may fail with [`PodiumError::MediaAcquisition`] or
/// [`PodiumError::PermissionDenied`], and on success returns a live stream
/// carrying both an audio and a video track.
///
/// [`PodiumError::MediaAcquisition`]: podium_common::PodiumError::MediaAcquisition
/// [`PodiumError::PermissionDenied`]: podium_common::PodiumError::PermissionDenied
#[async_trait::async_trait]
pub trait MediaProvider: Send + Sync {
    /// Acquire a camera + microphone stream.
    async fn user_media(&self) -> PodiumResult<MediaStream>;

    /// Acquire a display capture stream.
    async fn display_media(&self) -> PodiumResult<MediaStream>;
}
