//! Podium Media Model
//!
//! Device-agnostic media primitives shared by the capture engine and the
//! compositor:
//! - Video frames and latest-frame cells
//! - Media tracks and streams with idempotent release
//! - The asynchronous device/display acquisition seam
//! - The recorder seam, chunk collection, and finished recordings
//! - Preview and playback binding surfaces

pub mod frame;
pub mod recorder;
pub mod stream;
pub mod surface;

pub use frame::{FrameCell, VideoFrame};
pub use recorder::{
    ChunkCollector, RecordedFile, RecorderBackend, RecorderEvent, RecorderSink, RecordingResult,
};
pub use stream::{MediaProvider, MediaStream, MediaTrack, TrackKind};
pub use surface::{PlaybackSurface, PreviewSurface};
