//! Podium Preview
//!
//! Scrubs a lightweight animated preview over an already-recorded video:
//! a small set of timestamps spread across the duration is cycled on a fixed
//! interval to produce a silent flipbook, and the element's original playback
//! state is restored exactly on exit.

pub mod scrubber;
pub mod timestamps;
pub mod video;

pub use scrubber::{PreviewScrubber, ScrubberConfig, ScrubberState};
pub use timestamps::segment_timestamps;
pub use video::VideoSurface;
