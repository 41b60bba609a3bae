//! The segment-preview scrubber.
//!
//! Cycles a video element's playback position through a small set of
//! timestamps on a fixed interval, producing a silent flipbook animation,
//! and restores the element's exact pre-scrub state on exit. The interval
//! timer is owned by the scrubber instance and is never left armed after
//! `pause` or drop.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use podium_common::PreviewDefaults;

use crate::timestamps::segment_timestamps;
use crate::video::VideoSurface;

/// Scrubber configuration.
#[derive(Debug, Clone, Copy)]
pub struct ScrubberConfig {
    /// Number of preview segments.
    pub segments: u32,

    /// Interval between preview jumps.
    pub interval: Duration,

    /// Durations below this many seconds are not segmented.
    pub min_duration_secs: f64,
}

impl Default for ScrubberConfig {
    fn default() -> Self {
        Self::from(&PreviewDefaults::default())
    }
}

impl From<&PreviewDefaults> for ScrubberConfig {
    fn from(defaults: &PreviewDefaults) -> Self {
        Self {
            segments: defaults.segments,
            interval: Duration::from_millis(defaults.interval_ms),
            min_duration_secs: defaults.min_duration_secs,
        }
    }
}

/// Lifecycle of the scrubber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrubberState {
    /// Metadata has not loaded yet; scrubbing is unavailable.
    Uninitialized,
    /// Timestamps are computed; scrubbing may start.
    Ready,
    /// The flipbook animation is running.
    Scrubbing,
}

/// Playback state captured when scrubbing starts, restored when it ends.
#[derive(Debug, Clone, Copy)]
struct RestorePoint {
    time: f64,
    was_playing: bool,
}

/// Animates a preview over a video element without persistently moving its
/// playback position.
pub struct PreviewScrubber {
    video: Arc<dyn VideoSurface>,
    config: ScrubberConfig,
    state: ScrubberState,
    timestamps: Vec<f64>,
    cursor: Arc<AtomicUsize>,
    restore: Option<RestorePoint>,
    timer: Option<tokio::task::JoinHandle<()>>,
}

impl PreviewScrubber {
    pub fn new(video: Arc<dyn VideoSurface>, config: ScrubberConfig) -> Self {
        Self {
            video,
            config,
            state: ScrubberState::Uninitialized,
            timestamps: Vec::new(),
            cursor: Arc::new(AtomicUsize::new(0)),
            restore: None,
            timer: None,
        }
    }

    pub fn state(&self) -> ScrubberState {
        self.state
    }

    /// The computed timestamp set. Read-only between metadata loads.
    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    /// The video's metadata became available; compute the timestamp set.
    ///
    /// Called again when the underlying source changes, recomputing the set
    /// for the new duration.
    pub fn handle_metadata_loaded(&mut self) {
        let duration = self.video.duration();
        self.timestamps = segment_timestamps(
            duration,
            self.config.segments,
            self.config.min_duration_secs,
        );
        if self.state == ScrubberState::Uninitialized {
            self.state = ScrubberState::Ready;
        }
        tracing::debug!(duration, count = self.timestamps.len(), "Preview timestamps computed");
    }

    /// Start the flipbook animation.
    ///
    /// No-op before metadata loads, while already scrubbing, or with an
    /// empty timestamp set. Records the element's position and play state
    /// for restoration, mutes, jumps to the first timestamp, and arms the
    /// repeating timer only when there is more than one timestamp to cycle.
    pub fn play(&mut self) {
        if self.state != ScrubberState::Ready || self.timestamps.is_empty() {
            tracing::debug!(state = ?self.state, "Preview play ignored");
            return;
        }

        self.restore = Some(RestorePoint {
            time: self.video.current_time(),
            was_playing: !self.video.is_paused(),
        });
        self.cursor.store(0, Ordering::SeqCst);

        self.video.set_muted(true);
        show_next(&*self.video, &self.timestamps, &self.cursor);

        if self.timestamps.len() > 1 {
            let video = self.video.clone();
            let timestamps = self.timestamps.clone();
            let cursor = self.cursor.clone();
            let interval = self.config.interval;
            self.timer = Some(tokio::spawn(async move {
                let mut ticker = tokio::time::interval(interval);
                // The first interval tick fires immediately; the initial
                // jump already happened, so swallow it.
                ticker.tick().await;
                loop {
                    ticker.tick().await;
                    show_next(&*video, &timestamps, &cursor);
                }
            }));
        }

        self.state = ScrubberState::Scrubbing;
    }

    /// Stop the animation and restore the exact pre-scrub playback state:
    /// position, mute, and whether the element was playing. Idempotent.
    pub fn pause(&mut self) {
        self.clear_timer();

        let Some(restore) = self.restore.take() else {
            return;
        };

        self.video.pause();
        self.video.set_current_time(restore.time);
        self.video.set_muted(false);
        if restore.was_playing {
            self.video.play();
        }
        self.state = ScrubberState::Ready;
    }

    fn clear_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl Drop for PreviewScrubber {
    fn drop(&mut self) {
        self.clear_timer();
    }
}

/// Jump to the timestamp at the cursor, resume playback from there, and
/// advance the cursor, wrapping modulo the set size.
fn show_next(video: &dyn VideoSurface, timestamps: &[f64], cursor: &AtomicUsize) {
    if timestamps.is_empty() {
        return;
    }
    let index = cursor.load(Ordering::SeqCst) % timestamps.len();
    video.set_current_time(timestamps[index]);
    video.play();
    cursor.store((index + 1) % timestamps.len(), Ordering::SeqCst);
}
