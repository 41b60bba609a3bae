//! The composite redraw loop.
//!
//! [`CompositePipe`] reads the latest frame from a screen stream and a webcam
//! stream, draws one composited frame per tick, and publishes it into the
//! frame cell of a synthetic output stream. The loop is liveness-guarded in
//! both directions: releasing either source stops it, and stopping the
//! synthetic output track stops it too (the output track shares the loop's
//! running flag). Once stopped, no further tick renders.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use podium_common::{PodiumError, PodiumResult};
use podium_media::{FrameCell, MediaStream, MediaTrack};

use crate::canvas::CompositeCanvas;
use crate::layout::CanvasLayout;

/// A running (or runnable) picture-in-picture composition.
#[derive(Debug)]
pub struct CompositePipe {
    canvas: CompositeCanvas,
    fps: u32,
    screen: MediaStream,
    webcam: MediaStream,
    screen_frames: FrameCell,
    webcam_frames: FrameCell,
    output: FrameCell,
    running: Arc<AtomicBool>,
    frames_rendered: u64,
}

impl CompositePipe {
    /// Build a composition over two live source streams.
    ///
    /// Both streams must carry a video track; the pipe only holds cheap
    /// clones of the handles, ownership of the sources stays with the caller.
    pub fn new(
        layout: CanvasLayout,
        fps: u32,
        screen: &MediaStream,
        webcam: &MediaStream,
    ) -> PodiumResult<Self> {
        let screen_frames = screen
            .video_frames()
            .ok_or_else(|| PodiumError::composite("Screen stream has no video track"))?;
        let webcam_frames = webcam
            .video_frames()
            .ok_or_else(|| PodiumError::composite("Webcam stream has no video track"))?;

        Ok(Self {
            canvas: CompositeCanvas::new(layout),
            fps: fps.max(1),
            screen: screen.clone(),
            webcam: webcam.clone(),
            screen_frames,
            webcam_frames,
            output: FrameCell::new(),
            running: Arc::new(AtomicBool::new(true)),
            frames_rendered: 0,
        })
    }

    /// The synthetic stream carrying the composited frames.
    ///
    /// Video only, matching a captured canvas surface. The track's liveness
    /// is the loop's running flag, so releasing the stream tears the loop
    /// down with it.
    pub fn captured_stream(&self) -> MediaStream {
        MediaStream::new(vec![MediaTrack::video_with_liveness(
            "composite-video",
            self.output.clone(),
            self.running.clone(),
        )])
    }

    /// Frames composited so far.
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Stop the loop. Idempotent; used for teardown paths that bypass
    /// source release.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    fn sources_live(&self) -> bool {
        self.screen.is_live() && self.webcam.is_live()
    }

    /// Run one redraw tick.
    ///
    /// Returns false, without rendering, once the pipe was stopped or either
    /// source was released; the caller must then stop scheduling ticks.
    pub fn tick(&mut self) -> bool {
        if !self.running.load(Ordering::SeqCst) || !self.sources_live() {
            self.running.store(false, Ordering::SeqCst);
            return false;
        }

        // Sources that have not published a frame yet contribute nothing;
        // keep looping until both are producing.
        if let (Some(screen), Some(webcam)) =
            (self.screen_frames.latest(), self.webcam_frames.latest())
        {
            self.canvas.draw(&screen, &webcam);
            self.output.publish(self.canvas.snapshot());
            self.frames_rendered += 1;
        }
        true
    }

    /// Spawn the redraw loop at the configured frame rate.
    pub fn spawn(mut self) -> CompositeHandle {
        let running = self.running.clone();
        let interval = Duration::from_secs_f64(1.0 / self.fps as f64);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                if !self.tick() {
                    break;
                }
            }
            tracing::debug!(
                frames = self.frames_rendered,
                "Composite loop ended"
            );
            self.frames_rendered
        });
        CompositeHandle { running, task }
    }
}

/// Handle onto a spawned composite loop.
pub struct CompositeHandle {
    running: Arc<AtomicBool>,
    task: tokio::task::JoinHandle<u64>,
}

impl CompositeHandle {
    /// Request the loop to stop. Idempotent.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Wait for the loop to finish; returns the number of frames rendered.
    pub async fn join(mut self) -> u64 {
        (&mut self.task).await.unwrap_or(0)
    }
}

impl Drop for CompositeHandle {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
    }
}
