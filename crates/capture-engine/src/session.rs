//! Capture session management.
//!
//! [`CaptureSession`] owns the full lifecycle of one recording: acquiring the
//! media source for the selected mode, compositing when in picture-in-picture
//! mode, feeding the recorder, and finalizing the finished blob. At most one
//! media handle set is ever open; every release path is idempotent so the
//! OS capture indicator is never left on.

use podium_common::{CaptureDefaults, PodiumError, PodiumResult};
use podium_compositor::{CanvasLayout, CompositeHandle, CompositePipe};
use podium_media::{
    ChunkCollector, MediaProvider, MediaStream, PlaybackSurface, PreviewSurface, RecorderBackend,
    RecorderEvent, RecordingResult,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};

use crate::form::SubmissionForm;

/// Which media source the next capture will record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CaptureMode {
    /// One camera + microphone device stream.
    #[default]
    Webcam,
    /// One display capture stream.
    Screen,
    /// Screen capture with a webcam inset, composited into one stream.
    PictureInPicture,
}

/// Current state of the capture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No capture in progress; mode may be changed.
    #[default]
    Idle,
    /// Acquiring media handles; recording begins once the stream is ready.
    Previewing,
    /// Recording in progress.
    Recording,
}

/// Enabled/disabled state of the two transport controls.
///
/// `toggle` flips both atomically, matching how start/stop always trade
/// places.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionControls {
    pub start_enabled: bool,
    pub stop_enabled: bool,
}

impl Default for SessionControls {
    fn default() -> Self {
        Self {
            start_enabled: true,
            stop_enabled: false,
        }
    }
}

impl SessionControls {
    fn toggle(&mut self) {
        self.start_enabled = !self.start_enabled;
        self.stop_enabled = !self.stop_enabled;
    }
}

/// Events emitted over the session lifecycle.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Recording started.
    Started,
    /// Recording stopped and the result was finalized.
    Stopped,
}

/// Orchestrates one capture at a time from acquisition to finished blob.
pub struct CaptureSession {
    config: CaptureDefaults,
    mode: CaptureMode,
    state: SessionState,
    controls: SessionControls,

    provider: Arc<dyn MediaProvider>,
    recorder: Box<dyn RecorderBackend>,

    webcam_stream: Option<MediaStream>,
    screen_stream: Option<MediaStream>,
    recorded_stream: Option<MediaStream>,
    composite: Option<CompositeHandle>,

    collector: ChunkCollector,
    recorder_events: Option<mpsc::UnboundedReceiver<RecorderEvent>>,
    result: Option<RecordingResult>,

    preview: PreviewSurface,
    playback: PlaybackSurface,

    event_tx: broadcast::Sender<SessionEvent>,
}

impl CaptureSession {
    /// Create a session with default capture settings.
    pub fn new(provider: Arc<dyn MediaProvider>, recorder: Box<dyn RecorderBackend>) -> Self {
        Self::with_config(CaptureDefaults::default(), provider, recorder)
    }

    pub fn with_config(
        config: CaptureDefaults,
        provider: Arc<dyn MediaProvider>,
        recorder: Box<dyn RecorderBackend>,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(16);
        Self {
            config,
            mode: CaptureMode::default(),
            state: SessionState::default(),
            controls: SessionControls::default(),
            provider,
            recorder,
            webcam_stream: None,
            screen_stream: None,
            recorded_stream: None,
            composite: None,
            collector: ChunkCollector::new(),
            recorder_events: None,
            result: None,
            preview: PreviewSurface::new(),
            playback: PlaybackSurface::new(),
            event_tx,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    pub fn controls(&self) -> SessionControls {
        self.controls
    }

    /// The finished recording of the last completed capture, if any.
    pub fn result(&self) -> Option<&RecordingResult> {
        self.result.as_ref()
    }

    pub fn preview(&self) -> &PreviewSurface {
        &self.preview
    }

    pub fn playback(&self) -> &PlaybackSurface {
        &self.playback
    }

    /// Subscribe to session lifecycle events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    /// Select the capture mode for the next recording. Only allowed while
    /// idle; an active capture keeps its mode.
    pub fn select_mode(&mut self, mode: CaptureMode) -> PodiumResult<()> {
        if self.state != SessionState::Idle {
            return Err(PodiumError::capture("Capture mode is locked while active"));
        }
        self.mode = mode;
        Ok(())
    }

    /// Start capturing and recording in the selected mode.
    ///
    /// Acquisition failures propagate and leave the session idle with no
    /// handle held and the controls untouched.
    pub async fn start(&mut self) -> PodiumResult<()> {
        if self.state != SessionState::Idle {
            return Err(PodiumError::capture("Capture already active"));
        }

        tracing::info!(mode = ?self.mode, "Starting capture");
        self.collector.clear();
        self.state = SessionState::Previewing;

        let stream = match self.acquire().await {
            Ok(stream) => stream,
            Err(e) => {
                self.state = SessionState::Idle;
                return Err(e);
            }
        };

        self.controls.toggle();
        self.preview.bind(stream.clone());

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        if let Err(e) = self.recorder.start(&stream, events_tx) {
            self.controls.toggle();
            self.preview.clear();
            self.recorded_stream = Some(stream);
            self.release_streams();
            self.state = SessionState::Idle;
            return Err(e);
        }
        self.recorder_events = Some(events_rx);
        self.recorded_stream = Some(stream);

        self.state = SessionState::Recording;
        let _ = self.event_tx.send(SessionEvent::Started);
        tracing::info!("Recording started");
        Ok(())
    }

    /// Drain any recorder fragments that have arrived so far.
    ///
    /// Optional while recording; `stop` drains whatever remains. Fragments
    /// are appended in emission order either way.
    pub fn pump_events(&mut self) {
        if self.state != SessionState::Recording {
            return;
        }
        if let Some(events) = self.recorder_events.as_mut() {
            while let Ok(event) = events.try_recv() {
                match event {
                    RecorderEvent::Data(chunk) => self.collector.push(chunk),
                    RecorderEvent::Stopped => break,
                }
            }
        }
    }

    /// Stop recording, release every held handle, and finalize the result.
    ///
    /// A guarded no-op when nothing is recording.
    pub async fn stop(&mut self) -> PodiumResult<()> {
        if self.state != SessionState::Recording {
            tracing::debug!("Stop requested with no active recording");
            return Ok(());
        }

        tracing::info!("Stopping capture");
        self.recorder.stop()?;
        self.controls.toggle();
        self.release_streams();

        // The stop completion event arrives strictly after every data event;
        // drain in order until it does.
        if let Some(mut events) = self.recorder_events.take() {
            while let Some(event) = events.recv().await {
                match event {
                    RecorderEvent::Data(chunk) => self.collector.push(chunk),
                    RecorderEvent::Stopped => break,
                }
            }
        }

        let result = self.collector.finalize(&self.config.media_type);
        tracing::info!(
            bytes = result.byte_len(),
            media_type = %result.media_type(),
            "Recording finalized"
        );
        self.playback.load(result.clone());
        self.result = Some(result);

        self.preview.clear();
        self.release_streams();

        self.state = SessionState::Idle;
        let _ = self.event_tx.send(SessionEvent::Stopped);
        Ok(())
    }

    /// Hand the finished recording to the external form and request
    /// submission. A guarded no-op before any recording completed.
    pub fn save(&self, form: &mut dyn SubmissionForm) -> PodiumResult<()> {
        let Some(result) = self.result.as_ref() else {
            tracing::debug!("Save requested before a recording completed");
            return Ok(());
        };

        let file = result.as_file(&self.config.file_name);
        form.attach_video(file)?;
        form.request_submit()?;
        tracing::info!("Recording handed to submission form");
        Ok(())
    }

    /// Tear down the session: release every held handle and stop the
    /// composite loop. Safe to call at any time.
    pub fn disconnect(&mut self) {
        self.preview.clear();
        self.release_streams();
        self.recorder_events = None;
        self.state = SessionState::Idle;
    }

    // Internal helpers

    async fn acquire(&mut self) -> PodiumResult<MediaStream> {
        match self.mode {
            CaptureMode::Webcam => self.provider.user_media().await,
            CaptureMode::Screen => self.provider.display_media().await,
            CaptureMode::PictureInPicture => self.acquire_picture_in_picture().await,
        }
    }

    async fn acquire_picture_in_picture(&mut self) -> PodiumResult<MediaStream> {
        let screen = self.provider.display_media().await?;
        let webcam = match self.provider.user_media().await {
            Ok(webcam) => webcam,
            Err(e) => {
                // No partial handle may survive a failed acquisition.
                screen.stop_all();
                return Err(e);
            }
        };

        let layout = CanvasLayout::from(&self.config);
        let pipe = match CompositePipe::new(layout, self.config.composite_fps, &screen, &webcam) {
            Ok(pipe) => pipe,
            Err(e) => {
                screen.stop_all();
                webcam.stop_all();
                return Err(e);
            }
        };

        let stream = pipe.captured_stream();
        self.composite = Some(pipe.spawn());
        self.screen_stream = Some(screen);
        self.webcam_stream = Some(webcam);
        Ok(stream)
    }

    fn release_streams(&mut self) {
        if let Some(composite) = self.composite.take() {
            composite.stop();
        }
        for stream in [
            self.recorded_stream.take(),
            self.screen_stream.take(),
            self.webcam_stream.take(),
        ]
        .into_iter()
        .flatten()
        {
            stream.stop_all();
        }
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.release_streams();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podium_media::{RecorderSink, RecordedFile, VideoFrame};
    use std::sync::Mutex;

    /// Provider that records every stream it granted so tests can assert
    /// release, and can be scripted to deny either device.
    #[derive(Default)]
    struct FakeProvider {
        deny_user: bool,
        deny_display: bool,
        granted: Mutex<Vec<MediaStream>>,
    }

    impl FakeProvider {
        fn granting() -> Self {
            Self::default()
        }

        fn granted(&self) -> Vec<MediaStream> {
            self.granted.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl MediaProvider for FakeProvider {
        async fn user_media(&self) -> PodiumResult<MediaStream> {
            if self.deny_user {
                return Err(PodiumError::permission_denied("camera access declined"));
            }
            let stream = MediaStream::audio_video("webcam");
            self.granted.lock().unwrap().push(stream.clone());
            Ok(stream)
        }

        async fn display_media(&self) -> PodiumResult<MediaStream> {
            if self.deny_display {
                return Err(PodiumError::permission_denied("screen share declined"));
            }
            let stream = MediaStream::audio_video("screen");
            self.granted.lock().unwrap().push(stream.clone());
            Ok(stream)
        }
    }

    /// Recorder that emits a scripted chunk sequence on start and a final
    /// flush chunk plus the stop completion on stop.
    struct ScriptedRecorder {
        on_start: Vec<Vec<u8>>,
        on_stop: Vec<Vec<u8>>,
        sink: Option<RecorderSink>,
        active: bool,
    }

    impl ScriptedRecorder {
        fn new(on_start: Vec<Vec<u8>>, on_stop: Vec<Vec<u8>>) -> Box<Self> {
            Box::new(Self {
                on_start,
                on_stop,
                sink: None,
                active: false,
            })
        }
    }

    impl RecorderBackend for ScriptedRecorder {
        fn start(&mut self, _stream: &MediaStream, events: RecorderSink) -> PodiumResult<()> {
            for chunk in self.on_start.clone() {
                let _ = events.send(RecorderEvent::Data(chunk));
            }
            self.sink = Some(events);
            self.active = true;
            Ok(())
        }

        fn stop(&mut self) -> PodiumResult<()> {
            if let Some(sink) = self.sink.take() {
                for chunk in self.on_stop.clone() {
                    let _ = sink.send(RecorderEvent::Data(chunk));
                }
                let _ = sink.send(RecorderEvent::Stopped);
            }
            self.active = false;
            Ok(())
        }

        fn is_active(&self) -> bool {
            self.active
        }
    }

    #[derive(Default)]
    struct FakeForm {
        attached: Vec<RecordedFile>,
        submits: usize,
    }

    impl SubmissionForm for FakeForm {
        fn attach_video(&mut self, file: RecordedFile) -> PodiumResult<()> {
            self.attached.push(file);
            Ok(())
        }

        fn request_submit(&mut self) -> PodiumResult<()> {
            self.submits += 1;
            Ok(())
        }
    }

    fn session_with(
        provider: FakeProvider,
        recorder: Box<ScriptedRecorder>,
    ) -> (CaptureSession, Arc<FakeProvider>) {
        let provider = Arc::new(provider);
        let session = CaptureSession::new(provider.clone(), recorder);
        (session, provider)
    }

    #[tokio::test]
    async fn webcam_recording_start_to_finish() {
        let recorder = ScriptedRecorder::new(vec![vec![1, 2], vec![], vec![3]], vec![vec![4]]);
        let (mut session, provider) = session_with(FakeProvider::granting(), recorder);
        let mut events = session.subscribe();

        session.start().await.unwrap();
        assert_eq!(session.state(), SessionState::Recording);
        assert!(!session.controls().start_enabled);
        assert!(session.controls().stop_enabled);
        assert!(session.preview().is_bound());
        assert!(matches!(events.recv().await.unwrap(), SessionEvent::Started));

        session.stop().await.unwrap();
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.controls(), SessionControls::default());
        assert!(!session.preview().is_bound());
        assert!(matches!(events.recv().await.unwrap(), SessionEvent::Stopped));

        // Empty fragment filtered; arrival order preserved; final flush last.
        let result = session.result().unwrap();
        assert_eq!(result.data(), &[1, 2, 3, 4]);
        assert_eq!(result.media_type(), "video/webm");
        assert_eq!(session.playback().recording().unwrap().data(), &[1, 2, 3, 4]);

        for stream in provider.granted() {
            assert!(!stream.is_live());
        }
    }

    #[tokio::test]
    async fn start_while_active_is_an_error() {
        let recorder = ScriptedRecorder::new(vec![], vec![]);
        let (mut session, _) = session_with(FakeProvider::granting(), recorder);

        session.start().await.unwrap();
        let err = session.start().await.unwrap_err();
        assert!(err.to_string().contains("already active"));
    }

    #[tokio::test]
    async fn mode_is_locked_while_active() {
        let recorder = ScriptedRecorder::new(vec![], vec![]);
        let (mut session, _) = session_with(FakeProvider::granting(), recorder);

        session.select_mode(CaptureMode::Screen).unwrap();
        session.start().await.unwrap();
        assert!(session.select_mode(CaptureMode::Webcam).is_err());

        session.stop().await.unwrap();
        session.select_mode(CaptureMode::Webcam).unwrap();
        assert_eq!(session.mode(), CaptureMode::Webcam);
    }

    #[tokio::test]
    async fn acquisition_failure_leaves_session_idle() {
        let provider = FakeProvider {
            deny_user: true,
            ..FakeProvider::default()
        };
        let recorder = ScriptedRecorder::new(vec![], vec![]);
        let (mut session, provider) = session_with(provider, recorder);

        let err = session.start().await.unwrap_err();
        assert!(err.is_acquisition_failure());
        assert_eq!(session.state(), SessionState::Idle);
        // Controls never toggled on a failed start.
        assert_eq!(session.controls(), SessionControls::default());
        assert!(!session.preview().is_bound());
        assert!(provider.granted().is_empty());
    }

    #[tokio::test]
    async fn pip_denied_webcam_releases_the_screen_stream() {
        let provider = FakeProvider {
            deny_user: true,
            ..FakeProvider::default()
        };
        let recorder = ScriptedRecorder::new(vec![], vec![]);
        let (mut session, provider) = session_with(provider, recorder);
        session.select_mode(CaptureMode::PictureInPicture).unwrap();

        let err = session.start().await.unwrap_err();
        assert!(err.is_acquisition_failure());
        assert_eq!(session.state(), SessionState::Idle);

        // The display grant preceded the webcam denial; it must not stay live.
        let granted = provider.granted();
        assert_eq!(granted.len(), 1);
        assert!(!granted[0].is_live());
    }

    #[tokio::test]
    async fn pip_records_the_composited_stream() {
        let recorder = ScriptedRecorder::new(vec![vec![10]], vec![vec![20]]);
        let (mut session, provider) = session_with(FakeProvider::granting(), recorder);
        session.select_mode(CaptureMode::PictureInPicture).unwrap();

        session.start().await.unwrap();
        let granted = provider.granted();
        assert_eq!(granted.len(), 2);
        for stream in &granted {
            stream
                .video_frames()
                .unwrap()
                .publish(VideoFrame::solid(4, 4, [128, 128, 128, 255]));
        }

        // Let the spawned composite loop produce at least one frame.
        tokio::time::sleep(std::time::Duration::from_millis(80)).await;
        let composited = session
            .preview()
            .stream()
            .unwrap()
            .video_frames()
            .unwrap()
            .latest();
        assert!(composited.is_some());
        assert_eq!(composited.unwrap().width(), 1280);

        session.stop().await.unwrap();
        let result = session.result().unwrap();
        assert_eq!(result.data(), &[10, 20]);
        assert!(!result.is_empty());
        for stream in provider.granted() {
            assert!(!stream.is_live());
        }
    }

    #[tokio::test]
    async fn stop_without_recording_is_a_noop() {
        let recorder = ScriptedRecorder::new(vec![], vec![]);
        let (mut session, _) = session_with(FakeProvider::granting(), recorder);

        session.stop().await.unwrap();
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.controls(), SessionControls::default());
        assert!(session.result().is_none());
    }

    #[tokio::test]
    async fn save_before_any_recording_submits_nothing() {
        let recorder = ScriptedRecorder::new(vec![], vec![]);
        let (session, _) = session_with(FakeProvider::granting(), recorder);
        let mut form = FakeForm::default();

        session.save(&mut form).unwrap();
        assert!(form.attached.is_empty());
        assert_eq!(form.submits, 0);
    }

    #[tokio::test]
    async fn save_hands_the_named_file_to_the_form() {
        let recorder = ScriptedRecorder::new(vec![vec![5, 6]], vec![]);
        let (mut session, _) = session_with(FakeProvider::granting(), recorder);
        let mut form = FakeForm::default();

        session.start().await.unwrap();
        session.pump_events();
        session.stop().await.unwrap();
        session.save(&mut form).unwrap();

        assert_eq!(form.attached.len(), 1);
        assert_eq!(form.attached[0].name, "recording.webm");
        assert_eq!(form.attached[0].media_type, "video/webm");
        assert_eq!(form.attached[0].data, vec![5, 6]);
        assert_eq!(form.submits, 1);
    }

    #[tokio::test]
    async fn disconnect_releases_everything() {
        let recorder = ScriptedRecorder::new(vec![], vec![]);
        let (mut session, provider) = session_with(FakeProvider::granting(), recorder);

        session.start().await.unwrap();
        session.disconnect();
        assert_eq!(session.state(), SessionState::Idle);
        for stream in provider.granted() {
            assert!(!stream.is_live());
        }
    }
}
