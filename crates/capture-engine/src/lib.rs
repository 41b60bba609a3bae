//! Podium Capture Engine
//!
//! Orchestrates webcam, screen, and picture-in-picture capture into one
//! finished recording and hands it to the surrounding form shell.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │                CaptureSession                  │
//! │  ┌──────────┐ ┌───────────┐ ┌──────────────┐  │
//! │  │ Media    │ │ Composite │ │ Recorder     │  │
//! │  │ Provider │ │ Pipe      │ │ Backend      │  │
//! │  └─────┬────┘ └─────┬─────┘ └──────┬───────┘  │
//! │        │            │              │           │
//! │        ▼            ▼              ▼           │
//! │  ┌──────────────────────────────────────────┐  │
//! │  │  RecordingResult → SubmissionForm        │  │
//! │  └──────────────────────────────────────────┘  │
//! └───────────────────────────────────────────────┘
//! ```

pub mod form;
pub mod session;

pub use form::SubmissionForm;
pub use session::{CaptureMode, CaptureSession, SessionControls, SessionEvent, SessionState};
