//! Podium Compositor
//!
//! Combines a display capture and a webcam capture into one synthetic
//! picture-in-picture stream: the screen as full-frame background, the webcam
//! as a fixed-size inset anchored to the bottom-right corner.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │                              │
//! │        screen capture        │
//! │                   ┌────────┐ │
//! │                   │ webcam │ │
//! └───────────────────┴────────┴─┘
//! ```
//!
//! The redraw loop runs at a fixed frame rate and is bound to the lifetime of
//! its two source streams: as soon as either source is released, no further
//! tick renders.

pub mod canvas;
pub mod layout;
pub mod pipe;

pub use canvas::CompositeCanvas;
pub use layout::CanvasLayout;
pub use pipe::{CompositeHandle, CompositePipe};
