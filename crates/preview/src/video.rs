//! The presentation video element seam.

/// A playable video element the scrubber drives.
///
/// Implemented by the surrounding shell over whatever widget actually plays
/// the video. Methods take `&self`: a video element is a shared handle with
/// interior mutability, and the scrubber's interval task drives it
/// concurrently with user-triggered calls.
pub trait VideoSurface: Send + Sync {
    /// Current playback position in seconds.
    fn current_time(&self) -> f64;

    /// Seek to a playback position in seconds.
    fn set_current_time(&self, secs: f64);

    /// Total duration in seconds. Only meaningful once metadata has loaded.
    fn duration(&self) -> f64;

    /// Whether playback is currently paused.
    fn is_paused(&self) -> bool;

    /// Begin playback from the current position.
    fn play(&self);

    /// Pause playback.
    fn pause(&self);

    fn is_muted(&self) -> bool;

    fn set_muted(&self, muted: bool);
}
