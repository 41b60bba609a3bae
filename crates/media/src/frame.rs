//! Video frames and latest-frame cells.
//!
//! Live video tracks publish their most recent frame into a [`FrameCell`];
//! readers (the compositor, a preview widget) only ever care about the latest
//! frame, so the cell is a single slot rather than a queue.

use std::sync::{Arc, RwLock};

use podium_common::{PodiumError, PodiumResult};

/// Bytes per RGBA pixel.
const BYTES_PER_PIXEL: usize = 4;

/// A single decoded video frame in RGBA8 layout, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFrame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl VideoFrame {
    /// Create a frame from raw RGBA bytes.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> PodiumResult<Self> {
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if data.len() != expected {
            return Err(PodiumError::composite(format!(
                "Frame buffer size mismatch: {}x{} needs {expected} bytes, got {}",
                width,
                height,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a frame filled with a single color.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * BYTES_PER_PIXEL);
        for _ in 0..(width as usize * height as usize) {
            data.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Read one pixel. Coordinates outside the frame return black.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0, 0, 0, 255];
        }
        let idx = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// Write one pixel. Out-of-bounds writes are ignored.
    pub fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        self.data[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&rgba);
    }

    /// Raw RGBA bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// A shared single-slot cell holding the latest frame of a video track.
///
/// Cloning the cell shares the slot; publishing replaces the previous frame.
#[derive(Debug, Clone, Default)]
pub struct FrameCell {
    slot: Arc<RwLock<Option<VideoFrame>>>,
}

impl FrameCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the latest frame.
    pub fn publish(&self, frame: VideoFrame) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = Some(frame);
        }
    }

    /// Snapshot of the latest frame, if any has been published.
    pub fn latest(&self) -> Option<VideoFrame> {
        self.slot.read().ok().and_then(|slot| slot.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_rejects_mismatched_buffer() {
        let err = VideoFrame::new(2, 2, vec![0; 15]).unwrap_err();
        assert!(err.to_string().contains("size mismatch"));
    }

    #[test]
    fn pixel_roundtrip_and_bounds() {
        let mut frame = VideoFrame::solid(4, 4, [10, 20, 30, 255]);
        assert_eq!(frame.pixel(3, 3), [10, 20, 30, 255]);
        frame.put_pixel(1, 2, [1, 2, 3, 4]);
        assert_eq!(frame.pixel(1, 2), [1, 2, 3, 4]);
        // Out of bounds reads are black, writes are ignored
        assert_eq!(frame.pixel(4, 0), [0, 0, 0, 255]);
        frame.put_pixel(9, 9, [255; 4]);
    }

    #[test]
    fn cell_shares_latest_frame_across_clones() {
        let cell = FrameCell::new();
        let reader = cell.clone();
        assert!(reader.latest().is_none());

        cell.publish(VideoFrame::solid(2, 2, [1, 1, 1, 255]));
        cell.publish(VideoFrame::solid(2, 2, [9, 9, 9, 255]));
        let latest = reader.latest().unwrap();
        assert_eq!(latest.pixel(0, 0), [9, 9, 9, 255]);
    }
}
