//! Canvas geometry for the picture-in-picture composite.

use podium_common::CaptureDefaults;

/// Fixed-size canvas with a webcam inset anchored to the bottom-right corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasLayout {
    pub width: u32,
    pub height: u32,
    pub inset_width: u32,
    pub inset_height: u32,
}

impl Default for CanvasLayout {
    fn default() -> Self {
        Self::from(&CaptureDefaults::default())
    }
}

impl From<&CaptureDefaults> for CanvasLayout {
    fn from(defaults: &CaptureDefaults) -> Self {
        Self {
            width: defaults.canvas_width,
            height: defaults.canvas_height,
            inset_width: defaults.inset_width,
            inset_height: defaults.inset_height,
        }
    }
}

impl CanvasLayout {
    /// Top-left corner of the webcam inset: offset inward from the
    /// bottom-right corner by the inset's own dimensions, so the inset never
    /// clips off-canvas.
    pub fn inset_origin(&self) -> (u32, u32) {
        (
            self.width.saturating_sub(self.inset_width),
            self.height.saturating_sub(self.inset_height),
        )
    }

    /// Whether a canvas pixel falls inside the webcam inset.
    pub fn in_inset(&self, x: u32, y: u32) -> bool {
        let (ox, oy) = self.inset_origin();
        x >= ox && x < self.width && y >= oy && y < self.height
    }
}
