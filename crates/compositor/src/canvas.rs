//! The offscreen composite drawing surface.

use podium_media::VideoFrame;

use crate::layout::CanvasLayout;

/// A fixed-size RGBA canvas holding the latest composited frame.
#[derive(Debug)]
pub struct CompositeCanvas {
    layout: CanvasLayout,
    buffer: VideoFrame,
}

impl CompositeCanvas {
    pub fn new(layout: CanvasLayout) -> Self {
        Self {
            layout,
            buffer: VideoFrame::solid(layout.width, layout.height, [0, 0, 0, 255]),
        }
    }

    pub fn layout(&self) -> CanvasLayout {
        self.layout
    }

    /// Composite one frame: screen scaled full-frame, webcam scaled into the
    /// bottom-right inset.
    pub fn draw(&mut self, screen: &VideoFrame, webcam: &VideoFrame) {
        let (width, height) = (self.layout.width, self.layout.height);
        blit_scaled(&mut self.buffer, screen, 0, 0, width, height);

        let (ox, oy) = self.layout.inset_origin();
        blit_scaled(
            &mut self.buffer,
            webcam,
            ox,
            oy,
            self.layout.inset_width.min(width),
            self.layout.inset_height.min(height),
        );
    }

    /// The current composited frame.
    pub fn frame(&self) -> &VideoFrame {
        &self.buffer
    }

    /// Owned snapshot of the current composited frame.
    pub fn snapshot(&self) -> VideoFrame {
        self.buffer.clone()
    }
}

/// Nearest-neighbor blit of `src` into a `dst_w` x `dst_h` rectangle of
/// `dst` at `(dst_x, dst_y)`.
fn blit_scaled(dst: &mut VideoFrame, src: &VideoFrame, dst_x: u32, dst_y: u32, dst_w: u32, dst_h: u32) {
    if src.width() == 0 || src.height() == 0 || dst_w == 0 || dst_h == 0 {
        return;
    }
    for y in 0..dst_h {
        let sy = (y as u64 * src.height() as u64 / dst_h as u64) as u32;
        for x in 0..dst_w {
            let sx = (x as u64 * src.width() as u64 / dst_w as u64) as u32;
            dst.put_pixel(dst_x + x, dst_y + y, src.pixel(sx, sy));
        }
    }
}
