use std::sync::Arc;

use super::frame_buffer::{FrameBuffer, SharedPixels};

/// Owned, immutable copy of the live window, captured at drag start
///
/// Always tightly packed (stride == width, offset 0) regardless of the
/// geometry it was copied from. Remembers the placement coordinates of the
/// rect it captured so a frame built from it stays self-contained.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pixels: SharedPixels,
    x: i32,
    y: i32,
    width: usize,
    height: usize,
}

impl Snapshot {
    /// Deep-copy the source's visible window
    pub fn capture(source: &FrameBuffer) -> Self {
        let rect = source.rect();
        Self {
            pixels: Arc::from(source.copy_window()),
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }

    pub fn pixels(&self) -> &SharedPixels {
        &self.pixels
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }
}
