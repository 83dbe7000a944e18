use super::frame_buffer::{FrameBuffer, SharedPixels};
use super::snapshot::Snapshot;
use super::transform::Transform;

/// Which pixel source a frame was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOrigin {
    /// The live, externally-owned buffer
    Live,
    /// The owned drag snapshot
    Snapshot,
}

/// Output of a render call - a descriptor, not a copy
///
/// Carries a cheap clone of the pixel storage handle, the window geometry
/// needed to walk it, and the transform to apply while compositing. Building
/// one is O(1); a host adapter does the actual blit.
#[derive(Debug, Clone)]
pub struct CompositedFrame {
    pixels: SharedPixels,
    offset: usize,
    stride: usize,
    x: i32,
    y: i32,
    width: usize,
    height: usize,
    origin: FrameOrigin,
    transform: Transform,
}

impl CompositedFrame {
    pub(crate) fn from_live(source: &FrameBuffer, transform: Transform) -> Self {
        let rect = source.rect();
        Self {
            pixels: source.pixels().clone(),
            offset: rect.offset,
            stride: rect.stride,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            origin: FrameOrigin::Live,
            transform,
        }
    }

    pub(crate) fn from_snapshot(snapshot: &Snapshot, transform: Transform) -> Self {
        Self {
            pixels: snapshot.pixels().clone(),
            offset: 0,
            stride: snapshot.width(),
            x: snapshot.x(),
            y: snapshot.y(),
            width: snapshot.width(),
            height: snapshot.height(),
            origin: FrameOrigin::Snapshot,
            transform,
        }
    }

    pub fn origin(&self) -> FrameOrigin {
        self.origin
    }

    pub fn transform(&self) -> Transform {
        self.transform
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

    /// One row of the frame's window
    pub fn row(&self, row: usize) -> &[u32] {
        let start = self.offset + row * self.stride;
        &self.pixels[start..start + self.width]
    }

    /// Rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        (0..self.height).map(move |row| self.row(row))
    }
}
