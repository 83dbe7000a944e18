use std::sync::Arc;

use super::geometry::SourceRect;
use crate::error::GeometryError;

/// Shared, externally-owned pixel storage
///
/// Pixels are packed RGBA8, red in the low byte, so a buffer casts directly
/// to upload bytes on little-endian targets.
pub type SharedPixels = Arc<[u32]>;

/// Pack RGBA channels into one pixel
#[inline]
pub fn pack_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    u32::from_le_bytes([r, g, b, a])
}

/// Split a pixel back into RGBA channels
#[inline]
pub fn unpack_rgba(pixel: u32) -> [u8; 4] {
    pixel.to_le_bytes()
}

/// Handle to the live framebuffer: shared pixels plus window geometry
///
/// The pixel storage belongs to the decoding collaborator; the handle is
/// replaced wholesale on every `set_source`. Construction validates the
/// window against the backing length, so every row access below is in
/// bounds by the time a `FrameBuffer` exists.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    pixels: SharedPixels,
    rect: SourceRect,
}

impl FrameBuffer {
    pub fn new(pixels: SharedPixels, rect: SourceRect) -> Result<Self, GeometryError> {
        rect.validate(pixels.len())?;
        Ok(Self { pixels, rect })
    }

    pub fn rect(&self) -> SourceRect {
        self.rect
    }

    pub fn pixels(&self) -> &SharedPixels {
        &self.pixels
    }

    pub fn width(&self) -> usize {
        self.rect.width
    }

    pub fn height(&self) -> usize {
        self.rect.height
    }

    /// One row of the visible window
    pub fn row(&self, row: usize) -> &[u32] {
        let start = self.rect.row_start(row);
        &self.pixels[start..start + self.rect.width]
    }

    /// Iterate the window's rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        (0..self.rect.height).map(move |row| self.row(row))
    }

    /// Deep-copy the visible window into a tightly packed buffer
    ///
    /// O(width * height); the only non-constant-time operation in the crate.
    pub fn copy_window(&self) -> Vec<u32> {
        let mut out = Vec::with_capacity(self.rect.pixel_count());
        for row in self.rows() {
            out.extend_from_slice(row);
        }
        out
    }
}
