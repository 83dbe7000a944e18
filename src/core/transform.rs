use crate::error::CacheError;

/// Uniform scale about a pivot point
///
/// Applied to whatever source ends up in the frame, live window or snapshot.
/// A destination point `d` shows the source point `p = pivot + (d - pivot) / scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: f32,
    pub pivot_x: f32,
    pub pivot_y: f32,
}

impl Transform {
    /// Identity: scale 1.0 about the origin
    pub const IDENTITY: Transform = Transform { scale: 1.0, pivot_x: 0.0, pivot_y: 0.0 };

    /// Fails with `InvalidScale` unless `scale > 0` (NaN included)
    pub fn new(scale: f32, pivot_x: f32, pivot_y: f32) -> Result<Self, CacheError> {
        if !(scale > 0.0) {
            return Err(CacheError::InvalidScale(scale));
        }
        Ok(Self { scale, pivot_x, pivot_y })
    }

    /// Map a destination point back to source coordinates
    #[inline]
    pub fn unapply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.pivot_x + (x - self.pivot_x) / self.scale,
            self.pivot_y + (y - self.pivot_y) / self.scale,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
