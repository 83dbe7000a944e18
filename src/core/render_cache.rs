use log::trace;

use super::frame::CompositedFrame;
use super::frame_buffer::{FrameBuffer, SharedPixels};
use super::geometry::SourceRect;
use super::snapshot::Snapshot;
use super::surface::{NullSurface, RedrawSurface};
use super::transform::Transform;
use crate::error::CacheError;

/// Decides, per render request, whether to composite from the live buffer
/// or from a cached snapshot, and manages the snapshot's lifecycle
///
/// While a drag gesture is in progress the cache serves a frozen copy of the
/// frame taken at drag start, so buffer updates arriving mid-gesture never
/// tear the panned image; the invalidation is deferred to `end_drag`. While
/// idle, updates invalidate immediately and renders read the live buffer.
///
/// Two-state machine: Idle and Dragging. `dirty` can only be set while
/// dragging; an update arriving while idle drops the snapshot instead.
/// All operations are synchronous and single-threaded; the only
/// non-constant-time one is the snapshot copy in `begin_drag`.
pub struct RenderCache {
    source: Option<FrameBuffer>,
    snapshot: Option<Snapshot>,
    transform: Transform,
    dragging: bool,
    dirty: bool,
    surface: Box<dyn RedrawSurface>,
}

impl RenderCache {
    /// Cache wired to a hosting surface that receives redraw signals
    pub fn new(surface: Box<dyn RedrawSurface>) -> Self {
        Self {
            source: None,
            snapshot: None,
            transform: Transform::IDENTITY,
            dragging: false,
            dirty: false,
            surface,
        }
    }

    /// Cache with no surface attached; redraw signals are dropped
    pub fn detached() -> Self {
        Self::new(Box::new(NullSurface))
    }

    /// Replace the live buffer handle and window geometry
    ///
    /// Fails with `InvalidGeometry` before any state changes. While idle a
    /// retained snapshot is invalidated; during a drag the on-screen
    /// snapshot stays and `dirty` defers the invalidation to `end_drag`.
    pub fn set_source(&mut self, pixels: SharedPixels, rect: SourceRect) -> Result<(), CacheError> {
        let buffer = FrameBuffer::new(pixels, rect)?;
        self.source = Some(buffer);
        if self.dragging {
            self.dirty = true;
        } else {
            self.snapshot = None;
        }
        Ok(())
    }

    /// Set the uniform scale and pivot applied to rendered frames
    ///
    /// Fails with `InvalidScale` unless `scale > 0`.
    pub fn set_transform(&mut self, scale: f32, pivot_x: f32, pivot_y: f32) -> Result<(), CacheError> {
        self.transform = Transform::new(scale, pivot_x, pivot_y)?;
        Ok(())
    }

    /// Enter the Dragging state, freezing the current frame
    ///
    /// Captures a snapshot only if none is retained from an earlier gesture;
    /// one allocation amortizes over the whole drag instead of one per
    /// pointer move. Clears `dirty`. Fails with `NoSource` (and mutates
    /// nothing) when no source was ever set.
    pub fn begin_drag(&mut self) -> Result<(), CacheError> {
        let source = self.source.as_ref().ok_or(CacheError::NoSource)?;
        if self.snapshot.is_none() {
            let snapshot = Snapshot::capture(source);
            trace!("captured {}x{} drag snapshot", snapshot.width(), snapshot.height());
            self.snapshot = Some(snapshot);
        }
        self.dirty = false;
        self.dragging = true;
        Ok(())
    }

    /// Leave the Dragging state
    ///
    /// Discards the snapshot iff the live source changed during the drag,
    /// forcing the next render back onto the live buffer; otherwise the
    /// snapshot stays retained as a cache of the last rendered state.
    /// Always signals the surface to schedule a repaint.
    pub fn end_drag(&mut self) {
        self.dragging = false;
        if self.dirty {
            trace!("drag ended dirty, dropping snapshot");
            self.snapshot = None;
            self.dirty = false;
        }
        self.surface.request_redraw();
    }

    /// The live buffer's contents changed
    ///
    /// Idle: drop any leftover snapshot so the next render reads the live
    /// buffer, and signal a repaint. Dragging: set `dirty` and leave the
    /// in-progress snapshot untouched, deferring invalidation to `end_drag`
    /// so the panned image never tears.
    pub fn notify_update(&mut self) {
        if self.dragging {
            self.dirty = true;
        } else {
            self.snapshot = None;
            self.surface.request_redraw();
        }
    }

    /// Build a frame descriptor from the current state, without mutating it
    ///
    /// Serves the snapshot whenever one exists (dragging, or retained from a
    /// clean drag end), the live window otherwise. Fails with `NoSource` if
    /// `set_source` was never called.
    pub fn render(&self) -> Result<CompositedFrame, CacheError> {
        let source = self.source.as_ref().ok_or(CacheError::NoSource)?;
        Ok(match &self.snapshot {
            Some(snapshot) => CompositedFrame::from_snapshot(snapshot, self.transform),
            None => CompositedFrame::from_live(source, self.transform),
        })
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn scale(&self) -> f32 {
        self.transform.scale
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Geometry of the current live window, if a source is set
    pub fn source_rect(&self) -> Option<SourceRect> {
        self.source.as_ref().map(|s| s.rect())
    }

    pub fn source_width(&self) -> Option<usize> {
        self.source_rect().map(|r| r.width)
    }

    pub fn source_height(&self) -> Option<usize> {
        self.source_rect().map(|r| r.height)
    }
}
