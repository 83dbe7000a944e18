/// Outbound seam to the hosting display surface
///
/// The cache never draws on its own; it signals the surface that a repaint
/// is due and the host schedules one. Fire-and-forget, must not block.
pub trait RedrawSurface {
    /// Ask the host to schedule a repaint
    fn request_redraw(&self);
}

/// Surface that drops every signal, for headless use
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl RedrawSurface for NullSurface {
    fn request_redraw(&self) {}
}
