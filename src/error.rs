use thiserror::Error;

/// Why a source geometry was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("window is empty: {width}x{height}")]
    EmptyWindow { width: usize, height: usize },

    #[error("stride {stride} is smaller than row width {width}")]
    StrideTooSmall { stride: usize, width: usize },

    #[error("window needs {required} pixels but buffer holds {available}")]
    BufferTooSmall { required: usize, available: usize },

    #[error("offset/stride/size combination overflows the address space")]
    SpanOverflow,
}

/// Errors surfaced by [`RenderCache`](crate::core::RenderCache) operations
///
/// All of these are local and non-retryable: the caller corrects its inputs
/// and calls again. A failed operation leaves the cache untouched.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CacheError {
    #[error("invalid source geometry: {0}")]
    InvalidGeometry(#[from] GeometryError),

    #[error("scale must be positive, got {0}")]
    InvalidScale(f32),

    #[error("no source configured")]
    NoSource,
}
