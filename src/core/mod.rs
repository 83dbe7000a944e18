pub mod compositor;
pub mod frame;
pub mod frame_buffer;
pub mod geometry;
pub mod gpu_context;
pub mod input_adapter;
pub mod render_cache;
pub mod snapshot;
pub mod surface;
pub mod surface_renderer;
pub mod transform;

pub use compositor::Compositor;
pub use frame::{CompositedFrame, FrameOrigin};
pub use frame_buffer::{pack_rgba, unpack_rgba, FrameBuffer, SharedPixels};
pub use geometry::SourceRect;
pub use gpu_context::GpuContext;
pub use input_adapter::{GestureAdapter, GestureEvent};
pub use render_cache::RenderCache;
pub use snapshot::Snapshot;
pub use surface::{NullSurface, RedrawSurface};
pub use surface_renderer::SurfaceRenderer;
pub use transform::Transform;
