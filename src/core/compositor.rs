use super::frame::CompositedFrame;
use super::frame_buffer::pack_rgba;

/// Software blitter: renders a frame descriptor into an output pixel buffer
///
/// Every output pixel is mapped through the inverse of the frame's
/// scale-about-pivot transform (plus a host-supplied pan offset) and sampled
/// nearest-neighbor from the frame's window; everything the window does not
/// cover gets the background color.
#[derive(Debug, Clone, Copy)]
pub struct Compositor {
    width: usize,
    height: usize,
    background: u32,
}

impl Compositor {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, background: pack_rgba(0, 0, 0, 255) }
    }

    pub fn with_background(mut self, background: u32) -> Self {
        self.background = background;
        self
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Resize the output. Cheap; buffers are allocated per compose call.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    /// Composite one frame, panned by `(pan_x, pan_y)` output pixels
    pub fn compose(&self, frame: &CompositedFrame, pan_x: f32, pan_y: f32) -> Vec<u32> {
        let mut out = vec![self.background; self.width * self.height];
        let transform = frame.transform();
        let (fw, fh) = (frame.width() as i64, frame.height() as i64);

        for oy in 0..self.height {
            let dst_row = &mut out[oy * self.width..(oy + 1) * self.width];
            for (ox, dst) in dst_row.iter_mut().enumerate() {
                let (sx, sy) = transform.unapply(ox as f32 - pan_x, oy as f32 - pan_y);
                let fx = (sx - frame.x() as f32).floor() as i64;
                let fy = (sy - frame.y() as f32).floor() as i64;
                if (0..fw).contains(&fx) && (0..fh).contains(&fy) {
                    *dst = frame.row(fy as usize)[fx as usize];
                }
            }
        }

        out
    }

    /// Composite straight into upload bytes (RGBA8, row-major)
    pub fn compose_rgba8(&self, frame: &CompositedFrame, pan_x: f32, pan_y: f32) -> Vec<u8> {
        bytemuck::cast_slice(&self.compose(frame, pan_x, pan_y)).to_vec()
    }
}
