use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use clap::Parser;
use log::{debug, info, warn};

use remote_canvas::cli::Cli;
use remote_canvas::config::ViewerConfig;
use remote_canvas::core::{
    pack_rgba, Compositor, GestureAdapter, GestureEvent, RedrawSurface, RenderCache, SourceRect,
    SurfaceRenderer,
};

// === Constants ===

const MIN_SCALE: f32 = 0.1;
const MAX_SCALE: f32 = 16.0;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

// === Redraw signal ===

/// Routes the cache's redraw requests to the winit window
struct WindowSurface(Arc<Window>);

impl RedrawSurface for WindowSurface {
    fn request_redraw(&self) {
        self.0.request_redraw();
    }
}

// === Synthetic framebuffer ===

/// Stand-in for a remote protocol client: animates a test card and
/// publishes each finished frame to the cache
struct SyntheticSource {
    pixels: Vec<u32>,
    width: usize,
    height: usize,
    tick: u32,
}

impl SyntheticSource {
    fn new(width: usize, height: usize) -> Self {
        let mut source = Self { pixels: vec![0; width * height], width, height, tick: 0 };
        source.repaint();
        source
    }

    /// Advance the animation one step
    fn advance(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        self.repaint();
    }

    fn repaint(&mut self) {
        let t = self.tick as usize;
        for y in 0..self.height {
            for x in 0..self.width {
                let grid = (x / 32 + y / 32) % 2 == 0;
                let base = if grid { 48 } else { 16 };
                let r = base + ((x + t * 3) % 208) as u8;
                let g = base + ((y + t * 2) % 208) as u8;
                let b = base + ((x + y + t) % 208) as u8;
                self.pixels[y * self.width + x] = pack_rgba(r, g, b, 255);
            }
        }
    }

    /// Publish the current frame: swap the buffer in, then signal the change
    fn publish(&self, cache: &mut RenderCache) -> Result<()> {
        let rect = SourceRect::tight(self.width, self.height);
        cache.set_source(Arc::from(self.pixels.clone()), rect)?;
        cache.notify_update();
        Ok(())
    }
}

// === Application ===

struct App {
    config: ViewerConfig,
    window: Option<Arc<Window>>,
    renderer: Option<SurfaceRenderer>,
    cache: Option<RenderCache>,
    compositor: Compositor,
    gestures: GestureAdapter,
    source: SyntheticSource,
    pan: (f32, f32),
    scale: f32,
    paused: bool,
    last_update: Instant,
}

impl App {
    fn new(config: ViewerConfig, paused: bool) -> Self {
        let source = SyntheticSource::new(config.source_width, config.source_height);
        let compositor = Compositor::new(config.window_width as usize, config.window_height as usize);
        Self {
            scale: config.initial_scale,
            config,
            window: None,
            renderer: None,
            cache: None,
            compositor,
            gestures: GestureAdapter::new(),
            source,
            pan: (0.0, 0.0),
            paused,
            last_update: Instant::now(),
        }
    }

    fn apply_gestures(&mut self) {
        for event in self.gestures.drain_events() {
            match event {
                GestureEvent::DragStarted => {
                    if let Some(cache) = self.cache.as_mut() {
                        if let Err(e) = cache.begin_drag() {
                            warn!("begin_drag rejected: {}", e);
                        }
                    }
                }
                GestureEvent::DragMoved { dx, dy } => {
                    self.pan.0 += dx;
                    self.pan.1 += dy;
                    if let Some(window) = &self.window {
                        window.request_redraw();
                    }
                }
                GestureEvent::DragEnded => {
                    if let Some(cache) = self.cache.as_mut() {
                        cache.end_drag();
                    }
                }
                GestureEvent::Zoom { factor, center_x, center_y } => {
                    let scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
                    if let Some(cache) = self.cache.as_mut() {
                        match cache.set_transform(scale, center_x - self.pan.0, center_y - self.pan.1)
                        {
                            Ok(()) => self.scale = scale,
                            Err(e) => warn!("set_transform rejected: {}", e),
                        }
                    }
                    if let Some(window) = &self.window {
                        window.request_redraw();
                    }
                }
            }
        }
    }

    fn tick_source(&mut self) {
        if self.paused {
            return;
        }
        let interval = std::time::Duration::from_millis(self.config.update_interval_ms);
        if self.last_update.elapsed() < interval {
            return;
        }
        self.last_update = Instant::now();

        self.source.advance();
        if let Some(cache) = self.cache.as_mut() {
            if let Err(e) = self.source.publish(cache) {
                warn!("frame publish rejected: {}", e);
            }
        }
    }

    fn redraw(&mut self) {
        let (Some(cache), Some(renderer)) = (&self.cache, &self.renderer) else { return };

        match cache.render() {
            Ok(frame) => {
                debug!("presenting {:?} frame at scale {}", frame.origin(), cache.scale());
                let pixels = self.compositor.compose_rgba8(&frame, self.pan.0, self.pan.1);
                if let Err(e) = renderer.present(&pixels) {
                    warn!("present failed: {}", e);
                }
            }
            Err(e) => warn!("render failed: {}", e),
        }
    }

    fn reset_view(&mut self) {
        self.pan = (0.0, 0.0);
        self.scale = self.config.initial_scale;
        if let Some(cache) = self.cache.as_mut() {
            if let Err(e) = cache.set_transform(self.scale, 0.0, 0.0) {
                warn!("set_transform rejected: {}", e);
            }
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window = match event_loop.create_window(
                Window::default_attributes()
                    .with_title("Remote Canvas")
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        self.config.window_width,
                        self.config.window_height,
                    )),
            ) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    eprintln!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let renderer = match pollster::block_on(SurfaceRenderer::new(window.clone())) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Failed to initialize renderer: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let size = window.inner_size();
            self.compositor.resize(size.width as usize, size.height as usize);

            let mut cache = RenderCache::new(Box::new(WindowSurface(window.clone())));
            if let Err(e) = cache.set_transform(self.scale, 0.0, 0.0) {
                warn!("initial transform rejected: {}", e);
            }
            if let Err(e) = self.source.publish(&mut cache) {
                warn!("initial frame rejected: {}", e);
            }

            self.window = Some(window);
            self.renderer = Some(renderer);
            self.cache = Some(cache);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        ..
                    },
                ..
            } => match code {
                KeyCode::Space => {
                    self.paused = !self.paused;
                    info!("updates {}", if self.paused { "paused" } else { "resumed" });
                }
                KeyCode::KeyR => self.reset_view(),
                _ => {}
            },
            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size.width, size.height);
                }
                self.compositor.resize(size.width as usize, size.height as usize);
            }
            WindowEvent::MouseInput { .. }
            | WindowEvent::CursorMoved { .. }
            | WindowEvent::MouseWheel { .. } => {
                self.gestures.process_event(&event);
                self.apply_gestures();
            }
            WindowEvent::RedrawRequested => {
                self.tick_source();
                self.redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };
    info!(
        "viewing {}x{} synthetic source, updates every {}ms",
        config.source_width, config.source_height, config.update_interval_ms
    );

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, cli.paused);

    println!("Remote Canvas - drag to pan, wheel to zoom, Space pauses updates, R resets, Escape quits");
    event_loop.run_app(&mut app)?;

    Ok(())
}
