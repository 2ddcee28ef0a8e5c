//! Simulation builder and frame driver.

use crate::emitter::{Emitter, EmitterConfig};
use crate::error::{ConfigError, SimulationError};
use crate::gpu::{GpuState, RenderConfig};
use crate::input::Input;
use crate::pool::ParticlePool;
use crate::rng::{RandomSource, StdRandom};
use crate::step::step;
use crate::time::FrameClock;
use glam::Vec2;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::{MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::KeyCode,
    window::{Window, WindowId},
};

/// A particle simulation builder.
///
/// Use method chaining to configure, then call `.run()` to open the window.
/// Holding the left mouse button emits particles at the cursor; Escape or
/// closing the window ends the run.
#[derive(Clone, Debug)]
pub struct Simulation {
    capacity: usize,
    emitter: EmitterConfig,
    window_size: (u32, u32),
    title: String,
    point_size: f32,
    clear_color: wgpu::Color,
    seed: Option<u64>,
    vsync: bool,
}

impl Simulation {
    /// Create a new simulation with default settings.
    pub fn new() -> Self {
        Self {
            capacity: 1_000,
            emitter: EmitterConfig::default(),
            window_size: (1600, 1200),
            title: "pointburst".to_string(),
            point_size: 4.0,
            clear_color: wgpu::Color::BLACK,
            seed: None,
            vsync: false,
        }
    }

    /// Set the number of pool slots.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_emitter(mut self, emitter: EmitterConfig) -> Self {
        self.emitter = emitter;
        self
    }

    /// Window size in physical pixels.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Point sprite diameter in pixels.
    pub fn with_point_size(mut self, size: f32) -> Self {
        self.point_size = size;
        self
    }

    pub fn with_clear_color(mut self, r: f64, g: f64, b: f64) -> Self {
        self.clear_color = wgpu::Color { r, g, b, a: 1.0 };
        self
    }

    /// Use a fixed RNG seed instead of OS entropy.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Throttle frames to the display refresh rate. Off by default.
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    /// Check the settings without opening a window.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.window_size.0 == 0 || self.window_size.1 == 0 {
            return Err(ConfigError::ZeroWindowSize);
        }
        if self.point_size.is_nan() || self.point_size <= 0.0 {
            return Err(ConfigError::NonPositivePointSize(self.point_size));
        }
        self.emitter.validate()
    }

    /// Run the simulation. This blocks until the window is closed.
    pub fn run(self) -> Result<(), SimulationError> {
        self.validate()?;

        log::info!(
            "Starting with {} particles, {} spawn attempts per frame, speed {:?}, lifetime {:?}",
            self.capacity,
            self.emitter.particles_per_frame,
            self.emitter.speed,
            self.emitter.lifetime
        );

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn scene(&self) -> Scene<StdRandom> {
        let rng = match self.seed {
            Some(seed) => StdRandom::from_seed(seed),
            None => StdRandom::from_entropy(),
        };
        let (w, h) = self.window_size;
        let centre = Vec2::new(w as f32, h as f32) * 0.5;
        Scene::new(
            ParticlePool::new(self.capacity, centre),
            Emitter::new(self.emitter.clone()),
            rng,
        )
    }

    fn render_config(&self) -> RenderConfig {
        RenderConfig {
            capacity: self.capacity,
            point_size: self.point_size,
            clear_color: self.clear_color,
            vsync: self.vsync,
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

/// CPU-side state advanced once per frame.
#[derive(Debug)]
pub struct Scene<R: RandomSource> {
    pub pool: ParticlePool,
    pub emitter: Emitter,
    pub rng: R,
}

impl<R: RandomSource> Scene<R> {
    pub fn new(pool: ParticlePool, emitter: Emitter, rng: R) -> Self {
        Self { pool, emitter, rng }
    }

    /// One frame: emit at `trigger` if present, then step by `dt`.
    pub fn update(&mut self, trigger: Option<Vec2>, dt: f32) {
        if let Some(origin) = trigger {
            self.emitter.emit(&mut self.pool, origin, &mut self.rng);
        }
        step(&mut self.pool, dt);
    }
}

struct App {
    settings: Simulation,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    scene: Scene<StdRandom>,
    input: Input,
    clock: FrameClock,
    error: Option<SimulationError>,
}

impl App {
    fn new(settings: Simulation) -> Self {
        let scene = settings.scene();
        Self {
            settings,
            window: None,
            gpu_state: None,
            scene,
            input: Input::new(),
            clock: FrameClock::new(),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), SimulationError> {
        let (width, height) = self.settings.window_size;
        let window_attrs = Window::default_attributes()
            .with_title(self.settings.title.clone())
            .with_inner_size(winit::dpi::PhysicalSize::new(width, height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        self.window = Some(window.clone());

        let gpu_state = pollster::block_on(GpuState::new(window, self.settings.render_config()))?;
        self.gpu_state = Some(gpu_state);
        // Don't count GPU setup as the first frame's delta.
        self.clock = FrameClock::new();
        Ok(())
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let dt = self.clock.tick();

        if self.input.key_pressed(KeyCode::Escape) {
            event_loop.exit();
            return;
        }

        let trigger = self
            .input
            .mouse_held(MouseButton::Left)
            .then(|| self.input.cursor_position());
        self.scene.update(trigger, dt);
        self.input.begin_frame();

        if let Some(gpu_state) = &mut self.gpu_state {
            gpu_state.upload(self.scene.pool.snapshot());
            match gpu_state.render() {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    gpu_state.reconfigure()
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("GPU out of memory, exiting");
                    event_loop.exit();
                }
                Err(wgpu::SurfaceError::Timeout) => log::warn!("Surface timeout, frame skipped"),
                Err(e) => log::error!("Render error: {:?}", e),
            }
        }

        if self.clock.fps_updated() {
            log::debug!(
                "frame {}: {:.1} fps ({:.2} ms), {}/{} particles alive",
                self.clock.frame(),
                self.clock.fps(),
                self.clock.delta() * 1000.0,
                self.scene.pool.alive_count(),
                self.scene.pool.capacity()
            );
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                log::error!("{}", e);
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
