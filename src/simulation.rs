//! Starfield builder and runner.

use std::sync::Arc;

use tracing::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::FieldConfig;
use crate::error::RunError;
use crate::field::ParticleField;
use crate::mesh;
use crate::shader::Vertex;
use crate::time::Time;
use crate::window::GpuState;

/// The starfield application builder.
///
/// Use method chaining to configure, then call `.run()` to open the
/// window and block until it is closed.
///
/// # Example
///
/// ```ignore
/// Starfield::new()
///     .with_particle_count(300)
///     .with_title("night sky")
///     .run()?;
/// ```
pub struct Starfield {
    config: FieldConfig,
    title: String,
    width: u32,
    height: u32,
}

impl Starfield {
    /// Create a starfield with default settings.
    pub fn new() -> Self {
        Self {
            config: FieldConfig::default(),
            title: "stardrift".to_string(),
            width: 1280,
            height: 720,
        }
    }

    /// Replace the whole field configuration.
    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the number of particles.
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.config.particle_count = count;
        self
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Run the starfield. Blocks until the window is closed.
    ///
    /// The only failures are environment setup: event loop, window, or
    /// GPU initialization. Once the loop is running, per-frame problems
    /// degrade gracefully and are logged instead.
    pub fn run(self) -> Result<(), RunError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self);
        event_loop.run_app(&mut app)?;

        match app.setup_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for Starfield {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    settings: Starfield,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    field: Option<ParticleField>,
    batch: Vec<Vertex>,
    time: Time,
    /// Set when environment setup fails; `run` surfaces it after the
    /// event loop unwinds.
    setup_error: Option<RunError>,
}

impl App {
    fn new(settings: Starfield) -> Self {
        Self {
            settings,
            window: None,
            gpu: None,
            field: None,
            batch: Vec::new(),
            time: Time::new(),
            setup_error: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(&self.settings.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.settings.width,
                self.settings.height,
            ));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("window creation failed: {e}");
                self.setup_error = Some(RunError::Window(e));
                event_loop.exit();
                return;
            }
        };

        let gpu = match pollster::block_on(GpuState::new(window.clone())) {
            Ok(gpu) => gpu,
            Err(e) => {
                error!("GPU initialization failed: {e}");
                self.setup_error = Some(e.into());
                event_loop.exit();
                return;
            }
        };

        info!(
            width = gpu.config.width,
            height = gpu.config.height,
            particles = self.settings.config.particle_count,
            "starfield running"
        );

        self.field = Some(ParticleField::new(
            gpu.config.width as f32,
            gpu.config.height as f32,
            self.settings.config,
        ));
        self.gpu = Some(gpu);
        self.window = Some(window.clone());
        window.request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
                // A resize discards the whole particle set.
                if let Some(field) = &mut self.field {
                    if physical_size.width > 0 && physical_size.height > 0 {
                        field.resize(physical_size.width as f32, physical_size.height as f32);
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(field) = &mut self.field {
                    field.set_pointer(position.x as f32, position.y as f32);
                }
            }
            WindowEvent::CursorLeft { .. } => {
                if let Some(field) = &mut self.field {
                    field.clear_pointer();
                }
            }
            WindowEvent::RedrawRequested => {
                if let (Some(gpu), Some(field)) = (&mut self.gpu, &mut self.field) {
                    field.advance();
                    mesh::build_frame(field.particles(), &mut self.batch);

                    match gpu.render(&self.batch) {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost) => {
                            gpu.resize(winit::dpi::PhysicalSize {
                                width: gpu.config.width,
                                height: gpu.config.height,
                            })
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            error!("out of GPU memory, exiting");
                            event_loop.exit();
                        }
                        Err(e) => warn!("render error: {e:?}"),
                    }

                    if self.time.tick() {
                        if let Some(window) = &self.window {
                            window.set_title(&format!(
                                "{} - {:.0} fps",
                                self.settings.title,
                                self.time.fps()
                            ));
                        }
                    }
                }

                // Schedule the next frame; the loop only stops when the
                // window goes away.
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let starfield = Starfield::new();
        assert_eq!(starfield.config.particle_count, 150);
        assert_eq!((starfield.width, starfield.height), (1280, 720));
        assert_eq!(starfield.title, "stardrift");
    }

    #[test]
    fn test_builder_chain() {
        let starfield = Starfield::new()
            .with_particle_count(42)
            .with_title("test")
            .with_size(640, 480);

        assert_eq!(starfield.config.particle_count, 42);
        assert_eq!(starfield.title, "test");
        assert_eq!((starfield.width, starfield.height), (640, 480));
    }

    #[test]
    fn test_with_config_replaces_tunables() {
        let config = FieldConfig::default().with_gravity_strength(99.0);
        let starfield = Starfield::new().with_config(config);
        assert_eq!(starfield.config.gravity_strength, 99.0);
    }
}
