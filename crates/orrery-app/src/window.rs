//! Window creation and event handling via winit.
//!
//! [`AppState`] implements winit's [`ApplicationHandler`]: it owns the
//! simulation, the GPU resources and the orbit camera, and runs
//! ticks → compose → render on every redraw.

use std::sync::Arc;

use orrery_bodies::SolarSystem;
use orrery_config::Config;
use orrery_input::{MouseState, OrbitControls};
use orrery_render::{
    Camera, DepthBuffer, DirectoryTextureSource, RenderContext, SceneRenderError, SceneRenderer,
    SurfaceError, clear_color_from_rgb, init_render_context_blocking,
};
use tracing::{debug, error, info, instrument, trace, warn};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};

use crate::error::AppError;
use crate::game_loop::GameLoop;
use crate::simulation::{Simulation, orbit_settings};

pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    let attrs = WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ));
    if config.window.fullscreen {
        attrs.with_fullscreen(Some(Fullscreen::Borderless(None)))
    } else {
        attrs
    }
}

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    TogglePause,
    Exit,
}

pub fn key_action(key: PhysicalKey) -> Option<KeyAction> {
    match key {
        PhysicalKey::Code(KeyCode::Space) => Some(KeyAction::TogglePause),
        PhysicalKey::Code(KeyCode::Escape) => Some(KeyAction::Exit),
        _ => None,
    }
}

/// Everything created once the window exists.
struct Graphics {
    window: Arc<Window>,
    gpu: RenderContext,
    depth: DepthBuffer,
    renderer: SceneRenderer,
}

pub struct AppState {
    config: Config,
    sim: Simulation,
    graphics: Option<Graphics>,
    game_loop: GameLoop,
    mouse: MouseState,
    controls: OrbitControls,
    camera: Camera,
    clear_color: wgpu::Color,
    next_summary_tick: u64,
}

impl AppState {
    pub fn new(config: Config, system: SolarSystem) -> Result<Self, AppError> {
        let sim = Simulation::new(&config, system)?;
        let setup = sim.composer().config().camera;
        let controls = OrbitControls::new(setup.position, setup.target, orbit_settings(&config));
        let aspect = config.window.width as f32 / config.window.height.max(1) as f32;
        let mut camera = Camera::perspective(setup.fov_y_degrees, aspect, setup.near, setup.far);
        camera.look_at(controls.eye(), controls.target());

        Ok(Self {
            clear_color: clear_color_from_rgb(config.render.clear_color),
            next_summary_tick: config.debug.summary_interval_ticks,
            config,
            sim,
            graphics: None,
            game_loop: GameLoop::new(),
            mouse: MouseState::new(),
            controls,
            camera,
        })
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let window = Arc::new(event_loop.create_window(window_attributes_from_config(&self.config))?);
        let gpu = init_render_context_blocking(window.clone(), self.config.window.vsync)?;
        let (width, height) = gpu.size();
        info!(
            "GPU ready: {} ({:?}), surface {}x{} {:?}",
            gpu.adapter.get_info().name,
            gpu.adapter.get_info().backend,
            width,
            height,
            gpu.surface_format
        );

        let depth = DepthBuffer::new(&gpu.device, width, height);
        let textures = DirectoryTextureSource::new(&self.config.assets.texture_dir);
        let scene = self.sim.compose()?;
        let renderer =
            SceneRenderer::new(&gpu.device, &gpu.queue, gpu.surface_format, &scene, &textures)?;
        self.camera.set_aspect_ratio(width as f32, height as f32);

        self.graphics = Some(Graphics {
            window,
            gpu,
            depth,
            renderer,
        });
        Ok(())
    }

    fn handle_resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.camera.set_aspect_ratio(width as f32, height as f32);
        if let Some(graphics) = &mut self.graphics {
            graphics.gpu.resize(width, height);
            graphics.depth.resize(&graphics.gpu.device, width, height);
        }
        debug!("Window resized to {}x{}", width, height);
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key: PhysicalKey) {
        match key_action(key) {
            Some(KeyAction::TogglePause) => {
                let paused = self.sim.toggle_pause();
                info!("Animation {}", if paused { "paused" } else { "resumed" });
            }
            Some(KeyAction::Exit) => {
                info!("Escape pressed, shutting down");
                event_loop.exit();
            }
            None => {}
        }
    }

    fn log_summary(&mut self) {
        let interval = self.config.debug.summary_interval_ticks;
        if interval == 0 || self.game_loop.update_count() < self.next_summary_tick {
            return;
        }
        self.next_summary_tick = self.game_loop.update_count() + interval;
        info!(
            "Frame tick {}: {} ticks applied, {} frames drawn, paused {}, camera distance {:.1}",
            self.game_loop.update_count(),
            self.sim.ticks(),
            self.game_loop.frame_count(),
            self.sim.is_paused(),
            self.controls.distance()
        );
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let sim = &mut self.sim;
        let mut failure = None;
        self.game_loop.tick(
            |_dt, _sim_time| {
                if failure.is_none()
                    && let Err(e) = sim.tick()
                {
                    failure = Some(e);
                }
            },
            |_alpha| {},
        );
        if let Some(e) = failure {
            error!("Animation failed: {e}");
            event_loop.exit();
            return;
        }

        self.controls.update(&self.mouse);
        self.mouse.end_frame();
        self.camera.look_at(self.controls.eye(), self.controls.target());
        self.log_summary();

        let scene = match self.sim.compose() {
            Ok(scene) => scene,
            Err(e) => {
                error!("Scene composition failed: {e}");
                event_loop.exit();
                return;
            }
        };

        let Some(graphics) = &mut self.graphics else {
            return;
        };
        if let Err(e) = graphics
            .renderer
            .update(&graphics.gpu.queue, &scene, &self.camera)
        {
            error!("Renderer update failed: {e}");
            event_loop.exit();
            return;
        }
        match graphics
            .renderer
            .render(&graphics.gpu, &graphics.depth, self.clear_color)
        {
            Ok(stats) => trace!(
                "Frame drawn: {} draw calls, {} labels skipped",
                stats.draw_calls,
                stats.skipped_labels
            ),
            Err(SceneRenderError::Surface(SurfaceError::OutOfMemory)) => {
                error!("GPU out of memory, shutting down");
                event_loop.exit();
            }
            Err(e) => warn!("Frame skipped: {e}"),
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }
        if let Err(e) = self.init_graphics(event_loop) {
            error!("{e}");
            event_loop.exit();
            return;
        }
        if let Some(graphics) = &self.graphics {
            graphics.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => self.handle_resize(size.width, size.height),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    self.handle_key(event_loop, event.physical_key);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse.on_cursor_moved(position.x, position.y);
            }
            WindowEvent::CursorLeft { .. } => self.mouse.on_cursor_left(),
            WindowEvent::MouseInput { state, button, .. } => self.mouse.on_button(button, state),
            WindowEvent::MouseWheel { delta, .. } => self.mouse.on_scroll(delta),
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                if let Some(graphics) = &self.graphics {
                    graphics.window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Open the window and run until it closes.
#[instrument(skip_all)]
pub fn run_with_config(config: Config, system: SolarSystem) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    let mut app = AppState::new(config, system)?;
    event_loop.run_app(&mut app)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use orrery_bodies::solar_system;

    #[test]
    fn test_key_bindings() {
        assert_eq!(
            key_action(PhysicalKey::Code(KeyCode::Space)),
            Some(KeyAction::TogglePause)
        );
        assert_eq!(
            key_action(PhysicalKey::Code(KeyCode::Escape)),
            Some(KeyAction::Exit)
        );
        assert_eq!(key_action(PhysicalKey::Code(KeyCode::KeyA)), None);
    }

    #[test]
    fn test_window_attributes_from_config() {
        let mut config = Config::default();
        config.window.fullscreen = true;
        let _attrs = window_attributes_from_config(&config);
    }

    #[test]
    fn test_initial_camera_at_configured_position() {
        let state = AppState::new(Config::default(), solar_system().unwrap()).unwrap();
        let expected = Vec3::new(-50.0, 90.0, 150.0);
        assert!(state.camera().position.distance(expected) < 1e-3);
        let forward = state.camera().forward();
        assert!(forward.dot(-expected.normalize()) > 0.999);
    }

    #[test]
    fn test_app_starts_without_graphics() {
        let mut config = Config::default();
        config.animation.paused = true;
        let state = AppState::new(config, solar_system().unwrap()).unwrap();
        assert!(state.graphics.is_none());
        assert!(state.simulation().is_paused());
    }
}
