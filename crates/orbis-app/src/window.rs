//! Window creation and event handling via winit.
//!
//! [`AppState`] implements winit's [`ApplicationHandler`]. The redraw cycle
//! drives the frame loop: `RedrawRequested` ticks the [`GlobeState`], renders
//! it, and requests the next redraw.

use std::path::PathBuf;
use std::sync::Arc;

use orbis_config::Config;
use orbis_render::{
    RenderContext, RenderContextError, ShaderError, SurfaceError, TextureError, TextureImage,
    Viewport, ViewportResize, init_render_context_blocking,
};
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};

use crate::frame_clock::FrameClock;
use crate::frame_loop::{GlobeState, RenderLoop};
use crate::renderer::SceneRenderer;

/// Fatal errors raised while bringing up the window and renderer.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("GPU initialization failed: {0}")]
    Render(#[from] RenderContextError),
    #[error("globe texture: {0}")]
    Texture(#[from] TextureError),
    #[error("shader: {0}")]
    Shader(#[from] ShaderError),
}

/// Returns [`WindowAttributes`] based on the given configuration.
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

/// Config sections that differ between `old` and `new` and are only read at
/// startup.
fn restart_required(old: &Config, new: &Config) -> Vec<&'static str> {
    let mut sections = Vec::new();
    if old.window != new.window {
        sections.push("window");
    }
    if old.scene != new.scene {
        sections.push("scene");
    }
    if old.debug.log_level != new.debug.log_level {
        sections.push("debug.log_level");
    }
    sections
}

/// Everything that exists once the window is up.
struct Running {
    window: Arc<Window>,
    gpu: RenderContext,
    renderer: SceneRenderer,
    state: GlobeState,
}

pub struct AppState {
    config: Config,
    /// Directory `config.ron` is reloaded from when the window regains focus.
    config_dir: Option<PathBuf>,
    running: Option<Running>,
    clock: FrameClock,
    startup_error: Option<StartupError>,
}

impl AppState {
    pub fn new(config: Config, config_dir: Option<PathBuf>) -> Self {
        Self {
            config,
            config_dir,
            running: None,
            clock: FrameClock::new(),
            startup_error: None,
        }
    }

    /// Create the window, GPU context, scene, and renderer.
    fn start(&self, event_loop: &ActiveEventLoop) -> Result<Running, StartupError> {
        let window = Arc::new(event_loop.create_window(window_attributes_from_config(&self.config))?);

        let inner_size = window.inner_size();
        let viewport = Viewport::from_physical(
            inner_size.width,
            inner_size.height,
            window.scale_factor(),
            self.config.render.max_pixel_ratio,
        );
        let surface = viewport.surface_size();
        info!(
            "Viewport {}x{} (pixel ratio {:.2}), surface {}x{}",
            viewport.logical_width(),
            viewport.logical_height(),
            viewport.pixel_ratio(),
            surface.width,
            surface.height
        );

        let gpu = init_render_context_blocking(
            window.clone(),
            (surface.width, surface.height),
            self.config.window.vsync,
        )?;

        let texture = TextureImage::load(&self.config.scene.texture_path)?;
        let state = GlobeState::from_config(&self.config, viewport);
        let renderer =
            SceneRenderer::new(&gpu, &state.scene, &texture, self.config.render.clear_color)?;
        debug!("{} shader programs loaded", renderer.shader_count());

        Ok(Running {
            window,
            gpu,
            renderer,
            state,
        })
    }

    fn apply_resize(running: &mut Running, resize: ViewportResize) {
        let (width, height) = (resize.surface.width, resize.surface.height);
        running.gpu.resize(width, height);
        running.renderer.resize(&running.gpu.device, width, height);
        info!(
            "Resized to {}x{} logical, surface {}x{} (pixel ratio {:.2})",
            resize.logical_width, resize.logical_height, width, height, resize.pixel_ratio
        );
    }

    fn reload_config(&mut self) {
        let Some(dir) = &self.config_dir else {
            return;
        };
        match self.config.reload(dir) {
            Ok(Some(new_config)) => {
                let pending = restart_required(&self.config, &new_config);
                if !pending.is_empty() {
                    warn!(
                        "Config sections {} changed; they take effect after a restart",
                        pending.join(", ")
                    );
                }
                if let Some(running) = &mut self.running {
                    running
                        .renderer
                        .set_clear_color(new_config.render.clear_color);
                    if let Some(resize) = running.state.apply_config(&new_config) {
                        Self::apply_resize(running, resize);
                    }
                }
                self.config = new_config;
            }
            Ok(None) => {}
            Err(e) => warn!("Config reload failed: {e}"),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(running) = &mut self.running else {
            return;
        };

        let dt = self.clock.tick();
        running.state.tick(dt);
        running
            .renderer
            .update(&running.gpu.queue, &running.state.scene);

        match running.renderer.render(&running.gpu) {
            Ok(()) => {}
            Err(SurfaceError::Lost) => {
                let size = running.state.viewport().surface_size();
                running.gpu.resize(size.width, size.height);
            }
            Err(SurfaceError::OutOfMemory) => {
                error!("GPU out of memory");
                event_loop.exit();
                return;
            }
            Err(SurfaceError::Timeout) => {
                warn!("Surface timeout, skipping frame");
            }
        }

        let interval = self.config.debug.stats_interval_frames;
        if interval > 0 && self.clock.frame_count().is_multiple_of(interval) {
            info!(
                "Frame {}: {:.1} fps average, spin {:.3} rad",
                self.clock.frame_count(),
                self.clock.average_fps(),
                running.state.scene.globe_spin()
            );
        }

        running.window.request_redraw();
    }

    /// Take the error that stopped startup, if any.
    pub fn take_startup_error(&mut self) -> Option<StartupError> {
        self.startup_error.take()
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(running) => {
                running.window.request_redraw();
                self.running = Some(running);
            }
            Err(e) => {
                error!("Startup failed: {e}");
                self.startup_error = Some(e);
                event_loop.exit();
            }
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
            WindowEvent::Resized(new_size) => {
                if let Some(running) = &mut self.running
                    && let Some(resize) = running.state.on_resize(new_size.width, new_size.height)
                {
                    Self::apply_resize(running, resize);
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(running) = &mut self.running {
                    let inner = running.window.inner_size();
                    if let Some(resize) = running.state.on_scale_factor_changed(
                        scale_factor,
                        inner.width,
                        inner.height,
                    ) {
                        Self::apply_resize(running, resize);
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(running) = &mut self.running {
                    let logical = position.to_logical::<f64>(running.window.scale_factor());
                    running.state.on_pointer_moved(logical.x, logical.y);
                }
            }
            WindowEvent::Focused(true) => self.reload_config(),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

/// Run the application until the window is closed.
///
/// # Errors
///
/// Returns the [`StartupError`] that stopped the window from coming up.
#[instrument(skip_all)]
pub fn run(config: Config, config_dir: Option<PathBuf>) -> Result<(), StartupError> {
    let event_loop = EventLoop::new()?;
    let mut app = AppState::new(config, config_dir);
    event_loop.run_app(&mut app)?;
    match app.take_startup_error() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_starts_idle() {
        let mut app = AppState::new(Config::default(), None);
        assert!(app.running.is_none());
        assert!(app.take_startup_error().is_none());
    }

    #[test]
    fn test_window_attributes_from_config() {
        let mut config = Config::default();
        config.window.title = "Globe".to_string();
        let attrs = window_attributes_from_config(&config);
        assert_eq!(attrs.title, "Globe");
        assert!(attrs.fullscreen.is_none());

        config.window.fullscreen = true;
        let attrs = window_attributes_from_config(&config);
        assert!(attrs.fullscreen.is_some());
    }

    #[test]
    fn test_reload_without_dir_is_noop() {
        let mut app = AppState::new(Config::default(), None);
        app.reload_config();
        assert_eq!(app.config, Config::default());
    }

    #[test]
    fn test_reload_picks_up_changes() {
        let dir = tempfile::tempdir().unwrap();
        let mut changed = Config::default();
        changed.motion.spin_per_frame = 0.02;
        changed.save(dir.path()).unwrap();

        let mut app = AppState::new(Config::default(), Some(dir.path().to_path_buf()));
        app.reload_config();
        assert_eq!(app.config.motion.spin_per_frame, 0.02);
    }

    #[test]
    fn test_restart_required_sections() {
        let old = Config::default();
        let mut new = old.clone();
        new.motion.spin_per_frame = 0.01;
        new.render.max_pixel_ratio = 1.0;
        new.render.clear_color = [0.1, 0.0, 0.0];
        new.debug.stats_interval_frames = 10;
        assert!(restart_required(&old, &new).is_empty());

        new.scene.star_count = 10;
        new.window.vsync = false;
        new.debug.log_level = "debug".to_string();
        assert_eq!(
            restart_required(&old, &new),
            vec!["window", "scene", "debug.log_level"]
        );
    }

    #[test]
    fn test_reload_keeps_live_render_settings() {
        let dir = tempfile::tempdir().unwrap();
        let mut changed = Config::default();
        changed.render.clear_color = [0.0, 0.0, 0.2];
        changed.render.max_pixel_ratio = 1.0;
        changed.save(dir.path()).unwrap();

        let mut app = AppState::new(Config::default(), Some(dir.path().to_path_buf()));
        app.reload_config();
        assert_eq!(app.config.render, changed.render);
    }

    #[test]
    fn test_startup_error_messages() {
        let err = StartupError::from(TextureError::ZeroDimensions {
            width: 0,
            height: 0,
        });
        assert!(err.to_string().starts_with("globe texture:"));
    }
}
