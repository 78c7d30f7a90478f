//! Orbis application: frame loop, GPU scene renderer, and the winit event
//! loop that ties them to a window.

pub mod frame_clock;
pub mod frame_loop;
pub mod platform;
pub mod renderer;
pub mod window;

pub use frame_clock::FrameClock;
pub use frame_loop::{GlobeState, RenderLoop};
pub use platform::{APP_NAME, PlatformDirs, PlatformError};
pub use renderer::SceneRenderer;
pub use window::{AppState, StartupError, run};
