//! Configuration system for Orbis.
//!
//! Provides runtime-configurable settings that persist to disk as RON files.
//! Supports CLI overrides via clap, hot-reload detection, and forward/backward
//! compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, Config, DebugConfig, EaseKind, InputConfig, MotionConfig, PointerYMapping, RenderConfig,
    SceneConfig, WindowConfig,
};
pub use error::ConfigError;
