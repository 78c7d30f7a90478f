//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Rendering settings.
    pub render: RenderConfig,
    /// Scene construction settings.
    pub scene: SceneConfig,
    /// Per-frame motion settings.
    pub motion: MotionConfig,
    /// Input settings.
    pub input: InputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Start in fullscreen mode.
    pub fullscreen: bool,
    /// Enable vsync (PresentMode::Fifo).
    pub vsync: bool,
    /// Window title.
    pub title: String,
}

/// Rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Upper bound applied to the display's device pixel ratio.
    pub max_pixel_ratio: f64,
    /// Background clear color (linear RGB).
    pub clear_color: [f64; 3],
}

/// Scene construction configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Equirectangular texture wrapped around the globe.
    pub texture_path: PathBuf,
    /// Globe radius in world units.
    pub globe_radius: f32,
    /// Horizontal segments of the sphere geometry.
    pub width_segments: u32,
    /// Vertical segments of the sphere geometry.
    pub height_segments: u32,
    /// Number of stars in the backdrop point cloud.
    pub star_count: u32,
    /// Star field seed. `None` draws a fresh field each run.
    pub star_seed: Option<u64>,
    /// Half-extent of the star volume on X and Y.
    pub star_half_extent: f32,
    /// Depth of the star volume behind the origin (along -Z).
    pub star_depth: f32,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Near clip plane distance.
    pub near: f32,
    /// Far clip plane distance.
    pub far: f32,
    /// Camera distance from the origin along +Z.
    pub camera_distance: f32,
    /// Point light position.
    pub light_position: [f32; 3],
    /// Point light intensity.
    pub light_intensity: f32,
}

/// Per-frame motion configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MotionConfig {
    /// Globe spin added every frame, in radians.
    pub spin_per_frame: f32,
    /// Scale the spin by elapsed time (relative to 60 fps) instead of
    /// applying it once per frame.
    pub time_scaled_spin: bool,
    /// Group pitch per unit of normalized pointer Y.
    pub pitch_factor: f32,
    /// Group yaw per unit of normalized pointer X.
    pub yaw_factor: f32,
    /// Duration of each rotation tween in seconds.
    pub ease_duration: f32,
    /// Easing curve used by rotation tweens.
    pub ease: EaseKind,
}

/// Easing curve names accepted in the config file.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum EaseKind {
    Linear,
    #[default]
    QuadOut,
    CubicOut,
    QuadInOut,
}

/// How the vertical pointer coordinate is normalized.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum PointerYMapping {
    /// `y / height * 2 + 1`. Ranges over `[1, 3]`.
    #[default]
    Legacy,
    /// `-(y / height * 2 - 1)`, conventional NDC with +Y up.
    Mirrored,
}

/// Input configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Vertical pointer normalization.
    pub pointer_y_mapping: PointerYMapping,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Log frame statistics every this many frames (0 disables).
    pub stats_interval_frames: u64,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
            title: "Orbis".to_string(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_pixel_ratio: 2.0,
            clear_color: [0.0, 0.0, 0.0],
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            texture_path: PathBuf::from("assets/earth.png"),
            globe_radius: 5.0,
            width_segments: 50,
            height_segments: 50,
            star_count: 800,
            star_seed: None,
            star_half_extent: 100.0,
            star_depth: 1200.0,
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 100.0,
            camera_distance: 15.0,
            light_position: [2.0, 3.0, 4.0],
            light_intensity: 0.1,
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            spin_per_frame: 0.003,
            time_scaled_spin: false,
            pitch_factor: 0.3,
            yaw_factor: 0.5,
            ease_duration: 2.0,
            ease: EaseKind::default(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            stats_interval_frames: 600,
        }
    }
}

// --- Load / Save / Reload ---

/// File name of the config inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let config = read_config(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path,
            source,
        })
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = read_config(&config_dir.join(CONFIG_FILE_NAME))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
