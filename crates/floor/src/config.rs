//! Planner configuration.
//!
//! Compile-time constants live at the top of this module. Everything a user
//! may want to tune (room size, hold-to-select delay, camera limits) lives in
//! [`PlannerConfig`], which is read from a JSON file at startup:
//!
//! 1. the path in the `ROOM_PLANNER_CONFIG` environment variable, else
//! 2. `room_planner.json` in the working directory if it exists, else
//! 3. built-in defaults.
//!
//! Every field is optional in the file; missing fields keep their defaults.

use std::fmt;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Edge length of one grid cell in world units.
pub const CELL_SIZE: f32 = 1.0;
pub const DEFAULT_GRID_WIDTH: usize = 10;
pub const DEFAULT_GRID_HEIGHT: usize = 10;
/// Seconds a stationary touch has to rest on a piece before it gets selected.
pub const DEFAULT_SELECT_DELAY: f32 = 0.3;
pub const DEFAULT_MIN_ROOM_SIDE: usize = 1;
pub const DEFAULT_MAX_ROOM_SIDE: usize = 40;
/// Largest room side the floor will ever allocate, whatever the config says.
pub const ROOM_SIDE_LIMIT: usize = 512;

pub const CONFIG_ENV_VAR: &str = "ROOM_PLANNER_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "room_planner.json";

// =============================================================================
// Errors
// =============================================================================

/// Errors raised while loading a [`PlannerConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file is not valid JSON for a `PlannerConfig`.
    Parse(serde_json::Error),
    /// The file parsed, but a value is out of range.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "cannot read config {}: {source}", path.display())
            }
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Floor and interaction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorSettings {
    /// Initial number of cells along the world X axis.
    pub grid_width: usize,
    /// Initial number of cells along the world Z axis.
    pub grid_height: usize,
    /// Hold-to-select delay in seconds.
    pub select_delay: f32,
    /// Cell where newly created pieces appear.
    pub spawn_anchor: [i32; 2],
    /// Smallest room side the room sizer accepts.
    pub min_room_side: usize,
    /// Largest room side the room sizer accepts.
    pub max_room_side: usize,
}

impl Default for FloorSettings {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            select_delay: DEFAULT_SELECT_DELAY,
            spawn_anchor: [0, 0],
            min_room_side: DEFAULT_MIN_ROOM_SIDE,
            max_room_side: DEFAULT_MAX_ROOM_SIDE,
        }
    }
}

impl FloorSettings {
    pub fn spawn_anchor(&self) -> IVec2 {
        IVec2::new(self.spawn_anchor[0], self.spawn_anchor[1])
    }

    /// Whether the room sizer allows a room of `width` x `height` cells.
    pub fn allows_room_size(&self, width: i32, height: i32) -> bool {
        let range = self.min_room_side as i64..=self.max_room_side as i64;
        range.contains(&(width as i64)) && range.contains(&(height as i64))
    }
}

/// Camera limits and speeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Smallest orthographic half-height (closest zoom).
    pub min_zoom: f32,
    /// Largest orthographic half-height (farthest zoom).
    pub max_zoom: f32,
    pub initial_zoom: f32,
    /// Zoom change per pixel of pinch distance.
    pub pinch_zoom_speed: f32,
    /// Relative zoom change per mouse wheel line.
    pub wheel_zoom_speed: f32,
    /// World units moved per pixel of one-finger drag at `initial_zoom`.
    /// Scales with the current zoom.
    pub pan_speed: f32,
    pub pitch_degrees: f32,
    pub yaw_degrees: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            min_zoom: 4.0,
            max_zoom: 20.0,
            initial_zoom: 8.0,
            pinch_zoom_speed: 0.1,
            wheel_zoom_speed: 0.15,
            pan_speed: 0.02,
            pitch_degrees: 30.0,
            yaw_degrees: 45.0,
        }
    }
}

/// Top-level configuration resource.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub floor: FloorSettings,
    pub camera: CameraSettings,
}

impl PlannerConfig {
    /// Reject values the planner cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let floor = &self.floor;
        if floor.grid_width == 0 || floor.grid_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid size must be positive, got {}x{}",
                floor.grid_width, floor.grid_height
            )));
        }
        if !(floor.select_delay.is_finite() && floor.select_delay > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "select_delay must be positive, got {}",
                floor.select_delay
            )));
        }
        if floor.min_room_side == 0 || floor.min_room_side > floor.max_room_side {
            return Err(ConfigError::Invalid(format!(
                "room side range {}..={} is empty",
                floor.min_room_side, floor.max_room_side
            )));
        }
        if floor.max_room_side > ROOM_SIDE_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "max_room_side {} is above the limit of {ROOM_SIDE_LIMIT}",
                floor.max_room_side
            )));
        }
        if !floor.allows_room_size(floor.grid_width as i32, floor.grid_height as i32) {
            return Err(ConfigError::Invalid(format!(
                "grid size {}x{} is outside the room side range {}..={}",
                floor.grid_width, floor.grid_height, floor.min_room_side, floor.max_room_side
            )));
        }

        let camera = &self.camera;
        if !(camera.min_zoom > 0.0 && camera.min_zoom <= camera.max_zoom) {
            return Err(ConfigError::Invalid(format!(
                "zoom bounds {}..{} are inverted or non-positive",
                camera.min_zoom, camera.max_zoom
            )));
        }
        if camera.pinch_zoom_speed < 0.0 || camera.wheel_zoom_speed < 0.0 || camera.pan_speed < 0.0
        {
            return Err(ConfigError::Invalid(
                "camera speeds must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: PlannerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Resolve the config the way the binary does at startup. Never fails:
    /// a broken file falls back to defaults and is reported in the returned
    /// [`ConfigSource`].
    pub fn discover() -> (Self, ConfigSource) {
        let path = match std::env::var_os(CONFIG_ENV_VAR) {
            Some(p) => PathBuf::from(p),
            None => {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !local.exists() {
                    return (Self::default(), ConfigSource::Defaults);
                }
                local
            }
        };
        match Self::load(&path) {
            Ok(config) => (config, ConfigSource::File(path)),
            Err(err) => (
                Self::default(),
                ConfigSource::Fallback {
                    path,
                    error: err.to_string(),
                },
            ),
        }
    }
}

/// Where the active [`PlannerConfig`] came from. Logged once at startup.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSource {
    #[default]
    Defaults,
    File(PathBuf),
    Fallback { path: PathBuf, error: String },
}

pub fn report_config_source(source: Res<ConfigSource>, config: Res<PlannerConfig>) {
    let floor = &config.floor;
    match source.as_ref() {
        ConfigSource::Defaults => info!(
            "Using default planner config ({}x{} room)",
            floor.grid_width, floor.grid_height
        ),
        ConfigSource::File(path) => info!(
            "Loaded planner config from {} ({}x{} room)",
            path.display(),
            floor.grid_width,
            floor.grid_height
        ),
        ConfigSource::Fallback { path, error } => warn!(
            "Ignoring planner config {}: {}. Falling back to defaults.",
            path.display(),
            error
        ),
    }
}
