use std::path::Path;

use cubesnake_common::{Coordinate, Direction};
use serde::{Deserialize, Serialize};

/// Errors from loading or validating a game configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Largest accepted cells per face side.
pub const MAX_GRID_SIZE: i32 = 1024;

/// Level settings. Fixed once the controller is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cells per side of every face.
    pub grid_size: i32,
    /// World units between neighbouring cell centres.
    pub cell_size: f32,
    /// Number of faces in the ring.
    pub face_count: usize,
    /// Head cell on face 0 when a game starts.
    pub start: Coordinate,
    /// Heading when a game starts.
    pub start_direction: Direction,
    /// Seconds between moves.
    pub move_interval: f32,
    /// Seconds between body part removals after game over. 0 removes all at once.
    pub teardown_interval: f32,
    /// Seed for target placement.
    pub seed: u64,
    /// Count the head's own cell as free when picking a target.
    pub head_cell_is_free: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 11,
            cell_size: 1.0,
            face_count: 4,
            start: Coordinate::new(5, 5),
            start_direction: Direction::Up,
            move_interval: 0.25,
            teardown_interval: 0.05,
            seed: 0,
            head_cell_is_free: true,
        }
    }
}

impl GameConfig {
    /// Square grid with the head in the middle of face 0.
    pub fn new(grid_size: i32, face_count: usize) -> Self {
        Self {
            grid_size,
            face_count,
            start: Coordinate::new(grid_size / 2, grid_size / 2),
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size <= 0 {
            return Err(ConfigError::Invalid(format!(
                "grid_size must be positive, got {}",
                self.grid_size
            )));
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::Invalid(format!(
                "grid_size must be at most {MAX_GRID_SIZE}, got {}",
                self.grid_size
            )));
        }
        if self.face_count == 0 {
            return Err(ConfigError::Invalid("face_count must be positive".into()));
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "cell_size must be a positive number, got {}",
                self.cell_size
            )));
        }
        let in_range = |v: i32| (0..self.grid_size).contains(&v);
        if !(in_range(self.start.x) && in_range(self.start.y)) {
            return Err(ConfigError::Invalid(format!(
                "start {} is outside the {}x{} grid",
                self.start, self.grid_size, self.grid_size
            )));
        }
        if !(self.move_interval.is_finite() && self.move_interval > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "move_interval must be a positive number of seconds, got {}",
                self.move_interval
            )));
        }
        if !(self.teardown_interval.is_finite() && self.teardown_interval >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "teardown_interval must not be negative, got {}",
                self.teardown_interval
            )));
        }
        Ok(())
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json` file, or YAML for any other extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&text),
            _ => Self::from_yaml_str(&text),
        }
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}
