//! # Trajectory Configuration
//!
//! Timing, planner and smoothing parameters for a pipeline run, plus an
//! optional set of waypoints for the demo driver.
//!
//! ## Example: TOML Configuration
//!
//! ```toml
//! [planner]
//! total_time = 15.0
//! time_step = 0.1
//! strategy = "legacy"
//! reduce_waypoints = false
//!
//! [smoothing]
//! data_weight = 0.7
//! smooth_weight = 0.3
//! tolerance = 1e-7
//! max_iterations = 10000
//!
//! [waypoints]
//! points = [[1.0, 2.0], [2.0, 7.0], [4.0, 7.0], [6.0, 9.0], [10.0, 11.0]]
//! ```
//!
//! Every section and key is optional; missing values fall back to the defaults below.

// src/config.rs - Single configuration file
use serde::{Deserialize, Serialize};
use smoothpath_shared::pipeline::{PipelineConfig, DEFAULT_MAX_POINTS};
use smoothpath_shared::planner::PlanStrategy;
use smoothpath_shared::reduce::DEFAULT_ANGLE_TOLERANCE;
use smoothpath_shared::smoother::{
    SmootherConfig, DEFAULT_DATA_WEIGHT, DEFAULT_MAX_ITERATIONS, DEFAULT_SMOOTH_WEIGHT,
    DEFAULT_TOLERANCE,
};
use smoothpath_shared::{Path, PathError, TrajectoryError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub smoothing: SmoothingConfig,
    #[serde(default)]
    pub waypoints: Option<WaypointsConfig>,
}

/// Timing budget and injection planning.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlannerConfig {
    #[serde(default = "default_total_time")]
    pub total_time: f64,
    #[serde(default = "default_time_step")]
    pub time_step: f64,
    #[serde(default)]
    pub strategy: PlanStrategy,
    #[serde(default = "default_max_points")]
    pub max_points: usize,
    #[serde(default)]
    pub reduce_waypoints: bool,
    #[serde(default = "default_angle_tolerance")]
    pub angle_tolerance: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            total_time: default_total_time(),
            time_step: default_time_step(),
            strategy: PlanStrategy::default(),
            max_points: default_max_points(),
            reduce_waypoints: false,
            angle_tolerance: default_angle_tolerance(),
        }
    }
}

/// Relaxation weights and stopping rules.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmoothingConfig {
    #[serde(default = "default_data_weight")]
    pub data_weight: f64,
    #[serde(default = "default_smooth_weight")]
    pub smooth_weight: f64,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            data_weight: default_data_weight(),
            smooth_weight: default_smooth_weight(),
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WaypointsConfig {
    pub points: Vec<Vec<f64>>,
}

impl WaypointsConfig {
    pub fn to_path(&self) -> Result<Path, PathError> {
        let dimension = self.points.first().map_or(0, |p| p.len());
        Path::from_rows(&self.points, dimension)
    }
}

impl Config {
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            smoother: SmootherConfig {
                data_weight: self.smoothing.data_weight,
                smooth_weight: self.smoothing.smooth_weight,
                tolerance: self.smoothing.tolerance,
                max_iterations: self.smoothing.max_iterations,
            },
            strategy: self.planner.strategy,
            reduce_waypoints: self.planner.reduce_waypoints,
            angle_tolerance: self.planner.angle_tolerance,
            max_points: self.planner.max_points,
        }
    }

    /// Check everything a pipeline run would reject, before running it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let PlannerConfig {
            total_time,
            time_step,
            angle_tolerance,
            max_points,
            ..
        } = self.planner;
        if !(total_time.is_finite() && total_time > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "planner.total_time must be positive, got {}",
                total_time
            )));
        }
        if !(time_step.is_finite() && time_step > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "planner.time_step must be positive, got {}",
                time_step
            )));
        }
        if !(angle_tolerance.is_finite() && angle_tolerance >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "planner.angle_tolerance must be non-negative, got {}",
                angle_tolerance
            )));
        }
        if max_points < 2 {
            return Err(ConfigError::Invalid(format!(
                "planner.max_points must be at least 2, got {}",
                max_points
            )));
        }
        self.pipeline_config()
            .smoother
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if let Some(waypoints) = &self.waypoints {
            waypoints
                .to_path()
                .map_err(|e| ConfigError::Invalid(TrajectoryError::from(e).to_string()))?;
        }
        Ok(())
    }
}

fn default_total_time() -> f64 { 15.0 }
fn default_time_step() -> f64 { 0.1 }
fn default_max_points() -> usize { DEFAULT_MAX_POINTS }
fn default_angle_tolerance() -> f64 { DEFAULT_ANGLE_TOLERANCE }
fn default_data_weight() -> f64 { DEFAULT_DATA_WEIGHT }
fn default_smooth_weight() -> f64 { DEFAULT_SMOOTH_WEIGHT }
fn default_tolerance() -> f64 { DEFAULT_TOLERANCE }
fn default_max_iterations() -> usize { DEFAULT_MAX_ITERATIONS }

/// Load configuration from a TOML file at the given path.
pub fn load_config(path: &str) -> Result<Config, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::error!("Failed to parse config TOML: {}", e);
                Err(ConfigError::Toml(e))
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file '{}': {}", path, e);
            Err(ConfigError::Io(e))
        }
    }
}
