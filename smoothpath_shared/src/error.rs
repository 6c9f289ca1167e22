// src/error.rs - Error types for path construction and trajectory generation
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("Path needs at least 2 points, got {count}")]
    TooFewPoints { count: usize },
    #[error("Waypoints must have at least one coordinate")]
    ZeroDimension,
    #[error("Waypoint {index} has {found} coordinates, expected {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("Waypoint {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrajectoryError {
    #[error("Invalid path: {0}")]
    InvalidPath(#[from] PathError),
    #[error("Invalid timing: total_time={total_time}, time_step={time_step}")]
    InvalidTiming { total_time: f64, time_step: f64 },
    #[error("Invalid smoother parameters: {0}")]
    InvalidSmoother(String),
    #[error("Smoothing did not converge in stage {stage} after {iterations} iterations (change {change:e})")]
    NotConverged {
        stage: usize,
        iterations: usize,
        change: f64,
    },
    #[error("Smoothing diverged in stage {stage} after {iterations} iterations")]
    Diverged { stage: usize, iterations: usize },
    #[error("Trajectory would need {requested} points, limit is {limit}")]
    CapacityExceeded { requested: usize, limit: usize },
    #[error("Malformed trajectory layout: {0}")]
    MalformedLayout(String),
}
