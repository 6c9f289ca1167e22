// src/smoother.rs - Iterative relaxation of an upsampled path
//
// Each pass pulls interior points toward the reference path (data term) and
// toward the midpoint of their neighbours (smooth term). Updates are applied in
// place, low index to high, so a pass already sees the values it just wrote.
// Endpoints are never touched.
//
// Weights outside the stable range can make the total change grow instead of
// shrink. The stable range for this three-point stencil is both weights in
// (0, 1) with data_weight + 2 * smooth_weight < 1; the pipeline defaults sit
// outside it and still converge, so the range is reported, not enforced.
use serde::{Deserialize, Serialize};

use crate::error::TrajectoryError;
use crate::path::Path;

pub const DEFAULT_DATA_WEIGHT: f64 = 0.7;
pub const DEFAULT_SMOOTH_WEIGHT: f64 = 0.3;
pub const DEFAULT_TOLERANCE: f64 = 0.0000001;
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmootherConfig {
    /// Pull toward the reference path.
    pub data_weight: f64,
    /// Pull toward the neighbours' midpoint.
    pub smooth_weight: f64,
    /// Stop once a full pass moves the coordinates by less than this in total.
    pub tolerance: f64,
    /// Passes allowed before giving up.
    pub max_iterations: usize,
}

impl Default for SmootherConfig {
    fn default() -> Self {
        Self {
            data_weight: DEFAULT_DATA_WEIGHT,
            smooth_weight: DEFAULT_SMOOTH_WEIGHT,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SmootherConfig {
    pub fn validate(&self) -> Result<(), TrajectoryError> {
        if !self.data_weight.is_finite() || self.data_weight < 0.0 {
            return Err(TrajectoryError::InvalidSmoother(format!(
                "data_weight must be finite and non-negative, got {}",
                self.data_weight
            )));
        }
        if !self.smooth_weight.is_finite() || self.smooth_weight < 0.0 {
            return Err(TrajectoryError::InvalidSmoother(format!(
                "smooth_weight must be finite and non-negative, got {}",
                self.smooth_weight
            )));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(TrajectoryError::InvalidSmoother(format!(
                "tolerance must be finite and positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(TrajectoryError::InvalidSmoother(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether the weights are diagonally dominant for the three-point stencil.
    pub fn is_within_stable_range(&self) -> bool {
        self.data_weight > 0.0
            && self.data_weight < 1.0
            && self.smooth_weight > 0.0
            && self.smooth_weight < 1.0
            && self.data_weight + 2.0 * self.smooth_weight < 1.0
    }
}

/// How a smoothing run ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Convergence {
    Converged { iterations: usize, change: f64 },
    BudgetExhausted { iterations: usize, change: f64 },
    Diverged { iterations: usize },
}

impl Convergence {
    pub fn is_converged(&self) -> bool {
        matches!(self, Convergence::Converged { .. })
    }

    pub fn iterations(&self) -> usize {
        match *self {
            Convergence::Converged { iterations, .. }
            | Convergence::BudgetExhausted { iterations, .. }
            | Convergence::Diverged { iterations } => iterations,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Smoothed {
    pub path: Path,
    pub convergence: Convergence,
}

#[derive(Debug, Clone, Default)]
pub struct PathSmoother {
    config: SmootherConfig,
}

impl PathSmoother {
    pub fn new(config: SmootherConfig) -> Result<Self, TrajectoryError> {
        config.validate()?;
        if !config.is_within_stable_range() {
            tracing::debug!(
                "Smoothing weights data={} smooth={} are outside the diagonally dominant range",
                config.data_weight,
                config.smooth_weight
            );
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &SmootherConfig {
        &self.config
    }

    /// Relax `reference` until a pass changes less than the tolerance, the
    /// iteration budget runs out, or the change stops being finite.
    ///
    /// The returned path is whatever state the relaxation reached.
    pub fn smooth(&self, reference: &Path) -> Smoothed {
        let SmootherConfig {
            data_weight,
            smooth_weight,
            tolerance,
            max_iterations,
        } = self.config;

        let mut path = reference.clone();
        let original = reference.points();
        let len = path.len();
        let dimension = path.dimension();
        let points = path.points_mut();

        let mut iterations = 0;
        let mut change = f64::INFINITY;
        while iterations < max_iterations {
            iterations += 1;
            change = 0.0;
            for i in 1..len - 1 {
                for j in 0..dimension {
                    let prev = points[i - 1].coords()[j];
                    let next = points[i + 1].coords()[j];
                    let target = original[i].coords()[j];
                    let value = &mut points[i].coords_mut()[j];
                    let aux = *value;
                    *value += data_weight * (target - *value)
                        + smooth_weight * (prev + next - 2.0 * *value);
                    change += (aux - *value).abs();
                }
            }

            if !change.is_finite() {
                tracing::warn!("Smoothing diverged after {} iterations", iterations);
                return Smoothed {
                    path,
                    convergence: Convergence::Diverged { iterations },
                };
            }
            if change < tolerance {
                tracing::trace!(
                    "Smoothing converged after {} iterations (change {:e})",
                    iterations,
                    change
                );
                return Smoothed {
                    path,
                    convergence: Convergence::Converged { iterations, change },
                };
            }
        }

        tracing::warn!(
            "Smoothing stopped after {} iterations with change {:e} >= {:e}",
            iterations,
            change,
            tolerance
        );
        Smoothed {
            path,
            convergence: Convergence::BudgetExhausted { iterations, change },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inject::inject;

    fn sample() -> Path {
        Path::from_rows(&[[1.0, 2.0], [2.0, 7.0], [4.0, 7.0], [6.0, 9.0], [10.0, 11.0]], 2).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = SmootherConfig::default();
        assert_eq!(config.data_weight, 0.7);
        assert_eq!(config.smooth_weight, 0.3);
        assert_eq!(config.tolerance, 1e-7);
        assert!(config.validate().is_ok());
        assert!(!config.is_within_stable_range());
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        let bad = [
            SmootherConfig { data_weight: f64::NAN, ..Default::default() },
            SmootherConfig { smooth_weight: -0.1, ..Default::default() },
            SmootherConfig { tolerance: 0.0, ..Default::default() },
            SmootherConfig { max_iterations: 0, ..Default::default() },
        ];
        for config in bad {
            assert!(matches!(
                PathSmoother::new(config),
                Err(TrajectoryError::InvalidSmoother(_))
            ));
        }
    }

    #[test]
    fn test_converges_and_pins_endpoints() {
        let smoother = PathSmoother::default();
        let reference = inject(&sample(), 3);
        let smoothed = smoother.smooth(&reference);
        assert!(smoothed.convergence.is_converged());
        assert!(smoothed.convergence.iterations() > 1);
        assert_eq!(smoothed.path.len(), reference.len());
        assert_eq!(smoothed.path.dimension(), reference.dimension());
        assert_eq!(smoothed.path.first(), reference.first());
        assert_eq!(smoothed.path.last(), reference.last());
    }

    #[test]
    fn test_is_deterministic() {
        let smoother = PathSmoother::default();
        let reference = sample();
        let a = smoother.smooth(&reference);
        let b = smoother.smooth(&reference);
        assert_eq!(a, b);
    }

    #[test]
    fn test_first_pass_is_gauss_seidel() {
        // One pass over [0, 3, 0, 0]: point 1 becomes 3 + 0.5*(0 + 0 - 6) = 0,
        // and point 2 already sees that 0 as its left neighbour.
        let config = SmootherConfig {
            data_weight: 0.0,
            smooth_weight: 0.5,
            tolerance: 1e-9,
            max_iterations: 1,
        };
        let reference = Path::from_rows(&[[0.0], [3.0], [0.0], [0.0]], 1).unwrap();
        let smoothed = PathSmoother::new(config).unwrap().smooth(&reference);
        let rows = smoothed.path.to_rows();
        assert_eq!(rows[1], vec![0.0]);
        assert_eq!(rows[2], vec![0.0]);
        assert_eq!(
            smoothed.convergence,
            Convergence::BudgetExhausted { iterations: 1, change: 3.0 }
        );
    }

    #[test]
    fn test_two_point_path_converges_immediately() {
        let reference = Path::from_rows(&[[0.0, 0.0], [1.0, 1.0]], 2).unwrap();
        let smoothed = PathSmoother::default().smooth(&reference);
        assert_eq!(
            smoothed.convergence,
            Convergence::Converged { iterations: 1, change: 0.0 }
        );
        assert_eq!(smoothed.path, reference);
    }

    #[test]
    fn test_divergence_is_reported() {
        let config = SmootherConfig {
            data_weight: 0.0,
            smooth_weight: 5.0,
            tolerance: 1e-7,
            max_iterations: 100_000,
        };
        let reference = inject(&sample(), 4);
        let smoothed = PathSmoother::new(config).unwrap().smooth(&reference);
        assert!(matches!(smoothed.convergence, Convergence::Diverged { .. }));
        assert_eq!(smoothed.path.first(), reference.first());
        assert_eq!(smoothed.path.last(), reference.last());
    }
}
