// src/pipeline.rs - Inject/smooth orchestration and trajectory packaging
use serde::{Deserialize, Serialize};

use crate::error::TrajectoryError;
use crate::inject::{inject, injected_len};
use crate::path::Path;
use crate::planner::{plan_injections_with, InjectionPlan, PlanStrategy, STAGE_COUNT};
use crate::reduce::{reduce_to_direction_changes, DEFAULT_ANGLE_TOLERANCE};
use crate::smoother::{Convergence, PathSmoother, SmootherConfig};

pub const DEFAULT_MAX_POINTS: usize = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub smoother: SmootherConfig,
    pub strategy: PlanStrategy,
    /// Run direction-change reduction on the waypoints before planning.
    pub reduce_waypoints: bool,
    pub angle_tolerance: f64,
    /// Upper bound on the point count of any intermediate or final path.
    pub max_points: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            smoother: SmootherConfig::default(),
            strategy: PlanStrategy::Legacy,
            reduce_waypoints: false,
            angle_tolerance: DEFAULT_ANGLE_TOLERANCE,
            max_points: DEFAULT_MAX_POINTS,
        }
    }
}

/// What one inject/smooth round did.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageReport {
    pub injections: usize,
    pub point_count: usize,
    pub iterations: usize,
}

/// Output of a pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalTrajectory {
    pub path: Path,
    pub plan: InjectionPlan,
    pub stages: [StageReport; STAGE_COUNT],
}

impl FinalTrajectory {
    pub fn point_count(&self) -> usize {
        self.path.len()
    }

    pub fn dimension(&self) -> usize {
        self.path.dimension()
    }

    /// Legacy row layout: row 0 carries `point_count + 1` in its first
    /// coordinate (zeros elsewhere), rows `1..=point_count` are the points.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        let mut rows = Vec::with_capacity(self.point_count() + 1);
        let mut header = vec![0.0; self.dimension()];
        header[0] = (self.point_count() + 1) as f64;
        rows.push(header);
        rows.extend(self.path.points().iter().map(|p| p.coords().to_vec()));
        rows
    }

    /// Read the points back out of the legacy row layout.
    pub fn points_from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Path, TrajectoryError> {
        let header = rows
            .first()
            .map(|row| row.as_ref())
            .ok_or_else(|| TrajectoryError::MalformedLayout("no header row".to_string()))?;
        let stored = header
            .first()
            .copied()
            .ok_or_else(|| TrajectoryError::MalformedLayout("empty header row".to_string()))?;
        if !stored.is_finite() || stored < 1.0 || stored.fract() != 0.0 {
            return Err(TrajectoryError::MalformedLayout(format!(
                "header count {} is not a positive integer",
                stored
            )));
        }
        let count = stored as usize;
        if count > rows.len() {
            return Err(TrajectoryError::MalformedLayout(format!(
                "header claims {} rows but only {} present",
                count,
                rows.len()
            )));
        }
        Ok(Path::from_rows(&rows[1..count], header.len())?)
    }
}

pub struct TrajectoryPipeline {
    config: PipelineConfig,
    smoother: PathSmoother,
}

impl TrajectoryPipeline {
    pub fn new(config: PipelineConfig) -> Result<Self, TrajectoryError> {
        let smoother = PathSmoother::new(config.smoother)?;
        Ok(Self { config, smoother })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn run(
        &self,
        waypoints: &Path,
        total_time: f64,
        time_step: f64,
    ) -> Result<FinalTrajectory, TrajectoryError> {
        if !(total_time.is_finite() && total_time > 0.0 && time_step.is_finite() && time_step > 0.0)
        {
            return Err(TrajectoryError::InvalidTiming {
                total_time,
                time_step,
            });
        }

        let mut path = if self.config.reduce_waypoints {
            reduce_to_direction_changes(waypoints, self.config.angle_tolerance)
        } else {
            waypoints.clone()
        };

        let plan = plan_injections_with(path.len(), total_time, time_step, self.config.strategy);
        tracing::info!(
            "Planning {} waypoints over {}s at {}s steps: injections {:?}",
            path.len(),
            total_time,
            time_step,
            plan.stages
        );
        let ticks = (total_time / time_step).floor();
        match plan.projected_point_count(path.len()) {
            Some(projected) if projected as f64 <= ticks => {}
            projected => tracing::warn!(
                "No injection plan fits {} ticks; trajectory keeps {} points",
                ticks,
                projected.unwrap_or(usize::MAX)
            ),
        }

        let mut stages = [StageReport {
            injections: 0,
            point_count: 0,
            iterations: 0,
        }; STAGE_COUNT];
        for (stage, &injections) in plan.stages.iter().enumerate() {
            let requested = injected_len(path.len(), injections).unwrap_or(usize::MAX);
            if requested > self.config.max_points {
                tracing::warn!(
                    "Stage {} would grow the path to {} points (limit {})",
                    stage,
                    requested,
                    self.config.max_points
                );
                return Err(TrajectoryError::CapacityExceeded {
                    requested,
                    limit: self.config.max_points,
                });
            }

            let injected = inject(&path, injections);
            let smoothed = self.smoother.smooth(&injected);
            let iterations = match smoothed.convergence {
                Convergence::Converged { iterations, .. } => iterations,
                Convergence::BudgetExhausted { iterations, change } => {
                    return Err(TrajectoryError::NotConverged {
                        stage,
                        iterations,
                        change,
                    });
                }
                Convergence::Diverged { iterations } => {
                    return Err(TrajectoryError::Diverged { stage, iterations });
                }
            };
            path = smoothed.path;

            stages[stage] = StageReport {
                injections,
                point_count: path.len(),
                iterations,
            };
            tracing::debug!(
                "Stage {}: injected {} per segment, {} points, {} smoothing iterations",
                stage,
                injections,
                path.len(),
                iterations
            );
        }

        Ok(FinalTrajectory { path, plan, stages })
    }
}

/// Run the default pipeline over raw coordinate rows of the given dimension.
pub fn smooth_path<R: AsRef<[f64]>>(
    waypoints: &[R],
    dimension: usize,
    total_time: f64,
    time_step: f64,
) -> Result<FinalTrajectory, TrajectoryError> {
    let path = Path::from_rows(waypoints, dimension)?;
    TrajectoryPipeline::new(PipelineConfig::default())?.run(&path, total_time, time_step)
}
