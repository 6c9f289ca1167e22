// smoothpath_shared: waypoint-to-trajectory core shared by the library and the demo driver
//
// Turns a sparse list of waypoints into a dense, smooth path sized for a
// fixed-rate motion controller: plan how many points to insert, then run three
// rounds of linear injection followed by relaxation smoothing.

pub mod error;
pub mod inject;
pub mod path;
pub mod pipeline;
pub mod planner;
pub mod reduce;
pub mod smoother;

pub use error::{PathError, TrajectoryError};
pub use inject::{inject, injected_len};
pub use path::{Path, Waypoint};
pub use pipeline::{smooth_path, FinalTrajectory, PipelineConfig, StageReport, TrajectoryPipeline};
pub use planner::{plan_injections, plan_injections_with, InjectionPlan, PlanStrategy};
pub use reduce::reduce_to_direction_changes;
pub use smoother::{Convergence, PathSmoother, Smoothed, SmootherConfig};
