// src/planner.rs - Injection planning for the three inject/smooth rounds
//
// Picks how many points to insert between neighbours at each stage so that the
// final point count fits the number of controller ticks available.
use serde::{Deserialize, Serialize};

/// Budgets below this many ticks use the two-stage search.
pub const LOW_BUDGET_THRESHOLD: f64 = 100.0;

/// Number of inject/smooth rounds the pipeline runs.
pub const STAGE_COUNT: usize = 3;

/// How the high-budget search picks among feasible combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStrategy {
    /// Last feasible combination in scan order for budgets >= 100 ticks,
    /// largest feasible combination below that.
    #[default]
    Legacy,
    /// Largest feasible combination for every budget (earliest wins ties).
    MaximalFeasible,
}

/// Points to insert between each adjacent pair, per stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InjectionPlan {
    pub stages: [usize; STAGE_COUNT],
}

impl InjectionPlan {
    pub fn new(first: usize, second: usize, third: usize) -> Self {
        Self {
            stages: [first, second, third],
        }
    }

    pub fn is_identity(&self) -> bool {
        self.stages.iter().all(|&n| n == 0)
    }

    /// Point count after running all three stages on `point_count` points.
    /// `None` on overflow.
    pub fn projected_point_count(&self, point_count: usize) -> Option<usize> {
        self.stages
            .iter()
            .try_fold(point_count, |count, &n| crate::inject::injected_len(count, n))
    }
}

fn after_injection(points: f64, n: usize) -> f64 {
    n as f64 * (points - 1.0) + points
}

/// Plan injections with the default [`PlanStrategy::Legacy`] search.
///
/// Preconditions (`point_count >= 2`, `time_step > 0`, `max_total_time > 0`) are
/// the caller's to check; other inputs give a meaningless but valid plan.
pub fn plan_injections(point_count: usize, max_total_time: f64, time_step: f64) -> InjectionPlan {
    plan_injections_with(point_count, max_total_time, time_step, PlanStrategy::Legacy)
}

pub fn plan_injections_with(
    point_count: usize,
    max_total_time: f64,
    time_step: f64,
    strategy: PlanStrategy,
) -> InjectionPlan {
    let total_budget = max_total_time / time_step;
    let n = point_count as f64;

    let plan = if total_budget < LOW_BUDGET_THRESHOLD {
        search_two_stage(n, total_budget)
    } else {
        match strategy {
            PlanStrategy::Legacy => search_three_stage_last(n, total_budget),
            PlanStrategy::MaximalFeasible => search_three_stage_max(n, total_budget),
        }
    };

    tracing::debug!(
        "Injection plan for {} points, budget {:.3} ticks: {:?}",
        point_count,
        total_budget,
        plan.stages
    );
    plan
}

fn search_two_stage(n: f64, total_budget: f64) -> InjectionPlan {
    let mut plan = InjectionPlan::default();
    let mut best = 0.0;
    for i in 4..=6 {
        for j in 1..=8 {
            let first = after_injection(n, i);
            let total = after_injection(first, j);
            if total <= total_budget && total > best {
                plan = InjectionPlan::new(i, j, 0);
                best = total;
            }
        }
    }
    plan
}

fn search_three_stage_last(n: f64, total_budget: f64) -> InjectionPlan {
    let mut plan = InjectionPlan::default();
    for i in 1..=5 {
        for j in 1..=8 {
            for k in 1..=7 {
                let total = after_injection(after_injection(after_injection(n, i), j), k);
                if total <= total_budget {
                    plan = InjectionPlan::new(i, j, k);
                }
            }
        }
    }
    plan
}

fn search_three_stage_max(n: f64, total_budget: f64) -> InjectionPlan {
    let mut plan = InjectionPlan::default();
    let mut best = 0.0;
    for i in 1..=5 {
        for j in 1..=8 {
            for k in 1..=7 {
                let total = after_injection(after_injection(after_injection(n, i), j), k);
                if total <= total_budget && total > best {
                    plan = InjectionPlan::new(i, j, k);
                    best = total;
                }
            }
        }
    }
    plan
}
