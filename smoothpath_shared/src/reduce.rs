// src/reduce.rs - Drop waypoints that do not change the direction of travel
use crate::path::{Path, Waypoint};

/// Default allowance on `1 - cos(angle)` below which two directions count as the same.
pub const DEFAULT_ANGLE_TOLERANCE: f64 = 1e-9;

fn direction(from: &Waypoint, to: &Waypoint) -> Vec<f64> {
    from.coords()
        .iter()
        .zip(to.coords())
        .map(|(a, b)| b - a)
        .collect()
}

fn norm(v: &[f64]) -> f64 {
    v.iter().map(|c| c * c).sum::<f64>().sqrt()
}

fn same_direction(a: &[f64], b: &[f64], angle_tolerance: f64) -> bool {
    let (na, nb) = (norm(a), norm(b));
    if na == 0.0 || nb == 0.0 {
        return true;
    }
    let cos = a.iter().zip(b).map(|(x, y)| x * y).sum::<f64>() / (na * nb);
    cos >= 1.0 - angle_tolerance
}

/// Keep the endpoints and every point where the path turns.
///
/// Repeated points and points lying on a straight run are removed. A reversal
/// is a turn and is kept.
pub fn reduce_to_direction_changes(path: &Path, angle_tolerance: f64) -> Path {
    let points = path.points();
    let mut kept: Vec<Waypoint> = Vec::with_capacity(points.len());
    kept.push(points[0].clone());

    for i in 1..points.len() - 1 {
        let last_kept = &kept[kept.len() - 1];
        let incoming = direction(last_kept, &points[i]);
        if norm(&incoming) == 0.0 {
            continue;
        }
        let outgoing = direction(&points[i], &points[i + 1]);
        if norm(&outgoing) == 0.0 {
            // Next point repeats this one; decide once the run of repeats ends.
            continue;
        }
        if !same_direction(&incoming, &outgoing, angle_tolerance) {
            kept.push(points[i].clone());
        }
    }
    kept.push(path.last().clone());

    if kept.len() != points.len() {
        tracing::debug!(
            "Reduced {} waypoints to {} direction-changing points",
            points.len(),
            kept.len()
        );
    }
    Path::from_parts(kept, path.dimension())
}
