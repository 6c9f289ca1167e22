// src/inject.rs - Linear upsampling of a path
use crate::path::{Path, Waypoint};

/// Length of a path of `len` points after inserting `num_to_inject` points
/// between every adjacent pair. `None` on overflow.
pub fn injected_len(len: usize, num_to_inject: usize) -> Option<usize> {
    num_to_inject
        .checked_mul(len.saturating_sub(1))
        .and_then(|extra| extra.checked_add(len))
}

/// Insert `num_to_inject` evenly spaced points between each pair of neighbours.
///
/// The original points are kept exactly, at stride `num_to_inject + 1`.
/// Zero injections returns an equal path.
pub fn inject(path: &Path, num_to_inject: usize) -> Path {
    if num_to_inject == 0 {
        return path.clone();
    }

    let points = path.points();
    let capacity = injected_len(points.len(), num_to_inject).unwrap_or(points.len());
    let mut more_points = Vec::with_capacity(capacity);
    let divisor = (num_to_inject + 1) as f64;

    for pair in points.windows(2) {
        let (start, end) = (pair[0].coords(), pair[1].coords());
        more_points.push(pair[0].clone());
        for step in 1..=num_to_inject {
            let coords = start
                .iter()
                .zip(end)
                .map(|(a, b)| step as f64 * ((b - a) / divisor) + a)
                .collect();
            more_points.push(Waypoint::new(coords));
        }
    }
    more_points.push(path.last().clone());

    tracing::trace!(
        "Injected {} points per segment: {} -> {} points",
        num_to_inject,
        points.len(),
        more_points.len()
    );
    Path::from_parts(more_points, path.dimension())
}
