// src/path.rs - Waypoint and path types shared by every pipeline stage
use serde::{Deserialize, Serialize};

use crate::error::PathError;

/// A point in D-dimensional space. Units are whatever the caller uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Waypoint {
    coords: Vec<f64>,
}

impl Waypoint {
    pub fn new(coords: Vec<f64>) -> Self {
        Self { coords }
    }

    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    pub fn dimension(&self) -> usize {
        self.coords.len()
    }

    pub fn distance_to(&self, other: &Waypoint) -> f64 {
        self.coords
            .iter()
            .zip(other.coords.iter())
            .map(|(a, b)| (b - a) * (b - a))
            .sum::<f64>()
            .sqrt()
    }

    pub(crate) fn coords_mut(&mut self) -> &mut [f64] {
        &mut self.coords
    }
}

impl From<Vec<f64>> for Waypoint {
    fn from(coords: Vec<f64>) -> Self {
        Self::new(coords)
    }
}

impl From<&[f64]> for Waypoint {
    fn from(coords: &[f64]) -> Self {
        Self::new(coords.to_vec())
    }
}

impl<const D: usize> From<[f64; D]> for Waypoint {
    fn from(coords: [f64; D]) -> Self {
        Self::new(coords.to_vec())
    }
}

/// Ordered sequence of waypoints with a single fixed dimension.
///
/// A `Path` always holds at least two points and every point has the same,
/// non-zero number of finite coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Waypoint>", into = "Vec<Waypoint>")]
pub struct Path {
    points: Vec<Waypoint>,
    dimension: usize,
}

impl Path {
    pub fn new(points: Vec<Waypoint>) -> Result<Self, PathError> {
        if points.len() < 2 {
            return Err(PathError::TooFewPoints {
                count: points.len(),
            });
        }
        let dimension = points[0].dimension();
        if dimension == 0 {
            return Err(PathError::ZeroDimension);
        }
        for (index, point) in points.iter().enumerate() {
            if point.dimension() != dimension {
                return Err(PathError::DimensionMismatch {
                    index,
                    expected: dimension,
                    found: point.dimension(),
                });
            }
            if point.coords().iter().any(|c| !c.is_finite()) {
                return Err(PathError::NonFiniteCoordinate { index });
            }
        }
        Ok(Self { points, dimension })
    }

    /// Build a path from raw coordinate rows, requiring every row to have `dimension` values.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R], dimension: usize) -> Result<Self, PathError> {
        if dimension == 0 {
            return Err(PathError::ZeroDimension);
        }
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.as_ref().len() != dimension)
        {
            return Err(PathError::DimensionMismatch {
                index,
                expected: dimension,
                found: row.as_ref().len(),
            });
        }
        Self::new(rows.iter().map(|row| Waypoint::from(row.as_ref())).collect())
    }

    // Callers must uphold the length and dimension invariants themselves.
    pub(crate) fn from_parts(points: Vec<Waypoint>, dimension: usize) -> Self {
        debug_assert!(points.len() >= 2);
        debug_assert!(points.iter().all(|p| p.dimension() == dimension));
        Self { points, dimension }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn points(&self) -> &[Waypoint] {
        &self.points
    }

    pub fn first(&self) -> &Waypoint {
        &self.points[0]
    }

    pub fn last(&self) -> &Waypoint {
        &self.points[self.points.len() - 1]
    }

    pub fn get(&self, index: usize) -> Option<&Waypoint> {
        self.points.get(index)
    }

    /// Total point-to-point Euclidean length.
    pub fn path_length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| pair[0].distance_to(&pair[1]))
            .sum()
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.points.iter().map(|p| p.coords().to_vec()).collect()
    }

    pub fn into_points(self) -> Vec<Waypoint> {
        self.points
    }

    pub(crate) fn points_mut(&mut self) -> &mut [Waypoint] {
        &mut self.points
    }
}

impl TryFrom<Vec<Waypoint>> for Path {
    type Error = PathError;

    fn try_from(points: Vec<Waypoint>) -> Result<Self, Self::Error> {
        Path::new(points)
    }
}

impl From<Path> for Vec<Waypoint> {
    fn from(path: Path) -> Self {
        path.points
    }
}
