//! Cyclic perimeter drift metric.
//!
//! An ordered sequence of ternary points (for example monthly compositions
//! of one site, sorted by month) is projected onto the plane and closed into
//! a polygon: point `i` joins point `(i + 1) mod n`. The perimeter of that
//! polygon measures how far the composition travels over one cycle.
//!
//! The metric follows the caller's order. Rotating the sequence keeps the
//! perimeter, while swapping non-adjacent points generally changes it.
//!
//! ## Key Types
//!
//! - [`cyclic_perimeter`]: perimeter of one sequence
//! - [`cyclic_edges`]: individual transition lengths
//! - [`DriftReport`]: perimeter plus per-edge breakdown
//! - [`cyclic_perimeters`]: many independent sequences in parallel

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::simplex::{TernaryPoint, project_all};

/// Perimeter of the closed polygon through `points` in the given order.
///
/// A single point gives 0; an empty slice fails with [`Error::EmptySequence`].
///
/// # Example
///
/// ```
/// use cnp_ternary::drift::cyclic_perimeter;
///
/// let d = cyclic_perimeter(&[(100.0, 0.0, 0.0), (0.0, 100.0, 0.0)]).unwrap();
/// assert!((d - 200.0).abs() < 1e-9);
/// ```
pub fn cyclic_perimeter<P: Copy + Into<TernaryPoint>>(points: &[P]) -> Result<f64> {
    Ok(cyclic_edges(points)?.iter().sum())
}

/// Length of every edge of the closed polygon.
///
/// Edge `i` joins point `i` to point `(i + 1) mod n`, so the result has
/// one entry per point and the last entry closes the loop.
pub fn cyclic_edges<P: Copy + Into<TernaryPoint>>(points: &[P]) -> Result<Vec<f64>> {
    if points.is_empty() {
        return Err(Error::EmptySequence);
    }

    let projected = project_all(points);
    let n = projected.len();
    Ok((0..n)
        .map(|i| projected[i].distance(&projected[(i + 1) % n]))
        .collect())
}

/// Perimeters of many independent sequences, computed in parallel.
///
/// Results keep the input order. If any sequence is empty, the error for
/// the lowest such index is returned wrapped in [`Error::Series`].
pub fn cyclic_perimeters<S, P>(series: &[S]) -> Result<Vec<f64>>
where
    S: AsRef<[P]> + Sync,
    P: Copy + Into<TernaryPoint> + Sync,
{
    let results: Vec<Result<f64>> = series
        .par_iter()
        .enumerate()
        .map(|(index, points)| {
            cyclic_perimeter(points.as_ref()).map_err(|source| Error::Series {
                index,
                source: Box::new(source),
            })
        })
        .collect();
    results.into_iter().collect()
}

/// Drift of one ordered sequence with its per-transition breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftReport {
    /// Number of points in the cycle.
    pub points: usize,
    /// Sum of all edges.
    pub perimeter: f64,
    /// Edge `i` joins point `i` to point `(i + 1) mod points`.
    pub edges: Vec<f64>,
    /// Index of the longest edge (first one on ties), `None` for a single point.
    pub longest_edge: Option<usize>,
}

impl DriftReport {
    /// Compute the report for `points` in the given order.
    pub fn compute<P: Copy + Into<TernaryPoint>>(points: &[P]) -> Result<Self> {
        let edges = cyclic_edges(points)?;
        let perimeter = edges.iter().sum();

        let longest_edge = if edges.len() < 2 {
            None
        } else {
            edges
                .iter()
                .enumerate()
                .fold(None, |best: Option<(usize, f64)>, (i, &len)| match best {
                    Some((_, max)) if len <= max => best,
                    _ => Some((i, len)),
                })
                .map(|(i, _)| i)
        };

        Ok(Self {
            points: edges.len(),
            perimeter,
            edges,
            longest_edge,
        })
    }

    /// Mean edge length.
    #[must_use]
    pub fn mean_edge(&self) -> f64 {
        self.perimeter / self.points as f64
    }
}
