//! Barycentric to Cartesian projection on the equilateral ternary triangle.
//!
//! A [`TernaryPoint`] `(a, b, c)` maps to `x = a + b/2`, `y = (√3/2)·b`.
//! Only `a` and `b` enter the formula; `c` is implied by the triangle. The
//! projection does not check that the components sum to a constant, so
//! points outside the simplex land outside the triangle.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// √3 / 2, the height of the unit equilateral triangle.
pub const SQRT3_OVER_2: f64 = 0.866_025_403_784_438_6;

/// Three-part point, e.g. a [`NormalizedComposition`](crate::NormalizedComposition)
/// in N, C, P order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TernaryPoint {
    /// First share.
    pub a: f64,
    /// Second share.
    pub b: f64,
    /// Third share (not used by the projection).
    pub c: f64,
}

/// The point of equal shares on the 0-100 scale.
pub const CENTER: TernaryPoint = TernaryPoint::new(100.0 / 3.0, 100.0 / 3.0, 100.0 / 3.0);

impl TernaryPoint {
    /// Create a point.
    #[must_use]
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }
}

impl From<(f64, f64, f64)> for TernaryPoint {
    fn from((a, b, c): (f64, f64, f64)) -> Self {
        Self::new(a, b, c)
    }
}

impl From<[f64; 3]> for TernaryPoint {
    fn from([a, b, c]: [f64; 3]) -> Self {
        Self::new(a, b, c)
    }
}

impl fmt::Display for TernaryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.a, self.b, self.c)
    }
}

impl FromStr for TernaryPoint {
    type Err = Error;

    /// Parse `a,b,c`.
    fn from_str(s: &str) -> Result<Self> {
        let values: Vec<f64> = s
            .split(',')
            .map(|part| {
                part.trim()
                    .parse()
                    .map_err(|_| Error::parse(s, format!("{:?} is not a number", part.trim())))
            })
            .collect::<Result<_>>()?;

        match values[..] {
            [a, b, c] => Ok(Self::new(a, b, c)),
            _ => Err(Error::parse(
                s,
                format!("expected 3 comma-separated values, got {}", values.len()),
            )),
        }
    }
}

/// Point in the Cartesian plane of the ternary diagram.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CartesianPoint {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl CartesianPoint {
    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Project a ternary point onto the plane.
///
/// # Example
///
/// ```
/// use cnp_ternary::simplex::{TernaryPoint, project};
///
/// let p = project(TernaryPoint::new(0.0, 100.0, 0.0));
/// assert_eq!(p.x, 50.0);
/// assert!((p.y - 86.6025).abs() < 1e-4);
/// ```
#[must_use]
pub fn project(point: impl Into<TernaryPoint>) -> CartesianPoint {
    let TernaryPoint { a, b, .. } = point.into();
    CartesianPoint {
        x: a + b / 2.0,
        y: SQRT3_OVER_2 * b,
    }
}

/// Project every point, keeping order.
#[must_use]
pub fn project_all<P: Copy + Into<TernaryPoint>>(points: &[P]) -> Vec<CartesianPoint> {
    points.iter().map(|&p| project(p)).collect()
}
