//! # cnp-ternary
//!
//! C:N:P stoichiometry on the ternary diagram.
//!
//! The library is a small numeric pipeline. Rendering, file ingestion and
//! plotting are left to callers, which consume the in-memory values it
//! produces.
//!
//! 1. **Normalize** mass concentrations of carbon, nitrogen and phosphorus
//!    into percentage shares relative to a reference molar ratio.
//! 2. **Project** three-part compositions onto 2D Cartesian coordinates.
//! 3. **Measure drift** as the perimeter of the closed polygon an ordered
//!    sequence of compositions traces.
//!
//! ## Quick Start
//!
//! ```rust
//! use cnp_ternary::{ReferenceRatio, cyclic_perimeter, normalize};
//!
//! // Monthly DOC, NO3-N and PO4-P concentrations in mg/l, sorted by month.
//! let doc = [4.1, 3.8, 5.2, 6.0];
//! let no3 = [2.4, 2.9, 1.1, 0.7];
//! let po4 = [0.04, 0.05, 0.09, 0.12];
//!
//! let shares = normalize(&doc, &no3, &po4, &ReferenceRatio::REDFIELD)?;
//! let drift = cyclic_perimeter(&shares)?;
//! assert!(drift > 0.0);
//! # Ok::<(), cnp_ternary::Error>(())
//! ```
//!
//! ## Modules
//!
//! - [`error`]: Error types for the library
//! - [`ratio`]: Reference ratios and concentration normalization
//! - [`simplex`]: Ternary to Cartesian projection
//! - [`drift`]: Cyclic perimeter metric

pub mod drift;
pub mod error;
pub mod ratio;
pub mod simplex;

// Re-export commonly used types
pub use drift::{DriftReport, cyclic_edges, cyclic_perimeter, cyclic_perimeters};
pub use error::{Error, ErrorKind, Result};
pub use ratio::{
    ConcentrationSample, NormalizedComposition, ReferenceRatio, Species, normalize,
    normalize_sample, normalize_samples,
};
pub use simplex::{CENTER, CartesianPoint, TernaryPoint, project, project_all};
