//! Error types for cnp-ternary operations.

use thiserror::Error;

use crate::ratio::Species;

/// Result type alias for cnp-ternary operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad failure class of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed arguments outside the function's contract.
    InvalidArgument,
    /// The arguments were well-formed but the result is mathematically undefined.
    Domain,
}

/// Errors that can occur during normalization or drift measurement.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Concentration sequences passed to the normalizer differ in length.
    #[error(
        "Length mismatch: carbon has {carbon} values, nitrogen {nitrogen}, phosphorus {phosphorus}"
    )]
    LengthMismatch {
        /// Number of carbon concentrations.
        carbon: usize,
        /// Number of nitrogen concentrations.
        nitrogen: usize,
        /// Number of phosphorus concentrations.
        phosphorus: usize,
    },

    /// A concentration is negative or not finite.
    #[error("Invalid {species} concentration at sample {index}: {value}")]
    InvalidConcentration {
        /// Species the value belongs to.
        species: Species,
        /// Zero-based sample index.
        index: usize,
        /// Offending value.
        value: f64,
    },

    /// A reference ratio component is not a positive finite number.
    #[error("Invalid reference ratio: {species} component is {value} (must be > 0)")]
    InvalidReference {
        /// Species of the offending component.
        species: Species,
        /// Offending value.
        value: f64,
    },

    /// All ratio-adjusted quantities of a sample are zero, so no share can be computed.
    #[error("Degenerate sample {index}: carbon, nitrogen and phosphorus are all zero")]
    DegenerateSample {
        /// Zero-based sample index.
        index: usize,
    },

    /// A sample's ratio-adjusted quantities overflow, so no finite share exists.
    #[error("Sample {index} overflows: ratio-adjusted sum is not finite")]
    SampleOverflow {
        /// Zero-based sample index.
        index: usize,
    },

    /// The perimeter of an empty point sequence is undefined.
    #[error("Empty point sequence: at least one point is required")]
    EmptySequence,

    /// One sequence of a batch failed.
    #[error("Series {index}: {source}")]
    Series {
        /// Zero-based index of the failing sequence.
        index: usize,
        /// Error of that sequence.
        #[source]
        source: Box<Error>,
    },

    /// Text could not be parsed into a ratio or point.
    #[error("Cannot parse {input:?}: {reason}")]
    Parse {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl Error {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DegenerateSample { .. } | Self::SampleOverflow { .. } => ErrorKind::Domain,
            Self::Series { source, .. } => source.kind(),
            _ => ErrorKind::InvalidArgument,
        }
    }

    pub(crate) fn parse(input: &str, reason: impl Into<String>) -> Self {
        Self::Parse {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
