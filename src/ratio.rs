//! Ratio normalization of C, N, P concentrations.
//!
//! Mass concentrations (mg/l) of dissolved carbon, nitrogen and phosphorus
//! are converted to molar quantities, rescaled against a reference molar
//! stoichiometry and expressed as percentage shares on a closed 0-100 scale.
//!
//! ## Reference Ratios
//!
//! - [`ReferenceRatio::REDFIELD`]: 106:16:1 (Redfield 1934, marine plankton)
//! - [`ReferenceRatio::GODWIN_COTNER`]: 68:14:1 (Godwin & Cotner 2018,
//!   doi:10.1038/ismej.2017.195)
//!
//! See Graeber et al. 2021 (doi:10.1007/s10533-021-00809-4) for the method.
//!
//! ## Output Order
//!
//! [`NormalizedComposition`] stores its shares as **N, C, P**, not in the
//! C, N, P input order. Ternary diagram consumers rely on this order, so it
//! is kept for fields, serialization and [`NormalizedComposition::to_ternary`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::simplex::TernaryPoint;

/// Atomic weight of carbon (g/mol).
pub const ATOMIC_WEIGHT_C: f64 = 12.010;
/// Atomic weight of nitrogen (g/mol).
pub const ATOMIC_WEIGHT_N: f64 = 14.007;
/// Atomic weight of phosphorus (g/mol).
pub const ATOMIC_WEIGHT_P: f64 = 30.974;

/// One of the three tracked chemical species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    /// Dissolved (organic) carbon.
    Carbon,
    /// Dissolved nitrogen, e.g. NO3-N.
    Nitrogen,
    /// Dissolved phosphorus, e.g. PO4-P.
    Phosphorus,
}

impl Species {
    /// Atomic weight used for the mass to molar conversion.
    #[must_use]
    pub const fn atomic_weight(self) -> f64 {
        match self {
            Self::Carbon => ATOMIC_WEIGHT_C,
            Self::Nitrogen => ATOMIC_WEIGHT_N,
            Self::Phosphorus => ATOMIC_WEIGHT_P,
        }
    }

    /// Species name in lowercase.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Carbon => "carbon",
            Self::Nitrogen => "nitrogen",
            Self::Phosphorus => "phosphorus",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//=============================================================================
// Reference Ratio
//=============================================================================

/// Target molar stoichiometry C:N:P.
///
/// Every component must be a positive finite number. Deserialization
/// enforces this, so a ratio loaded from a configuration document is
/// always valid. Values built through the public fields are checked by
/// [`ReferenceRatio::validate`] before any normalization runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawReferenceRatio")]
pub struct ReferenceRatio {
    /// Carbon component (rC).
    pub carbon: f64,
    /// Nitrogen component (rN).
    pub nitrogen: f64,
    /// Phosphorus component (rP).
    pub phosphorus: f64,
}

impl ReferenceRatio {
    /// Redfield ratio, 106:16:1.
    pub const REDFIELD: Self = Self {
        carbon: 106.0,
        nitrogen: 16.0,
        phosphorus: 1.0,
    };

    /// Godwin & Cotner ratio, 68:14:1.
    pub const GODWIN_COTNER: Self = Self {
        carbon: 68.0,
        nitrogen: 14.0,
        phosphorus: 1.0,
    };

    /// Named presets accepted by [`FromStr`].
    pub const NAMED: [(&'static str, Self); 2] = [
        ("redfield", Self::REDFIELD),
        ("godwin-cotner", Self::GODWIN_COTNER),
    ];

    /// Create a validated reference ratio.
    ///
    /// # Example
    ///
    /// ```
    /// use cnp_ternary::ReferenceRatio;
    ///
    /// assert!(ReferenceRatio::new(106.0, 16.0, 1.0).is_ok());
    /// assert!(ReferenceRatio::new(106.0, 0.0, 1.0).is_err());
    /// ```
    pub fn new(carbon: f64, nitrogen: f64, phosphorus: f64) -> Result<Self> {
        let ratio = Self {
            carbon,
            nitrogen,
            phosphorus,
        };
        ratio.validate()?;
        Ok(ratio)
    }

    /// Check that every component is positive and finite.
    pub fn validate(&self) -> Result<()> {
        for (species, value) in [
            (Species::Carbon, self.carbon),
            (Species::Nitrogen, self.nitrogen),
            (Species::Phosphorus, self.phosphorus),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidReference { species, value });
            }
        }
        Ok(())
    }

    /// Factors applied to the nitrogen and phosphorus molar quantities.
    ///
    /// Carbon stays unscaled; nitrogen is scaled by rC/rN and phosphorus by
    /// rC alone.
    fn scale(&self) -> Scale {
        Scale {
            nitrogen: self.carbon / self.nitrogen,
            phosphorus: self.carbon,
        }
    }
}

impl Default for ReferenceRatio {
    fn default() -> Self {
        Self::REDFIELD
    }
}

impl fmt::Display for ReferenceRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.carbon, self.nitrogen, self.phosphorus)
    }
}

impl FromStr for ReferenceRatio {
    type Err = Error;

    /// Parse a preset name (`redfield`, `godwin-cotner`) or an explicit
    /// `C:N:P` triple such as `106:16:1`.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let name = trimmed.to_lowercase().replace('_', "-");
        if let Some((_, ratio)) = Self::NAMED.iter().find(|(n, _)| *n == name) {
            return Ok(*ratio);
        }

        let parts: Vec<&str> = trimmed.split(':').collect();
        if parts.len() != 3 {
            return Err(Error::parse(s, "expected a preset name or a C:N:P triple"));
        }
        let mut values = [0.0; 3];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .trim()
                .parse()
                .map_err(|_| Error::parse(s, format!("{:?} is not a number", part.trim())))?;
        }
        Self::new(values[0], values[1], values[2])
    }
}

/// Unchecked wire form of [`ReferenceRatio`].
#[derive(Deserialize)]
struct RawReferenceRatio {
    carbon: f64,
    nitrogen: f64,
    phosphorus: f64,
}

impl TryFrom<RawReferenceRatio> for ReferenceRatio {
    type Error = Error;

    fn try_from(raw: RawReferenceRatio) -> Result<Self> {
        Self::new(raw.carbon, raw.nitrogen, raw.phosphorus)
    }
}

/// Rescale factors derived from a validated ratio.
#[derive(Debug, Clone, Copy)]
struct Scale {
    nitrogen: f64,
    phosphorus: f64,
}

impl Scale {
    /// Percentage shares of one sample whose values are already checked.
    fn shares(self, index: usize, sample: &ConcentrationSample) -> Result<NormalizedComposition> {
        let carbon = sample.carbon / Species::Carbon.atomic_weight();
        let nitrogen = sample.nitrogen / Species::Nitrogen.atomic_weight() * self.nitrogen;
        let phosphorus = sample.phosphorus / Species::Phosphorus.atomic_weight() * self.phosphorus;

        let sum = carbon + nitrogen + phosphorus;
        if sum <= 0.0 {
            return Err(Error::DegenerateSample { index });
        }
        if !sum.is_finite() {
            return Err(Error::SampleOverflow { index });
        }

        Ok(NormalizedComposition {
            nitrogen: nitrogen / sum * 100.0,
            carbon: carbon / sum * 100.0,
            phosphorus: phosphorus / sum * 100.0,
        })
    }
}

//=============================================================================
// Samples and Compositions
//=============================================================================

/// Mass concentrations of one observation (mg/l).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ConcentrationSample {
    /// Carbon concentration.
    pub carbon: f64,
    /// Nitrogen concentration.
    pub nitrogen: f64,
    /// Phosphorus concentration.
    pub phosphorus: f64,
}

impl ConcentrationSample {
    /// Create a sample from C, N, P concentrations.
    #[must_use]
    pub const fn new(carbon: f64, nitrogen: f64, phosphorus: f64) -> Self {
        Self {
            carbon,
            nitrogen,
            phosphorus,
        }
    }

    /// Sample with the given carbon concentration whose nitrogen and
    /// phosphorus concentrations sit exactly at the reference stoichiometry.
    ///
    /// Normalizing it yields equal shares of 100/3.
    ///
    /// # Example
    ///
    /// ```
    /// use cnp_ternary::{ConcentrationSample, ReferenceRatio, normalize_sample};
    ///
    /// let sample = ConcentrationSample::balanced(10.0, &ReferenceRatio::REDFIELD);
    /// let shares = normalize_sample(&sample, &ReferenceRatio::REDFIELD).unwrap();
    /// assert!((shares.phosphorus - 100.0 / 3.0).abs() < 1e-6);
    /// ```
    #[must_use]
    pub fn balanced(carbon: f64, ratio: &ReferenceRatio) -> Self {
        let carbon_mol = carbon / ATOMIC_WEIGHT_C;
        Self {
            carbon,
            nitrogen: carbon_mol * (ratio.nitrogen / ratio.carbon) * ATOMIC_WEIGHT_N,
            phosphorus: carbon_mol / ratio.carbon * ATOMIC_WEIGHT_P,
        }
    }

    fn check(&self, index: usize) -> Result<()> {
        check_concentration(Species::Carbon, index, self.carbon)?;
        check_concentration(Species::Nitrogen, index, self.nitrogen)?;
        check_concentration(Species::Phosphorus, index, self.phosphorus)
    }
}

/// Percentage shares of N, C and P, summing to 100.
///
/// Field order is N, C, P on purpose; see the module docs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedComposition {
    /// Nitrogen share (0-100).
    pub nitrogen: f64,
    /// Carbon share (0-100).
    pub carbon: f64,
    /// Phosphorus share (0-100).
    pub phosphorus: f64,
}

impl NormalizedComposition {
    /// Sum of the three shares (100 up to rounding).
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.nitrogen + self.carbon + self.phosphorus
    }

    /// Shares as an `[N, C, P]` array.
    #[must_use]
    pub const fn to_array(&self) -> [f64; 3] {
        [self.nitrogen, self.carbon, self.phosphorus]
    }

    /// Ternary point (a, b, c) = (N, C, P).
    #[must_use]
    pub const fn to_ternary(&self) -> TernaryPoint {
        TernaryPoint::new(self.nitrogen, self.carbon, self.phosphorus)
    }
}

impl From<NormalizedComposition> for TernaryPoint {
    fn from(composition: NormalizedComposition) -> Self {
        composition.to_ternary()
    }
}

//=============================================================================
// Normalization
//=============================================================================

/// Normalize column-shaped C, N, P concentrations against `ratio`.
///
/// Produces one [`NormalizedComposition`] per index. The ratio is checked
/// first, then the slice lengths, then every value; a sample whose three
/// concentrations are all zero fails with [`Error::DegenerateSample`].
///
/// # Example
///
/// ```
/// use cnp_ternary::{ReferenceRatio, normalize};
///
/// let shares = normalize(
///     &[10.0, 4.0],
///     &[1.0, 0.5],
///     &[0.1, 0.02],
///     &ReferenceRatio::default(),
/// )
/// .unwrap();
/// assert_eq!(shares.len(), 2);
/// assert!((shares[0].sum() - 100.0).abs() < 1e-9);
/// ```
pub fn normalize(
    carbon: &[f64],
    nitrogen: &[f64],
    phosphorus: &[f64],
    ratio: &ReferenceRatio,
) -> Result<Vec<NormalizedComposition>> {
    ratio.validate()?;

    if carbon.len() != nitrogen.len() || carbon.len() != phosphorus.len() {
        return Err(Error::LengthMismatch {
            carbon: carbon.len(),
            nitrogen: nitrogen.len(),
            phosphorus: phosphorus.len(),
        });
    }

    for (species, values) in [
        (Species::Carbon, carbon),
        (Species::Nitrogen, nitrogen),
        (Species::Phosphorus, phosphorus),
    ] {
        for (index, &value) in values.iter().enumerate() {
            check_concentration(species, index, value)?;
        }
    }

    let scale = ratio.scale();
    carbon
        .iter()
        .zip(nitrogen)
        .zip(phosphorus)
        .enumerate()
        .map(|(index, ((&c, &n), &p))| scale.shares(index, &ConcentrationSample::new(c, n, p)))
        .collect()
}

/// Normalize row-shaped samples against `ratio`.
pub fn normalize_samples(
    samples: &[ConcentrationSample],
    ratio: &ReferenceRatio,
) -> Result<Vec<NormalizedComposition>> {
    ratio.validate()?;

    for (index, sample) in samples.iter().enumerate() {
        sample.check(index)?;
    }

    let scale = ratio.scale();
    samples
        .iter()
        .enumerate()
        .map(|(index, sample)| scale.shares(index, sample))
        .collect()
}

/// Normalize a single sample against `ratio`.
pub fn normalize_sample(
    sample: &ConcentrationSample,
    ratio: &ReferenceRatio,
) -> Result<NormalizedComposition> {
    ratio.validate()?;
    sample.check(0)?;
    ratio.scale().shares(0, sample)
}

fn check_concentration(species: Species, index: usize, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConcentration {
            species,
            index,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const THIRD: f64 = 100.0 / 3.0;

    fn assert_balanced(shares: &NormalizedComposition) {
        for share in shares.to_array() {
            assert!((share - THIRD).abs() < 1e-6, "share {share} != 100/3");
        }
    }

    #[test]
    fn test_balanced_sample_redfield() {
        // C = 10 mg/l, N and P derived from 106:16:1 by hand.
        let c = 10.0;
        let n = c / ((106.0 / 16.0 / ATOMIC_WEIGHT_N) * ATOMIC_WEIGHT_C);
        let p = c / ((106.0 / ATOMIC_WEIGHT_P) * ATOMIC_WEIGHT_C);

        let shares = normalize(&[c], &[n], &[p], &ReferenceRatio::REDFIELD).unwrap();
        assert_eq!(shares.len(), 1);
        assert_balanced(&shares[0]);
    }

    #[test]
    fn test_balanced_sample_any_ratio() {
        let ratios = [
            ReferenceRatio::REDFIELD,
            ReferenceRatio::GODWIN_COTNER,
            ReferenceRatio::new(212.0, 32.0, 2.0).unwrap(),
            ReferenceRatio::new(50.0, 7.5, 0.3).unwrap(),
        ];
        for ratio in &ratios {
            for carbon in [0.5, 10.0, 250.0] {
                let sample = ConcentrationSample::balanced(carbon, ratio);
                assert_balanced(&normalize_sample(&sample, ratio).unwrap());
            }
        }
    }

    #[test]
    fn test_phosphorus_scaled_by_carbon_component() {
        // 1 mmol C and 1 mmol P under 100:10:2: P counts 100 against C's 1.
        let ratio = ReferenceRatio::new(100.0, 10.0, 2.0).unwrap();
        let shares =
            normalize(&[ATOMIC_WEIGHT_C], &[0.0], &[ATOMIC_WEIGHT_P], &ratio).unwrap();
        assert!((shares[0].phosphorus - 100.0 / 101.0 * 100.0).abs() < 1e-9);
        assert!((shares[0].carbon - 1.0 / 101.0 * 100.0).abs() < 1e-9);
        assert_eq!(shares[0].nitrogen, 0.0);
    }

    #[test]
    fn test_overflowing_sample() {
        let err = normalize(&[1.0], &[0.0], &[1e308], &ReferenceRatio::REDFIELD).unwrap_err();
        assert!(matches!(err, Error::SampleOverflow { index: 0 }));
        assert_eq!(err.kind(), ErrorKind::Domain);

        let samples = [
            ConcentrationSample::new(1.0, 1.0, 1.0),
            ConcentrationSample::new(f64::MAX, 0.0, f64::MAX),
        ];
        let err = normalize_samples(&samples, &ReferenceRatio::GODWIN_COTNER).unwrap_err();
        assert!(matches!(err, Error::SampleOverflow { index: 1 }));
    }

    #[test]
    fn test_shares_sum_to_100() {
        let carbon = [12.0, 0.0, 3.5, 0.0, 100.0];
        let nitrogen = [1.4, 2.0, 0.0, 0.0, 0.01];
        let phosphorus = [0.03, 0.2, 0.0, 1.0, 7.0];

        for ratio in [ReferenceRatio::REDFIELD, ReferenceRatio::GODWIN_COTNER] {
            let shares = normalize(&carbon, &nitrogen, &phosphorus, &ratio).unwrap();
            assert_eq!(shares.len(), carbon.len());
            for s in &shares {
                assert!((s.sum() - 100.0).abs() < 1e-9);
                assert!(s.to_array().iter().all(|v| *v >= 0.0));
            }
        }
    }

    #[test]
    fn test_output_order_is_n_c_p() {
        // Only nitrogen present: the first field carries the full share.
        let shares = normalize(&[0.0], &[5.0], &[0.0], &ReferenceRatio::REDFIELD).unwrap();
        assert_eq!(shares[0].to_array(), [100.0, 0.0, 0.0]);

        let shares = normalize(&[5.0], &[0.0], &[0.0], &ReferenceRatio::REDFIELD).unwrap();
        assert_eq!(shares[0].to_array(), [0.0, 100.0, 0.0]);

        let point = shares[0].to_ternary();
        assert_eq!((point.a, point.b, point.c), (0.0, 100.0, 0.0));
    }

    #[test]
    fn test_serialized_field_order() {
        let composition = NormalizedComposition {
            nitrogen: 1.0,
            carbon: 2.0,
            phosphorus: 97.0,
        };
        let json = serde_json::to_string(&composition).unwrap();
        assert_eq!(json, r#"{"nitrogen":1.0,"carbon":2.0,"phosphorus":97.0}"#);
    }

    #[test]
    fn test_empty_input() {
        let shares = normalize(&[], &[], &[], &ReferenceRatio::default()).unwrap();
        assert!(shares.is_empty());
    }

    #[test]
    fn test_length_mismatch() {
        let err = normalize(&[1.0, 2.0], &[1.0], &[1.0, 2.0], &ReferenceRatio::default())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::LengthMismatch {
                carbon: 2,
                nitrogen: 1,
                phosphorus: 2
            }
        ));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_negative_concentration() {
        let err = normalize(&[1.0, 2.0], &[1.0, -0.1], &[1.0, 2.0], &ReferenceRatio::default())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConcentration {
                species: Species::Nitrogen,
                index: 1,
                ..
            }
        ));

        let err = normalize(&[f64::NAN], &[1.0], &[1.0], &ReferenceRatio::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidConcentration { species: Species::Carbon, .. }));
    }

    #[test]
    fn test_invalid_reference_checked_first() {
        let ratio = ReferenceRatio {
            carbon: 106.0,
            nitrogen: 16.0,
            phosphorus: 0.0,
        };
        // Mismatched lengths too, but the ratio is reported.
        let err = normalize(&[1.0], &[], &[], &ratio).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidReference {
                species: Species::Phosphorus,
                ..
            }
        ));

        let negative = ReferenceRatio {
            carbon: -1.0,
            ..ReferenceRatio::REDFIELD
        };
        assert!(negative.validate().is_err());
        assert!(ReferenceRatio::new(f64::INFINITY, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_degenerate_sample() {
        let err = normalize(&[1.0, 0.0], &[1.0, 0.0], &[1.0, 0.0], &ReferenceRatio::default())
            .unwrap_err();
        assert!(matches!(err, Error::DegenerateSample { index: 1 }));
        assert_eq!(err.kind(), ErrorKind::Domain);

        let samples = [ConcentrationSample::default()];
        let err = normalize_samples(&samples, &ReferenceRatio::default()).unwrap_err();
        assert!(matches!(err, Error::DegenerateSample { index: 0 }));
    }

    #[test]
    fn test_samples_match_columns() {
        let samples = [
            ConcentrationSample::new(8.0, 0.9, 0.05),
            ConcentrationSample::new(2.0, 3.1, 0.4),
        ];
        let rows = normalize_samples(&samples, &ReferenceRatio::GODWIN_COTNER).unwrap();
        let cols = normalize(
            &[8.0, 2.0],
            &[0.9, 3.1],
            &[0.05, 0.4],
            &ReferenceRatio::GODWIN_COTNER,
        )
        .unwrap();
        assert_eq!(rows, cols);
    }

    #[test]
    fn test_ratio_from_str() {
        assert_eq!("redfield".parse::<ReferenceRatio>().unwrap(), ReferenceRatio::REDFIELD);
        assert_eq!(
            "Godwin_Cotner".parse::<ReferenceRatio>().unwrap(),
            ReferenceRatio::GODWIN_COTNER
        );
        assert_eq!(
            " 106 : 16 : 1 ".parse::<ReferenceRatio>().unwrap(),
            ReferenceRatio::REDFIELD
        );
        assert!(matches!("106:16".parse::<ReferenceRatio>(), Err(Error::Parse { .. })));
        assert!(matches!("106:x:1".parse::<ReferenceRatio>(), Err(Error::Parse { .. })));
        assert!(matches!(
            "106:16:0".parse::<ReferenceRatio>(),
            Err(Error::InvalidReference { .. })
        ));
    }

    #[test]
    fn test_ratio_display() {
        assert_eq!(ReferenceRatio::REDFIELD.to_string(), "106:16:1");
        let ratio = ReferenceRatio::new(50.0, 7.5, 0.3).unwrap();
        assert_eq!(ratio.to_string().parse::<ReferenceRatio>().unwrap(), ratio);
    }

    #[test]
    fn test_ratio_deserialize_validates() {
        let ratio: ReferenceRatio =
            serde_json::from_str(r#"{"carbon":68,"nitrogen":14,"phosphorus":1}"#).unwrap();
        assert_eq!(ratio, ReferenceRatio::GODWIN_COTNER);

        let bad = serde_json::from_str::<ReferenceRatio>(
            r#"{"carbon":68,"nitrogen":-14,"phosphorus":1}"#,
        );
        assert!(bad.is_err());
    }
}
