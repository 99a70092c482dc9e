//! Conditions, effect-size kinds and paired series.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ContrastError;

/// Categorical label for one combination of experimental factors.
///
/// Labels such as `beer_positive` encode one level per factor; use
/// [`Condition::factor_level`] to recover a single level.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Condition(String);

impl Condition {
    /// Create a condition from its label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The condition label.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Level of the `index`-th factor, splitting the label on `separator`.
    ///
    /// `Condition::new("beer_positive").factor_level(1, '_')` is `Some("positive")`.
    pub fn factor_level(&self, index: usize, separator: char) -> Option<&str> {
        self.0.split(separator).nth(index)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Condition {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

/// Standardized effect-size statistic to bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectSizeKind {
    /// Cohen's d with the small-sample correction `1 - 3 / (4 df - 1)`.
    #[default]
    HedgesG,
    /// Mean difference over the standard deviation of the differences.
    CohensD,
    /// Correlation between the two raw condition vectors.
    PearsonR,
}

impl EffectSizeKind {
    /// Whether the statistic needs both raw condition vectors.
    pub fn needs_raw(self) -> bool {
        matches!(self, Self::PearsonR)
    }

    /// Short snake_case name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::HedgesG => "hedges_g",
            Self::CohensD => "cohens_d",
            Self::PearsonR => "pearson_r",
        }
    }
}

impl fmt::Display for EffectSizeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HedgesG => write!(f, "Hedges' g"),
            Self::CohensD => write!(f, "Cohen's d"),
            Self::PearsonR => write!(f, "Pearson's r"),
        }
    }
}

impl FromStr for EffectSizeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hedges_g" | "hedges" | "g" => Ok(Self::HedgesG),
            "cohens_d" | "cohen" | "d" => Ok(Self::CohensD),
            "pearson_r" | "pearson" | "r" => Ok(Self::PearsonR),
            other => Err(format!(
                "unknown effect size '{}' (expected hedges_g, cohens_d or pearson_r)",
                other
            )),
        }
    }
}

/// Per-subject differences for one named comparison.
///
/// Entry `i` of every vector belongs to the same subject. When built with
/// [`PairedSeries::from_pairs`] the raw condition vectors are kept, which
/// Pearson's r needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairedSeries {
    label: String,
    subjects: Vec<String>,
    differences: Vec<f64>,
    raw: Option<RawPairs>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct RawPairs {
    minuend: Vec<f64>,
    subtrahend: Vec<f64>,
}

impl PairedSeries {
    /// Build a series from bare differences.
    ///
    /// Subjects are numbered from 1 in input order.
    pub fn from_differences(label: impl Into<String>, differences: Vec<f64>) -> Self {
        let subjects = (1..=differences.len()).map(|i| i.to_string()).collect();
        Self {
            label: label.into(),
            subjects,
            differences,
            raw: None,
        }
    }

    /// Build a series from two subject-aligned condition vectors.
    ///
    /// Differences are `minuend[i] - subtrahend[i]`.
    ///
    /// # Errors
    ///
    /// [`ContrastError::MisalignedSeries`] if the three vectors differ in length.
    pub fn from_pairs(
        label: impl Into<String>,
        subjects: Vec<String>,
        minuend: Vec<f64>,
        subtrahend: Vec<f64>,
    ) -> Result<Self, ContrastError> {
        let label = label.into();
        if minuend.len() != subtrahend.len() || subjects.len() != minuend.len() {
            return Err(ContrastError::MisalignedSeries {
                label,
                subjects: subjects.len(),
                minuend: minuend.len(),
                subtrahend: subtrahend.len(),
            });
        }

        let differences = minuend
            .iter()
            .zip(&subtrahend)
            .map(|(a, b)| a - b)
            .collect();

        Ok(Self {
            label,
            subjects,
            differences,
            raw: Some(RawPairs {
                minuend,
                subtrahend,
            }),
        })
    }

    /// Comparison label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Subject ids, aligned with [`Self::differences`].
    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    /// Per-subject differences.
    pub fn differences(&self) -> &[f64] {
        &self.differences
    }

    /// Raw `(minuend, subtrahend)` vectors, if retained.
    pub fn raw(&self) -> Option<(&[f64], &[f64])> {
        self.raw
            .as_ref()
            .map(|r| (r.minuend.as_slice(), r.subtrahend.as_slice()))
    }

    /// Number of complete pairs.
    pub fn len(&self) -> usize {
        self.differences.len()
    }

    /// Whether the series has no pairs.
    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }

    /// Borrowed view used by the statistic kernels.
    ///
    /// Fails with [`ContrastError::MissingRawSeries`] when `kind` needs the
    /// raw vectors and they were not retained.
    pub(crate) fn view(&self, kind: EffectSizeKind) -> Result<SeriesView<'_>, ContrastError> {
        if kind.needs_raw() && self.raw.is_none() {
            return Err(ContrastError::MissingRawSeries {
                label: self.label.clone(),
            });
        }
        Ok(SeriesView {
            differences: &self.differences,
            raw: self.raw(),
        })
    }
}

/// Borrowed slices of one (possibly resampled) series.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SeriesView<'a> {
    pub differences: &'a [f64],
    pub raw: Option<(&'a [f64], &'a [f64])>,
}

impl SeriesView<'_> {
    pub fn len(&self) -> usize {
        self.differences.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_computes_differences() {
        let series = PairedSeries::from_pairs(
            "beer_vs_water",
            vec!["p1".into(), "p2".into()],
            vec![10.0, 4.0],
            vec![3.0, 6.0],
        )
        .unwrap();
        assert_eq!(series.differences(), &[7.0, -2.0]);
        assert_eq!(series.raw(), Some((&[10.0, 4.0][..], &[3.0, 6.0][..])));
    }

    #[test]
    fn test_from_pairs_rejects_misaligned_vectors() {
        let err = PairedSeries::from_pairs("x", vec!["p1".into()], vec![1.0], vec![1.0, 2.0])
            .unwrap_err();
        assert_eq!(
            err,
            ContrastError::MisalignedSeries {
                label: "x".to_string(),
                subjects: 1,
                minuend: 1,
                subtrahend: 2,
            }
        );

        let missing_ids = PairedSeries::from_pairs("y", Vec::new(), vec![1.0], vec![2.0]);
        assert!(matches!(
            missing_ids,
            Err(ContrastError::MisalignedSeries { subjects: 0, .. })
        ));
    }

    #[test]
    fn test_pearson_view_needs_raw() {
        let series = PairedSeries::from_differences("d", vec![1.0, 2.0, 3.0]);
        assert!(series.view(EffectSizeKind::CohensD).is_ok());
        assert_eq!(
            series.view(EffectSizeKind::PearsonR).unwrap_err(),
            ContrastError::MissingRawSeries {
                label: "d".to_string()
            }
        );
    }

    #[test]
    fn test_factor_level() {
        let condition = Condition::new("wine_negative");
        assert_eq!(condition.factor_level(0, '_'), Some("wine"));
        assert_eq!(condition.factor_level(1, '_'), Some("negative"));
        assert_eq!(condition.factor_level(2, '_'), None);
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("hedges_g".parse::<EffectSizeKind>(), Ok(EffectSizeKind::HedgesG));
        assert_eq!("Cohens_D".parse::<EffectSizeKind>(), Ok(EffectSizeKind::CohensD));
        assert_eq!("r".parse::<EffectSizeKind>(), Ok(EffectSizeKind::PearsonR));
        assert!("eta_squared".parse::<EffectSizeKind>().is_err());
    }
}
