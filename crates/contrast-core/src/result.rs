//! Result types: effect-size estimates, test rows and the summary table.

use serde::{Deserialize, Serialize};

use crate::analysis::BcaConstants;
use crate::types::EffectSizeKind;

/// Bootstrapped effect size for one comparison.
///
/// Built once by [`bootstrap_effect_size`](crate::bootstrap_effect_size) and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectSizeEstimate {
    /// Comparison label.
    pub label: String,
    /// Effect-size statistic.
    pub kind: EffectSizeKind,
    /// Statistic on the full series.
    pub point_estimate: f64,
    /// Mean of the bootstrap replicates minus the point estimate.
    pub bias: f64,
    /// Standard deviation of the bootstrap replicates.
    pub std_error: f64,
    /// Lower BCa bound.
    pub ci_lower: f64,
    /// Upper BCa bound.
    pub ci_upper: f64,
    /// Whether a BCa bound excluded the point estimate and was moved onto it.
    pub widened: bool,
    /// Confidence level of the interval.
    pub confidence_level: f64,
    /// Number of complete pairs.
    pub n: usize,
    /// Number of resamples drawn.
    pub resamples: usize,
    /// Resamples dropped because the statistic was undefined on them.
    pub degenerate_resamples: usize,
    /// BCa constants used for the interval.
    pub bca: BcaConstants,
}

impl EffectSizeEstimate {
    /// Width of the confidence interval.
    pub fn interval_width(&self) -> f64 {
        self.ci_upper - self.ci_lower
    }

    /// Whether the interval excludes zero.
    pub fn excludes_zero(&self) -> bool {
        self.ci_lower > 0.0 || self.ci_upper < 0.0
    }

    /// Point estimate minus the bootstrap bias.
    pub fn bias_corrected(&self) -> f64 {
        self.point_estimate - self.bias
    }
}

/// Hypothesis-test result for one comparison.
///
/// Supplied by the statistics collaborator; never recomputed here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestRow {
    /// Test statistic (t or F).
    pub statistic: f64,
    /// Degrees of freedom.
    pub df: f64,
    /// p-value, already adjusted for multiple comparisons.
    pub p_value: f64,
}

/// One row of the summary table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// Comparison label.
    pub label: String,
    /// Bootstrapped effect size.
    pub estimate: EffectSizeEstimate,
    /// Hypothesis test for the same comparison.
    pub test: TestRow,
}

/// Ordered, fully populated summary of all comparisons.
///
/// Row order is the order the comparisons were requested in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SummaryTable {
    rows: Vec<SummaryRow>,
}

impl SummaryTable {
    pub(crate) fn from_rows(rows: Vec<SummaryRow>) -> Self {
        Self { rows }
    }

    /// All rows in request order.
    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    /// Iterate over rows in request order.
    pub fn iter(&self) -> std::slice::Iter<'_, SummaryRow> {
        self.rows.iter()
    }

    /// Row for `label`, if present.
    pub fn get(&self, label: &str) -> Option<&SummaryRow> {
        self.rows.iter().find(|row| row.label == label)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'a> IntoIterator for &'a SummaryTable {
    type Item = &'a SummaryRow;
    type IntoIter = std::slice::Iter<'a, SummaryRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
