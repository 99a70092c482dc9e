//! Hypothesis tests for paired series.
//!
//! The summary table pairs every effect size with a test row. Tests are a
//! collaborator: anything implementing [`HypothesisTest`] can supply the
//! rows. [`PairedTTest`] is the default.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

use contrast_core::constants::MIN_SERIES_LEN;
use contrast_core::statistics::{mean, std_dev};
use contrast_core::{ContrastError, PairedSeries, TestRow};

/// A significance test of one paired series.
pub trait HypothesisTest: Send + Sync {
    /// Short name shown in reports.
    fn name(&self) -> &str;

    /// Test statistic, degrees of freedom and unadjusted p-value.
    fn test(&self, series: &PairedSeries) -> Result<TestRow, ContrastError>;
}

/// Two-sided one-sample t-test of the paired differences against zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairedTTest;

impl HypothesisTest for PairedTTest {
    fn name(&self) -> &str {
        "paired t-test"
    }

    fn test(&self, series: &PairedSeries) -> Result<TestRow, ContrastError> {
        let d = series.differences();
        let n = d.len();
        if n < MIN_SERIES_LEN {
            return Err(ContrastError::InsufficientSample {
                label: series.label().to_string(),
                got: n,
                min: MIN_SERIES_LEN,
            });
        }

        let degenerate = || ContrastError::DegenerateVariance {
            label: series.label().to_string(),
        };
        let sd = std_dev(d, 1).ok_or_else(degenerate)?;
        let statistic = mean(d) / (sd / (n as f64).sqrt());
        let df = (n - 1) as f64;

        let t = StudentsT::new(0.0, 1.0, df).map_err(|_| degenerate())?;
        let p_value = (2.0 * t.sf(statistic.abs())).min(1.0);

        Ok(TestRow {
            statistic,
            df,
            p_value,
        })
    }
}

/// Multiple-comparison adjustment of p-values across a family of contrasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PAdjust {
    /// Report raw p-values.
    None,
    /// Multiply by the family size.
    Bonferroni,
    /// Holm's step-down procedure.
    #[default]
    Holm,
}

impl PAdjust {
    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            PAdjust::None => "none",
            PAdjust::Bonferroni => "bonferroni",
            PAdjust::Holm => "holm",
        }
    }

    /// Adjust a family of p-values, keeping input order.
    ///
    /// Adjusted values are capped at 1 and never fall below the raw value.
    pub fn adjust(self, p_values: &[f64]) -> Vec<f64> {
        let m = p_values.len() as f64;
        match self {
            PAdjust::None => p_values.to_vec(),
            PAdjust::Bonferroni => p_values.iter().map(|p| (p * m).min(1.0)).collect(),
            PAdjust::Holm => {
                let mut order: Vec<usize> = (0..p_values.len()).collect();
                order.sort_by(|&a, &b| p_values[a].total_cmp(&p_values[b]));

                let mut adjusted = vec![0.0; p_values.len()];
                let mut running_max: f64 = 0.0;
                for (rank, &i) in order.iter().enumerate() {
                    let scaled = (p_values[i] * (m - rank as f64)).min(1.0);
                    running_max = running_max.max(scaled);
                    adjusted[i] = running_max;
                }
                adjusted
            }
        }
    }
}

impl fmt::Display for PAdjust {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PAdjust {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(PAdjust::None),
            "bonferroni" => Ok(PAdjust::Bonferroni),
            "holm" => Ok(PAdjust::Holm),
            _ => Err(format!(
                "Unknown p-value adjustment '{}'. Expected none, bonferroni or holm",
                s
            )),
        }
    }
}

/// Test every series and adjust the p-values across the family.
///
/// The result is keyed by series label, ready for
/// [`aggregate`](contrast_core::aggregate).
pub fn run_tests(
    test: &dyn HypothesisTest,
    series: &[PairedSeries],
    adjust: PAdjust,
) -> Result<BTreeMap<String, TestRow>, ContrastError> {
    let raw = series
        .iter()
        .map(|s| test.test(s))
        .collect::<Result<Vec<_>, _>>()?;

    let p_values: Vec<f64> = raw.iter().map(|row| row.p_value).collect();
    let adjusted = adjust.adjust(&p_values);

    tracing::debug!(
        test = test.name(),
        adjust = adjust.name(),
        comparisons = series.len(),
        "ran hypothesis tests"
    );

    Ok(series
        .iter()
        .zip(raw)
        .zip(adjusted)
        .map(|((s, row), p_value)| (s.label().to_string(), TestRow { p_value, ..row }))
        .collect())
}
