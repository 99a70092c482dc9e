//! Main `Analysis` entry point and builder.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use contrast_core::{aggregate, bootstrap_all, ContrastError, EffectSizeKind, SummaryTable};

use crate::config::Config;
use crate::data::{DataError, Dataset};
use crate::describe::{
    describe_conditions, describe_factor, factor_count, ConditionSummary, LevelSummary,
};
use crate::pairing::{paired_series_all, Comparison};
use crate::testing::{run_tests, HypothesisTest, PAdjust, PairedTTest};

/// Errors from a full analysis run.
#[derive(Debug)]
pub enum AnalysisError {
    /// Loading, reshaping or pairing the ratings failed.
    Data(DataError),
    /// A statistic could not be computed.
    Contrast(ContrastError),
    /// No comparisons were requested.
    NoComparisons,
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::Data(e) => write!(f, "{}", e),
            AnalysisError::Contrast(e) => write!(f, "{}", e),
            AnalysisError::NoComparisons => write!(f, "No comparisons requested"),
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalysisError::Data(e) => Some(e),
            AnalysisError::Contrast(e) => Some(e),
            AnalysisError::NoComparisons => None,
        }
    }
}

impl From<DataError> for AnalysisError {
    fn from(e: DataError) -> Self {
        AnalysisError::Data(e)
    }
}

impl From<ContrastError> for AnalysisError {
    fn from(e: ContrastError) -> Self {
        AnalysisError::Contrast(e)
    }
}

/// Everything a run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Configuration the run used.
    pub config: Config,
    /// Name of the hypothesis test behind the summary's test rows.
    pub test: String,
    /// Descriptive statistics per condition, in dataset order.
    pub conditions: Vec<ConditionSummary>,
    /// Marginal means per factor level, when condition labels are factorial.
    pub levels: Vec<LevelSummary>,
    /// One row per comparison, in request order.
    pub summary: SummaryTable,
}

/// Paired-contrast analysis of a ratings table.
///
/// # Example
///
/// ```ignore
/// use contrast::Analysis;
///
/// let report = Analysis::quick()
///     .comparison("beer_vs_water", "beer_positive", "water_positive")
///     .seed(7)
///     .run(&dataset)?;
///
/// for row in &report.summary {
///     println!("{}: {:.2}", row.label, row.estimate.point_estimate);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    config: Config,
    comparisons: Vec<Comparison>,
}

impl Analysis {
    /// Create with default configuration and no comparisons.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a given configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            comparisons: Vec::new(),
        }
    }

    /// Start from [`Config::quick`].
    pub fn quick() -> Self {
        Self::with_config(Config::quick())
    }

    /// Start from [`Config::thorough`].
    pub fn thorough() -> Self {
        Self::with_config(Config::thorough())
    }

    /// Add the comparison `minuend - subtrahend` under `label`.
    pub fn comparison(self, label: &str, minuend: &str, subtrahend: &str) -> Self {
        self.contrast(Comparison::new(label, minuend, subtrahend))
    }

    /// Add a prepared comparison.
    pub fn contrast(mut self, comparison: Comparison) -> Self {
        self.comparisons.push(comparison);
        self
    }

    /// Set bootstrap resamples.
    pub fn resamples(mut self, resamples: usize) -> Self {
        self.config = self.config.resamples(resamples);
        self
    }

    /// Set the effect-size kind.
    pub fn kind(mut self, kind: EffectSizeKind) -> Self {
        self.config = self.config.kind(kind);
        self
    }

    /// Set the confidence level.
    pub fn confidence_level(mut self, level: f64) -> Self {
        self.config = self.config.confidence_level(level);
        self
    }

    /// Set the resampling seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config = self.config.seed(seed);
        self
    }

    /// Set the multiple-comparison adjustment.
    pub fn p_adjust(mut self, adjust: PAdjust) -> Self {
        self.config = self.config.p_adjust(adjust);
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Comparisons in request order.
    pub fn comparisons(&self) -> &[Comparison] {
        &self.comparisons
    }

    /// Run with the [`PairedTTest`].
    pub fn run(&self, dataset: &Dataset) -> Result<Report, AnalysisError> {
        self.run_with(dataset, &PairedTTest)
    }

    /// Run with a custom hypothesis test.
    ///
    /// Pairs subjects per comparison, tests and adjusts, bootstraps effect
    /// sizes and joins everything by label. Any failing comparison fails the
    /// run.
    pub fn run_with(
        &self,
        dataset: &Dataset,
        test: &dyn HypothesisTest,
    ) -> Result<Report, AnalysisError> {
        self.config.validate()?;
        if self.comparisons.is_empty() {
            return Err(AnalysisError::NoComparisons);
        }
        for comparison in &self.comparisons {
            comparison.check(dataset.conditions())?;
        }

        tracing::info!(
            subjects = dataset.len(),
            comparisons = self.comparisons.len(),
            kind = self.config.bootstrap.kind.name(),
            resamples = self.config.bootstrap.resamples,
            "running contrast analysis"
        );

        let long = dataset.to_long();
        let conditions = describe_conditions(&long, dataset.conditions());
        let separator = self.config.factor_separator;
        let levels = (0..factor_count(dataset.conditions(), separator))
            .flat_map(|factor| describe_factor(&long, factor, separator))
            .collect();

        let series = paired_series_all(&long, &self.comparisons)?;
        let tests = run_tests(test, &series, self.config.p_adjust)?;
        let estimates: BTreeMap<String, _> = bootstrap_all(&series, &self.config.bootstrap)?
            .into_iter()
            .map(|estimate| (estimate.label.clone(), estimate))
            .collect();

        let order: Vec<&str> = self.comparisons.iter().map(|c| c.label.as_str()).collect();
        let summary = aggregate(&order, estimates, tests)?;

        Ok(Report {
            config: self.config.clone(),
            test: test.name().to_string(),
            conditions,
            levels,
            summary,
        })
    }
}
