//! Descriptive summaries of ratings per condition and per factor level.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

use contrast_core::statistics::{compute_quantile, mean, variance};
use contrast_core::Condition;

use crate::data::LongRow;

/// Coverage of the interval in [`ConditionSummary::ci`].
pub const DESCRIPTIVE_CONFIDENCE: f64 = 0.95;

/// Descriptive statistics for one condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionSummary {
    /// The condition.
    pub condition: Condition,
    /// Number of ratings.
    pub n: usize,
    /// Mean rating.
    pub mean: f64,
    /// Median rating.
    pub median: f64,
    /// Sample standard deviation (divisor n - 1). `None` for a single rating.
    pub sd: Option<f64>,
    /// Standard error of the mean.
    pub se: Option<f64>,
    /// t-based 95% confidence interval for the mean.
    pub ci: Option<(f64, f64)>,
}

/// Mean rating across all conditions sharing one factor level.
///
/// With labels like `beer_positive`, factor 0 is the drink and factor 1 the
/// imagery; the `beer` level pools `beer_positive`, `beer_negative`, ...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSummary {
    /// Zero-based position of the factor within condition labels.
    pub factor: usize,
    /// The level.
    pub level: String,
    /// Number of pooled ratings.
    pub n: usize,
    /// Mean of the pooled ratings.
    pub mean: f64,
    /// Sample standard deviation of the pooled ratings.
    pub sd: Option<f64>,
}

/// Summarize every condition in `conditions` order.
///
/// Conditions without ratings are left out.
pub fn describe_conditions(long: &[LongRow], conditions: &[Condition]) -> Vec<ConditionSummary> {
    conditions
        .iter()
        .filter_map(|condition| {
            let mut ratings: Vec<f64> = long
                .iter()
                .filter(|row| &row.condition == condition)
                .map(|row| row.rating)
                .collect();
            summarize(condition, &mut ratings)
        })
        .collect()
}

/// Marginal summaries for factor `factor`, levels in order of first appearance.
///
/// Levels are read from condition labels split on `separator`. Ratings whose
/// label has no such factor are skipped.
pub fn describe_factor(long: &[LongRow], factor: usize, separator: char) -> Vec<LevelSummary> {
    let mut levels: Vec<(&str, Vec<f64>)> = Vec::new();
    for row in long {
        let Some(level) = row.condition.factor_level(factor, separator) else {
            continue;
        };
        match levels.iter_mut().find(|(l, _)| *l == level) {
            Some((_, ratings)) => ratings.push(row.rating),
            None => levels.push((level, vec![row.rating])),
        }
    }

    levels
        .into_iter()
        .map(|(level, ratings)| LevelSummary {
            factor,
            level: level.to_string(),
            n: ratings.len(),
            mean: mean(&ratings),
            sd: variance(&ratings, 1).map(f64::sqrt),
        })
        .collect()
}

/// Number of factors shared by every condition label, or 0 if labels are not
/// factorial (fewer than two parts, or differing part counts).
pub fn factor_count(conditions: &[Condition], separator: char) -> usize {
    let mut counts = conditions
        .iter()
        .map(|c| c.as_str().split(separator).count());
    match counts.next() {
        Some(first) if first >= 2 && counts.all(|c| c == first) => first,
        _ => 0,
    }
}

fn summarize(condition: &Condition, ratings: &mut [f64]) -> Option<ConditionSummary> {
    let n = ratings.len();
    if n == 0 {
        return None;
    }

    let m = mean(ratings);
    let sd = variance(ratings, 1).map(f64::sqrt);
    let se = sd.map(|sd| sd / (n as f64).sqrt());
    let ci = se.and_then(|se| {
        let t = StudentsT::new(0.0, 1.0, (n - 1) as f64).ok()?;
        let half_width = t.inverse_cdf(0.5 + DESCRIPTIVE_CONFIDENCE / 2.0) * se;
        Some((m - half_width, m + half_width))
    });

    Some(ConditionSummary {
        condition: condition.clone(),
        n,
        mean: m,
        median: compute_quantile(ratings, 0.5),
        sd,
        se,
        ci,
    })
}
