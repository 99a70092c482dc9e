//! Paired within-subject series for each requested contrast.
//!
//! A contrast subtracts one condition from another, subject by subject.
//! Only subjects rated under both conditions enter a series; a subject
//! missing one rating is dropped from that series alone and still counts for
//! every other contrast.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use contrast_core::{Condition, PairedSeries};

use crate::data::{DataError, LongRow};

/// A requested contrast `minuend - subtrahend`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    /// Label used in every output row.
    pub label: String,
    /// Condition the other is subtracted from.
    pub minuend: Condition,
    /// Condition subtracted.
    pub subtrahend: Condition,
}

impl Comparison {
    /// Create a labelled comparison.
    pub fn new(
        label: impl Into<String>,
        minuend: impl Into<Condition>,
        subtrahend: impl Into<Condition>,
    ) -> Self {
        Self {
            label: label.into(),
            minuend: minuend.into(),
            subtrahend: subtrahend.into(),
        }
    }

    /// Create a comparison labelled `{minuend}_vs_{subtrahend}`.
    pub fn between(minuend: impl Into<Condition>, subtrahend: impl Into<Condition>) -> Self {
        let minuend = minuend.into();
        let subtrahend = subtrahend.into();
        Self {
            label: format!("{}_vs_{}", minuend, subtrahend),
            minuend,
            subtrahend,
        }
    }

    /// Fail with [`DataError::UnknownCondition`] if either side is not in `conditions`.
    pub fn check(&self, conditions: &[Condition]) -> Result<(), DataError> {
        for condition in [&self.minuend, &self.subtrahend] {
            if !conditions.contains(condition) {
                return Err(DataError::UnknownCondition {
                    condition: condition.clone(),
                    available: conditions.to_vec(),
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {} - {}", self.label, self.minuend, self.subtrahend)
    }
}

/// Parses `[LABEL=]MINUEND:SUBTRAHEND`.
impl FromStr for Comparison {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (label, pair) = match s.split_once('=') {
            Some((label, pair)) => (Some(label.trim()), pair),
            None => (None, s),
        };

        let (minuend, subtrahend) = pair
            .split_once(':')
            .map(|(a, b)| (a.trim(), b.trim()))
            .filter(|(a, b)| !a.is_empty() && !b.is_empty())
            .ok_or_else(|| {
                format!(
                    "Invalid contrast '{}'. Expected [LABEL=]MINUEND:SUBTRAHEND",
                    s
                )
            })?;

        match label {
            Some("") => Err(format!("Empty label in contrast '{}'", s)),
            Some(label) => Ok(Comparison::new(label, minuend, subtrahend)),
            None => Ok(Comparison::between(minuend, subtrahend)),
        }
    }
}

/// Build the complete-case paired series for one comparison.
///
/// Subjects appear in order of their first observation in `long`.
///
/// # Errors
///
/// - [`DataError::UnknownCondition`] if `long` has no rating at all for a side
/// - [`DataError::DuplicateObservation`] if a subject is rated twice for a side
pub fn paired_series(long: &[LongRow], comparison: &Comparison) -> Result<PairedSeries, DataError> {
    let mut order: Vec<&str> = Vec::new();
    let mut slots: HashMap<&str, [Option<f64>; 2]> = HashMap::new();
    let mut seen = [false; 2];

    for row in long {
        let side = if row.condition == comparison.minuend {
            0
        } else if row.condition == comparison.subtrahend {
            1
        } else {
            continue;
        };
        seen[side] = true;

        let slot = slots.entry(row.subject.as_str()).or_insert_with(|| {
            order.push(row.subject.as_str());
            [None, None]
        });
        if slot[side].replace(row.rating).is_some() {
            return Err(DataError::DuplicateObservation {
                subject: row.subject.clone(),
                condition: row.condition.clone(),
            });
        }
    }

    for (side, condition) in [&comparison.minuend, &comparison.subtrahend]
        .into_iter()
        .enumerate()
    {
        if !seen[side] {
            return Err(DataError::UnknownCondition {
                condition: condition.clone(),
                available: conditions_of(long),
            });
        }
    }

    let mut subjects = Vec::with_capacity(order.len());
    let mut minuend = Vec::with_capacity(order.len());
    let mut subtrahend = Vec::with_capacity(order.len());
    let mut excluded = Vec::new();

    for subject in order {
        match slots[subject] {
            [Some(a), Some(b)] => {
                subjects.push(subject.to_string());
                minuend.push(a);
                subtrahend.push(b);
            }
            _ => excluded.push(subject),
        }
    }

    if !excluded.is_empty() {
        tracing::debug!(
            comparison = %comparison.label,
            kept = subjects.len(),
            excluded = ?excluded,
            "dropped subjects missing a paired rating"
        );
    }

    Ok(PairedSeries::from_pairs(
        comparison.label.clone(),
        subjects,
        minuend,
        subtrahend,
    )?)
}

/// [`paired_series`] for every comparison, in order.
pub fn paired_series_all(
    long: &[LongRow],
    comparisons: &[Comparison],
) -> Result<Vec<PairedSeries>, DataError> {
    comparisons
        .iter()
        .map(|comparison| paired_series(long, comparison))
        .collect()
}

/// Distinct conditions in order of first appearance.
fn conditions_of(long: &[LongRow]) -> Vec<Condition> {
    let mut conditions: Vec<Condition> = Vec::new();
    for row in long {
        if !conditions.contains(&row.condition) {
            conditions.push(row.condition.clone());
        }
    }
    conditions
}
