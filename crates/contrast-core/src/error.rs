//! Error types for effect-size estimation and summary aggregation.

use std::fmt;

/// Which side of a summary join lacked a comparison label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingPart {
    /// The label was requested but no effect-size estimate was supplied.
    Estimate,
    /// The label was requested but no hypothesis-test row was supplied.
    TestRow,
    /// An estimate or test row was supplied for a label that was never requested.
    Request,
}

impl fmt::Display for MissingPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Estimate => write!(f, "effect-size estimate"),
            Self::TestRow => write!(f, "hypothesis-test row"),
            Self::Request => write!(f, "entry in the requested comparison order"),
        }
    }
}

/// Error returned when an effect size cannot be estimated or a summary
/// cannot be assembled.
///
/// All variants describe structural defects in the input (too few subjects,
/// zero variance, mismatched labels). Retrying with the same input always
/// fails the same way.
#[derive(Debug, Clone, PartialEq)]
pub enum ContrastError {
    /// The paired series is too short for the statistic and its jackknife.
    InsufficientSample {
        /// Comparison label.
        label: String,
        /// Number of complete pairs found.
        got: usize,
        /// Minimum number of pairs required.
        min: usize,
    },

    /// The confidence level is not strictly between 0 and 1.
    InvalidConfidenceLevel {
        /// The rejected level.
        level: f64,
    },

    /// The resample count is zero.
    InvalidResampleCount {
        /// The rejected count.
        resamples: usize,
    },

    /// The effect-size denominator is zero, so the effect size is undefined.
    DegenerateVariance {
        /// Comparison label.
        label: String,
    },

    /// The effect-size kind needs the two raw condition vectors, but the
    /// series only carries differences.
    MissingRawSeries {
        /// Comparison label.
        label: String,
    },

    /// The subject ids and the two condition vectors of a series differ in
    /// length.
    MisalignedSeries {
        /// Comparison label.
        label: String,
        /// Number of subject ids.
        subjects: usize,
        /// Length of the minuend vector.
        minuend: usize,
        /// Length of the subtrahend vector.
        subtrahend: usize,
    },

    /// A comparison label is present on one side of the summary join only.
    MissingComparison {
        /// Comparison label.
        label: String,
        /// What was missing for this label.
        missing: MissingPart,
    },

    /// The requested comparison order names the same label twice.
    DuplicateComparison {
        /// Comparison label.
        label: String,
    },
}

impl fmt::Display for ContrastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientSample { label, got, min } => write!(
                f,
                "insufficient sample for '{}': got {} complete pairs, need at least {}",
                label, got, min
            ),
            Self::InvalidConfidenceLevel { level } => {
                write!(f, "confidence level must be in (0, 1), got {}", level)
            }
            Self::InvalidResampleCount { resamples } => {
                write!(f, "resample count must be positive, got {}", resamples)
            }
            Self::DegenerateVariance { label } => write!(
                f,
                "effect size for '{}' is undefined: standardizer has zero variance",
                label
            ),
            Self::MissingRawSeries { label } => write!(
                f,
                "effect size for '{}' needs both raw condition vectors, but only differences were supplied",
                label
            ),
            Self::MisalignedSeries {
                label,
                subjects,
                minuend,
                subtrahend,
            } => write!(
                f,
                "series '{}' is misaligned: {} subjects, {} minuend and {} subtrahend values",
                label, subjects, minuend, subtrahend
            ),
            Self::MissingComparison { label, missing } => {
                write!(f, "comparison '{}' has no {}", label, missing)
            }
            Self::DuplicateComparison { label } => {
                write!(f, "comparison '{}' is requested more than once", label)
            }
        }
    }
}

impl std::error::Error for ContrastError {}
