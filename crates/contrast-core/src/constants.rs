//! Shared numeric constants.

/// Minimum series length for which an effect size and its jackknife exist.
pub const MIN_SERIES_LEN: usize = 2;

/// Minimum number of non-degenerate bootstrap replicates needed to form an
/// interval.
pub const MIN_VALID_REPLICATES: usize = 2;

/// Relative tolerance below which a standard deviation counts as zero.
///
/// Scaled by the largest absolute value in the data, so that series like
/// `[0.1, 0.1, 0.1]` (whose computed deviation is rounding noise) are
/// treated as constant.
pub const DEGENERATE_SD_TOLERANCE: f64 = 1e-12;

/// Default number of bootstrap resamples.
pub const DEFAULT_RESAMPLES: usize = 5_000;

/// Default confidence level for intervals.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Default resampling seed.
pub const DEFAULT_SEED: u64 = 42;
