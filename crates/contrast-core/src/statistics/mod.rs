//! Statistical building blocks for the bootstrapper.
//!
//! - Moments (mean, variance, correlation) with degenerate-spread detection
//! - Type 2 quantiles for reading interval bounds off sorted replicates
//! - Counter-seeded subject resampling

mod moments;
mod quantile;
mod resample;

pub use moments::{mean, pearson_correlation, std_dev, variance};
pub use quantile::{compute_quantile, quantile_sorted};
pub use resample::{counter_rng_seed, resample_indices_into};
pub(crate) use resample::ResampleBuffers;
