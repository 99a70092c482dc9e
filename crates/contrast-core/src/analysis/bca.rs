//! Bias-corrected and accelerated (BCa) bootstrap intervals.
//!
//! Standard formulation from Efron & Tibshirani (1993), *An Introduction to
//! the Bootstrap*, ch. 14:
//!
//! ```text
//! z0 = Φ⁻¹( #{θ*_b < θ̂} / R )
//! a  = Σ d_i³ / (6 · (Σ d_i²)^1.5),   d_i = mean(θ_(·)) − θ_(i)
//! α' = Φ( z0 + (z0 + z_α) / (1 − a·(z0 + z_α)) )
//! ```
//!
//! where `θ_(i)` are the leave-one-subject-out (jackknife) estimates. The
//! bounds are the Type 2 quantiles of the sorted replicates at the adjusted
//! levels α'.

use serde::{Deserialize, Serialize};

use crate::math::{normal_cdf, normal_quantile, sq};
use crate::statistics::quantile_sorted;

/// Bias-correction and acceleration constants for one comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BcaConstants {
    /// Bias-correction constant z0.
    pub z0: f64,
    /// Acceleration constant a.
    pub acceleration: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tail {
    Lower,
    Upper,
}

impl BcaConstants {
    /// Estimate both constants from the sorted replicates, the observed
    /// estimate and the jackknife estimates.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_replicates` is empty.
    pub fn estimate(sorted_replicates: &[f64], observed: f64, jackknife: &[f64]) -> Self {
        Self {
            z0: bias_correction(sorted_replicates, observed),
            acceleration: acceleration(jackknife),
        }
    }

    /// Percentile-adjusted interval at `confidence_level` read off the sorted replicates.
    pub fn interval(&self, sorted_replicates: &[f64], confidence_level: f64) -> (f64, f64) {
        let (lower_level, upper_level) = self.adjusted_levels(confidence_level);
        (
            quantile_sorted(sorted_replicates, lower_level),
            quantile_sorted(sorted_replicates, upper_level),
        )
    }

    /// Adjusted lower and upper percentile levels for `confidence_level`.
    pub fn adjusted_levels(&self, confidence_level: f64) -> (f64, f64) {
        let alpha = 1.0 - confidence_level;
        let z_lower = normal_quantile(alpha / 2.0);
        let z_upper = normal_quantile(1.0 - alpha / 2.0);
        (
            self.adjust(z_lower, Tail::Lower),
            self.adjust(z_upper, Tail::Upper),
        )
    }

    fn adjust(&self, z: f64, tail: Tail) -> f64 {
        let w = self.z0 + z;
        let denominator = 1.0 - self.acceleration * w;

        // Past the pole the transform diverges; saturate at the tail's extreme.
        if denominator <= 0.0 {
            return match tail {
                Tail::Lower => 0.0,
                Tail::Upper => 1.0,
            };
        }

        let level = normal_cdf(self.z0 + w / denominator);
        if level.is_nan() {
            // Only reachable through a non-finite constant
            return match tail {
                Tail::Lower => 0.0,
                Tail::Upper => 1.0,
            };
        }
        level.clamp(0.0, 1.0)
    }
}

/// Bias-correction constant z0 from the share of replicates below `observed`.
///
/// The share is clamped to `[1/(2R), 1 − 1/(2R)]` so that z0 stays finite
/// when every replicate falls on one side of the observed estimate.
///
/// # Panics
///
/// Panics if `sorted_replicates` is empty.
pub fn bias_correction(sorted_replicates: &[f64], observed: f64) -> f64 {
    assert!(
        !sorted_replicates.is_empty(),
        "BCa needs at least one bootstrap replicate"
    );
    let r = sorted_replicates.len() as f64;
    let below = sorted_replicates.partition_point(|&t| t < observed) as f64;
    let edge = 0.5 / r;
    normal_quantile((below / r).clamp(edge, 1.0 - edge))
}

/// Acceleration constant from jackknife estimates.
///
/// Returns 0 (plain bias-corrected percentile) when there are fewer than two
/// jackknife values, they are all equal, or any of them is non-finite.
pub fn acceleration(jackknife: &[f64]) -> f64 {
    if jackknife.len() < 2 || jackknife.iter().any(|t| !t.is_finite()) {
        return 0.0;
    }

    let jack_mean = jackknife.iter().sum::<f64>() / jackknife.len() as f64;
    let (cubes, squares) = jackknife.iter().fold((0.0, 0.0), |(c, s), &t| {
        let d = jack_mean - t;
        (c + d * sq(d), s + sq(d))
    });

    if squares <= 0.0 {
        return 0.0;
    }
    let a = cubes / (6.0 * squares.powf(1.5));
    if a.is_finite() {
        a
    } else {
        0.0
    }
}
