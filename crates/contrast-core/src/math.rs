//! Standard normal helpers backed by `statrs` special functions.

use statrs::function::erf::{erf, erf_inv};

/// Standard normal CDF: Φ(x) = (1 + erf(x/√2)) / 2
#[inline]
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x * std::f64::consts::FRAC_1_SQRT_2))
}

/// Standard normal quantile: Φ⁻¹(p) = √2 · erf⁻¹(2p − 1)
///
/// Returns ±∞ at p = 0 or 1 and NaN outside [0, 1].
#[inline]
pub fn normal_quantile(p: f64) -> f64 {
    std::f64::consts::SQRT_2 * erf_inv(2.0 * p - 1.0)
}

/// Square (x^2).
#[inline]
pub fn sq(x: f64) -> f64 {
    x * x
}
