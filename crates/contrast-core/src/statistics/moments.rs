//! Sample moments.
//!
//! Spread estimators return `None` when the spread is zero relative to the
//! magnitude of the data, so callers can report an undefined effect size
//! instead of dividing by rounding noise.

use crate::constants::DEGENERATE_SD_TOLERANCE;

/// Arithmetic mean. Returns NaN for an empty slice.
pub fn mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

/// Variance with divisor `n - ddof`.
///
/// Returns `None` if `n <= ddof`.
pub fn variance(data: &[f64], ddof: usize) -> Option<f64> {
    let n = data.len();
    if n <= ddof {
        return None;
    }
    let m = mean(data);
    let ss: f64 = data.iter().map(|x| (x - m) * (x - m)).sum();
    Some(ss / (n - ddof) as f64)
}

/// Standard deviation with divisor `n - ddof`.
///
/// Returns `None` if the sample is too short or the deviation is negligible.
pub fn std_dev(data: &[f64], ddof: usize) -> Option<f64> {
    let sd = variance(data, ddof)?.sqrt();
    non_degenerate(sd, scale(data))
}

/// Pearson correlation between two equally long slices.
///
/// Returns `None` if either slice has no spread or the lengths differ.
pub fn pearson_correlation(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.len() != b.len() || a.len() < 2 {
        return None;
    }
    let (ma, mb) = (mean(a), mean(b));

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (x, y) in a.iter().zip(b) {
        let dx = x - ma;
        let dy = y - mb;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let n = a.len() as f64;
    non_degenerate((sxx / n).sqrt(), scale(a))?;
    non_degenerate((syy / n).sqrt(), scale(b))?;

    // Rounding can push |r| a hair past 1
    Some((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

fn scale(data: &[f64]) -> f64 {
    data.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()))
}

fn non_degenerate(sd: f64, scale: f64) -> Option<f64> {
    let floor = DEGENERATE_SD_TOLERANCE * scale.max(f64::MIN_POSITIVE);
    (sd.is_finite() && sd > floor).then_some(sd)
}
