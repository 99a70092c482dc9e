//! Standardized effect sizes for paired series.
//!
//! | kind | numerator | standardizer |
//! |------|-----------|--------------|
//! | Cohen's d | mean(diff) | sd(diff), divisor n |
//! | Hedges' g | mean(diff) | sd(diff), divisor n, times J |
//! | Pearson's r | – | correlation of the raw vectors |
//!
//! `J = 1 − 3 / (4·df − 1)` with `df = n − 1`, so `g = J·d` whether or not
//! the raw vectors were kept, and g approaches d as n grows.

use crate::error::ContrastError;
use crate::statistics::{mean, pearson_correlation, std_dev};
use crate::types::{EffectSizeKind, PairedSeries, SeriesView};

/// Compute the observed effect size of `kind` on the full series.
///
/// # Errors
///
/// - [`ContrastError::InsufficientSample`] if the series has fewer than 2 pairs
/// - [`ContrastError::MissingRawSeries`] if `kind` needs raw vectors that were not kept
/// - [`ContrastError::DegenerateVariance`] if the standardizer is zero
pub fn effect_size(series: &PairedSeries, kind: EffectSizeKind) -> Result<f64, ContrastError> {
    if series.len() < crate::constants::MIN_SERIES_LEN {
        return Err(ContrastError::InsufficientSample {
            label: series.label().to_string(),
            got: series.len(),
            min: crate::constants::MIN_SERIES_LEN,
        });
    }
    let view = series.view(kind)?;
    statistic(kind, &view).ok_or_else(|| ContrastError::DegenerateVariance {
        label: series.label().to_string(),
    })
}

/// Small-sample correction factor `1 − 3 / (4·df − 1)` for `n` pairs.
pub fn hedges_correction(n: usize) -> f64 {
    let df = n.saturating_sub(1) as f64;
    1.0 - 3.0 / (4.0 * df - 1.0)
}

/// Statistic kernel shared by the observed estimate, resamples and jackknife.
///
/// Returns `None` when the statistic is undefined for this (sub)sample.
pub(crate) fn statistic(kind: EffectSizeKind, view: &SeriesView<'_>) -> Option<f64> {
    if view.len() < 2 {
        return None;
    }

    let value = match kind {
        EffectSizeKind::CohensD => standardized_mean(view.differences)?,
        EffectSizeKind::HedgesG => {
            standardized_mean(view.differences)? * hedges_correction(view.len())
        }
        EffectSizeKind::PearsonR => {
            let (a, b) = view.raw?;
            pearson_correlation(a, b)?
        }
    };

    value.is_finite().then_some(value)
}

fn standardized_mean(differences: &[f64]) -> Option<f64> {
    Some(mean(differences) / std_dev(differences, 0)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subjects(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("p{}", i)).collect()
    }

    #[test]
    fn test_cohens_d_reference_series() {
        let series = PairedSeries::from_differences("x", vec![2.0, 4.0, 6.0, 8.0, 10.0]);
        let d = effect_size(&series, EffectSizeKind::CohensD).unwrap();
        // 6 / sqrt(8)
        assert!((d - 2.121_320_343).abs() < 1e-6, "d = {}", d);
    }

    #[test]
    fn test_hedges_g_without_raw_is_corrected_d() {
        let series = PairedSeries::from_differences("x", vec![2.0, 4.0, 6.0, 8.0, 10.0]);
        let d = effect_size(&series, EffectSizeKind::CohensD).unwrap();
        let g = effect_size(&series, EffectSizeKind::HedgesG).unwrap();
        // df = 4 -> J = 1 - 3/15 = 0.8
        assert!((g - 0.8 * d).abs() < 1e-12);
    }

    #[test]
    fn test_hedges_g_with_raw_vectors_is_corrected_d() {
        // Strongly correlated conditions: sd(diff) is far below either raw sd
        let a = vec![12.0, 23.0, 31.0, 44.0, 52.0];
        let b = vec![10.0, 20.0, 30.0, 40.0, 50.0];
        let series = PairedSeries::from_pairs("x", subjects(5), a, b).unwrap();
        let d = effect_size(&series, EffectSizeKind::CohensD).unwrap();
        let g = effect_size(&series, EffectSizeKind::HedgesG).unwrap();
        // diffs [2, 3, 1, 4, 2]: mean 2.4, population sd sqrt(1.04)
        assert!((d - 2.4 / 1.04_f64.sqrt()).abs() < 1e-12);
        assert!((g - hedges_correction(5) * d).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_r_uses_raw_vectors() {
        let a = vec![1.0, 2.0, 3.0, 4.0];
        let b = vec![1.5, 2.5, 3.5, 4.5];
        let series = PairedSeries::from_pairs("x", subjects(4), a, b).unwrap();
        let r = effect_size(&series, EffectSizeKind::PearsonR).unwrap();
        assert!((r - 1.0).abs() < 1e-12);

        // Constant differences are fine for r but degenerate for d
        assert_eq!(
            effect_size(&series, EffectSizeKind::CohensD),
            Err(ContrastError::DegenerateVariance {
                label: "x".to_string()
            })
        );
    }

    #[test]
    fn test_insufficient_sample() {
        let series = PairedSeries::from_differences("one", vec![3.0]);
        assert!(matches!(
            effect_size(&series, EffectSizeKind::CohensD),
            Err(ContrastError::InsufficientSample { got: 1, min: 2, .. })
        ));
    }

    #[test]
    fn test_hedges_correction_approaches_one() {
        assert!((hedges_correction(5) - 0.8).abs() < 1e-12);
        assert!(hedges_correction(10_000) > 0.9999);
        assert_eq!(hedges_correction(2), 0.0);
    }
}
