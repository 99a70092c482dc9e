//! Bootstrapped effect sizes with BCa intervals.
//!
//! Each comparison is handled independently:
//!
//! 1. Observed statistic on the full series
//! 2. R subject-level resamples, each with its own counter-seeded generator
//! 3. Bias and standard error from the replicate distribution
//! 4. BCa constants from the replicates and the jackknife
//! 5. Interval bounds at the BCa-adjusted levels
//!
//! Replicates whose statistic is undefined (for example a resample that drew
//! the same subject every time, leaving no spread) are dropped and counted.

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::analysis::bca::BcaConstants;
use crate::analysis::effect::{effect_size, statistic};
use crate::config::BootstrapConfig;
use crate::constants::{MIN_SERIES_LEN, MIN_VALID_REPLICATES};
use crate::error::ContrastError;
use crate::result::EffectSizeEstimate;
use crate::statistics::{counter_rng_seed, mean, ResampleBuffers};
use crate::types::{EffectSizeKind, PairedSeries, SeriesView};

/// Bootstrap the effect size of one paired series.
///
/// Pure function of its inputs: the same series and configuration (seed
/// included) always produce a bit-identical estimate.
///
/// # Errors
///
/// - [`ContrastError::InvalidConfidenceLevel`] if the level is outside (0, 1)
/// - [`ContrastError::InvalidResampleCount`] if `resamples` is zero
/// - [`ContrastError::InsufficientSample`] if the series has fewer than 2 pairs
/// - [`ContrastError::MissingRawSeries`] for Pearson's r on a differences-only series
/// - [`ContrastError::DegenerateVariance`] if the observed statistic is undefined,
///   or fewer than 2 resamples yield a defined statistic
pub fn bootstrap_effect_size(
    series: &PairedSeries,
    config: &BootstrapConfig,
) -> Result<EffectSizeEstimate, ContrastError> {
    config.validate()?;

    let kind = config.kind;
    let observed = effect_size(series, kind)?;
    let view = series.view(kind)?;

    let mut replicates = resample_statistics(&view, kind, config.resamples, config.seed);
    let degenerate_resamples = config.resamples - replicates.len();
    if replicates.len() < MIN_VALID_REPLICATES {
        return Err(ContrastError::DegenerateVariance {
            label: series.label().to_string(),
        });
    }

    let replicate_mean = mean(&replicates);
    let bias = replicate_mean - observed;
    let std_error = (replicates
        .iter()
        .map(|t| (t - replicate_mean) * (t - replicate_mean))
        .sum::<f64>()
        / (replicates.len() - 1) as f64)
        .sqrt();

    replicates.sort_unstable_by(|a, b| a.total_cmp(b));

    let jackknife = jackknife_statistics(&view, kind);
    let constants = BcaConstants::estimate(&replicates, observed, &jackknife);
    let (lower, upper) = constants.interval(&replicates, config.confidence_level);
    let (ci_lower, ci_upper, widened) = contain(lower, upper, observed);

    tracing::debug!(
        label = series.label(),
        kind = kind.name(),
        n = series.len(),
        observed,
        z0 = constants.z0,
        acceleration = constants.acceleration,
        degenerate_resamples,
        widened,
        "bootstrapped effect size"
    );

    Ok(EffectSizeEstimate {
        label: series.label().to_string(),
        kind,
        point_estimate: observed,
        bias,
        std_error,
        ci_lower,
        ci_upper,
        widened,
        confidence_level: config.confidence_level,
        n: series.len(),
        resamples: config.resamples,
        degenerate_resamples,
        bca: constants,
    })
}

/// Bootstrap every series, keeping input order.
///
/// Comparison `k` is resampled with seed `counter_rng_seed(config.seed, k)`,
/// so comparisons never share a random stream and the result does not
/// depend on scheduling. With the `parallel` feature comparisons run
/// concurrently. Any failing comparison fails the whole call; when several
/// fail, which error is returned is unspecified under `parallel`.
pub fn bootstrap_all(
    series: &[PairedSeries],
    config: &BootstrapConfig,
) -> Result<Vec<EffectSizeEstimate>, ContrastError> {
    config.validate()?;

    let run = |(k, s): (usize, &PairedSeries)| {
        let per_comparison = config.clone().seed(counter_rng_seed(config.seed, k as u64));
        bootstrap_effect_size(s, &per_comparison)
    };

    #[cfg(feature = "parallel")]
    let estimates = series.par_iter().enumerate().map(run).collect();

    #[cfg(not(feature = "parallel"))]
    let estimates = series.iter().enumerate().map(run).collect();

    estimates
}

/// BCa bounds can exclude the observed value when nearly every replicate
/// falls on one side of it. Returns bounds that contain `observed` and
/// whether either bound moved.
fn contain(lower: f64, upper: f64, observed: f64) -> (f64, f64, bool) {
    let ci_lower = lower.min(observed);
    let ci_upper = upper.max(observed);
    (ci_lower, ci_upper, ci_lower != lower || ci_upper != upper)
}

/// Defined replicate statistics, in replicate order.
fn resample_statistics(
    view: &SeriesView<'_>,
    kind: EffectSizeKind,
    resamples: usize,
    seed: u64,
) -> Vec<f64> {
    #[cfg(feature = "parallel")]
    let replicates = resample_parallel(view, kind, resamples, seed);

    #[cfg(not(feature = "parallel"))]
    let replicates = resample_serial(view, kind, resamples, seed);

    replicates.into_iter().flatten().collect()
}

#[cfg(feature = "parallel")]
fn resample_parallel(
    view: &SeriesView<'_>,
    kind: EffectSizeKind,
    resamples: usize,
    seed: u64,
) -> Vec<Option<f64>> {
    let n = view.len();
    let has_raw = view.raw.is_some();
    (0..resamples)
        .into_par_iter()
        .map_init(
            || ResampleBuffers::new(n, has_raw),
            |buffers, i| {
                let mut rng = Xoshiro256PlusPlus::seed_from_u64(counter_rng_seed(seed, i as u64));
                buffers.draw(view, &mut rng);
                statistic(kind, &buffers.view())
            },
        )
        .collect()
}

#[cfg(any(not(feature = "parallel"), test))]
fn resample_serial(
    view: &SeriesView<'_>,
    kind: EffectSizeKind,
    resamples: usize,
    seed: u64,
) -> Vec<Option<f64>> {
    let mut buffers = ResampleBuffers::new(view.len(), view.raw.is_some());
    (0..resamples)
        .map(|i| {
            let mut rng = Xoshiro256PlusPlus::seed_from_u64(counter_rng_seed(seed, i as u64));
            buffers.draw(view, &mut rng);
            statistic(kind, &buffers.view())
        })
        .collect()
}

/// Leave-one-subject-out statistics.
///
/// Any undefined jackknife value is kept as NaN, which makes the
/// acceleration fall back to zero.
fn jackknife_statistics(view: &SeriesView<'_>, kind: EffectSizeKind) -> Vec<f64> {
    let n = view.len();
    if n < MIN_SERIES_LEN {
        return Vec::new();
    }

    let mut buffers = ResampleBuffers::new(n - 1, view.raw.is_some());
    (0..n)
        .map(|i| {
            buffers.leave_one_out(view, i);
            statistic(kind, &buffers.view()).unwrap_or(f64::NAN)
        })
        .collect()
}
