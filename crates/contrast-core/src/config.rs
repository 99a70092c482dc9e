//! Bootstrap configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CONFIDENCE_LEVEL, DEFAULT_RESAMPLES, DEFAULT_SEED};
use crate::error::ContrastError;
use crate::types::EffectSizeKind;

/// Settings for one bootstrap run.
///
/// Builder methods do not validate; [`BootstrapConfig::validate`] is called
/// by the bootstrapper so that bad input surfaces as a [`ContrastError`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Number of bootstrap resamples (R). Default: 5,000.
    pub resamples: usize,

    /// Effect-size statistic. Default: Hedges' g.
    pub kind: EffectSizeKind,

    /// Confidence level c of the interval, strictly in (0, 1). Default: 0.95.
    pub confidence_level: f64,

    /// Resampling seed. Default: 42.
    ///
    /// Replicate `i` draws from its own generator seeded with
    /// `counter_rng_seed(seed, i)`.
    pub seed: u64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            resamples: DEFAULT_RESAMPLES,
            kind: EffectSizeKind::default(),
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            seed: DEFAULT_SEED,
        }
    }
}

impl BootstrapConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of resamples.
    pub fn resamples(mut self, resamples: usize) -> Self {
        self.resamples = resamples;
        self
    }

    /// Set the effect-size kind.
    pub fn kind(mut self, kind: EffectSizeKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the confidence level.
    pub fn confidence_level(mut self, level: f64) -> Self {
        self.confidence_level = level;
        self
    }

    /// Set the resampling seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Two-sided tail probability α = 1 − c.
    pub fn alpha(&self) -> f64 {
        1.0 - self.confidence_level
    }

    /// Check that the configuration can drive a bootstrap.
    pub fn validate(&self) -> Result<(), ContrastError> {
        // NaN fails both comparisons
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(ContrastError::InvalidConfidenceLevel {
                level: self.confidence_level,
            });
        }
        if self.resamples == 0 {
            return Err(ContrastError::InvalidResampleCount {
                resamples: self.resamples,
            });
        }
        Ok(())
    }
}
