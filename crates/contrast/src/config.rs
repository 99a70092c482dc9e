//! Configuration for a contrast analysis.

use serde::{Deserialize, Serialize};

use contrast_core::{BootstrapConfig, ContrastError, EffectSizeKind};

use crate::testing::PAdjust;

/// Configuration options for [`Analysis`](crate::Analysis).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    // =========================================================================
    // Effect sizes
    // =========================================================================
    /// Bootstrap settings: resample count, effect-size kind, confidence
    /// level and seed.
    ///
    /// Default: 5,000 resamples of Hedges' g at 95%, seed 42.
    pub bootstrap: BootstrapConfig,

    // =========================================================================
    // Hypothesis tests
    // =========================================================================
    /// Multiple-comparison adjustment applied across all contrasts.
    ///
    /// Default: Holm.
    pub p_adjust: PAdjust,

    // =========================================================================
    // Conditions
    // =========================================================================
    /// Separator between factor levels in condition labels
    /// (`beer_positive` -> `beer`, `positive`).
    ///
    /// Default: `_`.
    pub factor_separator: char,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bootstrap: BootstrapConfig::default(),
            p_adjust: PAdjust::default(),
            factor_separator: '_',
        }
    }
}

impl Config {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Quick configuration for exploration: 1,000 resamples.
    pub fn quick() -> Self {
        Self {
            bootstrap: BootstrapConfig::default().resamples(1_000),
            ..Default::default()
        }
    }

    /// Balanced configuration: 5,000 resamples (same as the default).
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Thorough configuration for reporting: 20,000 resamples.
    pub fn thorough() -> Self {
        Self {
            bootstrap: BootstrapConfig::default().resamples(20_000),
            ..Default::default()
        }
    }

    /// Look up a preset by name (`quick`, `balanced`, `thorough`).
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "quick" => Some(Self::quick()),
            "balanced" => Some(Self::balanced()),
            "thorough" => Some(Self::thorough()),
            _ => None,
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Set the number of bootstrap resamples.
    pub fn resamples(mut self, resamples: usize) -> Self {
        self.bootstrap.resamples = resamples;
        self
    }

    /// Set the effect-size kind.
    pub fn kind(mut self, kind: EffectSizeKind) -> Self {
        self.bootstrap.kind = kind;
        self
    }

    /// Set the confidence level.
    pub fn confidence_level(mut self, level: f64) -> Self {
        self.bootstrap.confidence_level = level;
        self
    }

    /// Set the resampling seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.bootstrap.seed = seed;
        self
    }

    /// Set the multiple-comparison adjustment.
    pub fn p_adjust(mut self, adjust: PAdjust) -> Self {
        self.p_adjust = adjust;
        self
    }

    /// Set the factor separator.
    pub fn factor_separator(mut self, separator: char) -> Self {
        self.factor_separator = separator;
        self
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), ContrastError> {
        self.bootstrap.validate()
    }
}
