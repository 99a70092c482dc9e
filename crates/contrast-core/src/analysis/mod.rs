//! Effect-size estimation for paired comparisons.
//!
//! 1. **Effect sizes** ([`effect`]): Hedges' g, Cohen's d and Pearson's r on a paired series
//! 2. **BCa constants** ([`bca`]): bias correction and jackknife acceleration
//! 3. **Bootstrapper** ([`bootstrap`]): resampling loop producing an [`EffectSizeEstimate`](crate::EffectSizeEstimate)

pub mod bca;
pub mod bootstrap;
pub mod effect;

pub use bca::BcaConstants;
pub use bootstrap::{bootstrap_all, bootstrap_effect_size};
pub use effect::{effect_size, hedges_correction};
