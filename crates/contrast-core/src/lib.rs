//! Core statistics for paired within-subject contrasts.
//!
//! This crate computes standardized effect sizes (Hedges' g, Cohen's d,
//! Pearson's r) for paired comparisons, attaches bias-corrected and
//! accelerated (BCa) bootstrap confidence intervals, and joins the results
//! with externally computed hypothesis tests into one ordered summary table.
//!
//! Everything here is a pure function of its inputs. Resampling is driven by
//! an explicit seed, so repeated calls reproduce identical intervals.
//!
//! # Features
//!
//! - `parallel`: Bootstrap comparisons and resamples on rayon. Counter-based
//!   seeding keeps results bit-identical to the serial path.
//!
//! # Usage
//!
//! This crate is typically used through the `contrast` crate, which handles
//! loading ratings, pairing subjects, running the paired t-tests and rendering
//! the summary. It can also be used directly:
//!
//! ```
//! use contrast_core::{bootstrap_effect_size, BootstrapConfig, EffectSizeKind, PairedSeries};
//!
//! let series = PairedSeries::from_differences("beer_vs_water", vec![2.0, 4.0, 6.0, 8.0, 10.0]);
//! let config = BootstrapConfig::new()
//!     .kind(EffectSizeKind::CohensD)
//!     .resamples(2_000)
//!     .seed(42);
//!
//! let estimate = bootstrap_effect_size(&series, &config).unwrap();
//! assert!(estimate.ci_lower <= estimate.point_estimate);
//! assert!(estimate.point_estimate <= estimate.ci_upper);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod constants;
pub mod error;
pub mod math;
pub mod result;
pub mod statistics;
pub mod summary;
pub mod types;

// Re-export commonly used items at crate root
pub use analysis::{bootstrap_all, bootstrap_effect_size, BcaConstants};
pub use config::BootstrapConfig;
pub use error::{ContrastError, MissingPart};
pub use result::{EffectSizeEstimate, SummaryRow, SummaryTable, TestRow};
pub use summary::aggregate;
pub use types::{Condition, EffectSizeKind, PairedSeries};
