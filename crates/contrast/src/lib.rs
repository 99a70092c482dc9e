//! # contrast
//!
//! Paired-contrast analysis of repeated-measures ratings.
//!
//! Given a wide ratings table (one row per subject, one column per
//! condition), this crate:
//! - reshapes it into long format with an explicit record type per stage
//! - builds complete-case paired series for each requested contrast
//! - runs a paired t-test per contrast with multiple-comparison adjustment
//! - bootstraps a standardized effect size with a BCa interval
//! - joins everything into one ordered summary table for rendering or export
//!
//! The statistics live in [`contrast_core`]; this crate adds loading,
//! pairing, descriptive summaries, the hypothesis-test collaborator and
//! output.
//!
//! ## Quick Start
//!
//! ```ignore
//! use contrast::{data::load_wide_csv, Analysis, EffectSizeKind};
//! use std::path::Path;
//!
//! let dataset = load_wide_csv(Path::new("attitude.csv"))?;
//! let report = Analysis::new()
//!     .kind(EffectSizeKind::HedgesG)
//!     .comparison("beer_vs_water_positive", "beer_positive", "water_positive")
//!     .comparison("wine_vs_water_positive", "wine_positive", "water_positive")
//!     .run(&dataset)?;
//!
//! println!("{}", contrast::output::format_report(&report));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod analysis;
mod config;

// Functional modules
pub mod data;
pub mod describe;
pub mod output;
pub mod pairing;
pub mod testing;

// Re-exports for public API
pub use analysis::{Analysis, AnalysisError, Report};
pub use config::Config;
pub use data::{DataError, Dataset, LongRow, WideRow};
pub use describe::{ConditionSummary, LevelSummary};
pub use pairing::Comparison;
pub use testing::{HypothesisTest, PAdjust, PairedTTest};

// Re-export the statistics core for convenience
pub use contrast_core::{
    BootstrapConfig, Condition, ContrastError, EffectSizeEstimate, EffectSizeKind, PairedSeries,
    SummaryRow, SummaryTable, TestRow,
};
