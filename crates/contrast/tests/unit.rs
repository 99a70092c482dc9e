//! Fast integration tests for the analysis front end.
//!
//! These run the full pipeline on a small fixture table with few resamples.

#[path = "unit/config_validation.rs"]
mod config_validation;
#[path = "unit/helpers.rs"]
mod helpers;
#[path = "unit/output.rs"]
mod output;
#[path = "unit/pipeline.rs"]
mod pipeline;
