//! Output formatting for analysis reports.
//!
//! - Terminal: human-readable output with colors and box drawing
//! - JSON: machine-readable serialization of the whole [`Report`](crate::Report)
//! - CSV: the summary table and the condition descriptives, one row per entry

mod csv;
mod json;
mod terminal;

pub use csv::{write_conditions_csv, write_summary_csv};
pub use json::{to_json, to_json_pretty};
pub use terminal::{format_report, format_summary_table};
