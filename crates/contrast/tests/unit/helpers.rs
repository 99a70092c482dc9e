//! Shared fixtures.

use std::path::PathBuf;

use contrast::data::load_wide_csv;
use contrast::Dataset;

/// Path of the attitude fixture: 20 subjects, 3 drinks x 3 imagery conditions.
///
/// Subject 5 lacks `wine_negative`, subject 13 lacks `water_negative`.
pub fn attitude_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/attitude.csv")
}

pub fn attitude() -> Dataset {
    load_wide_csv(&attitude_path()).expect("fixture should load")
}
