//! Rendering and export of a real report.

use std::fs;

use contrast::output::{
    format_report, format_summary_table, to_json, write_conditions_csv, write_summary_csv,
};
use contrast::{Analysis, Report};

use crate::helpers::attitude;

fn report() -> Report {
    Analysis::quick()
        .comparison("beer_vs_water_positive", "beer_positive", "water_positive")
        .comparison("wine_vs_water_negative", "wine_negative", "water_negative")
        .run(&attitude())
        .unwrap()
}

#[test]
fn terminal_report_lists_every_comparison() {
    let text = format_report(&report());
    assert!(text.contains("beer_vs_water_positive"));
    assert!(text.contains("wine_vs_water_negative"));
    assert!(text.contains("Hedges' g"));
    assert!(text.contains("holm adjustment"));
    assert!(text.contains("Marginal Means"));
}

#[test]
fn summary_table_has_one_line_per_row() {
    let report = report();
    let text = format_summary_table(&report.summary);
    assert_eq!(text.lines().count(), report.summary.len() + 1);
}

#[test]
fn json_carries_summary_in_order() {
    let value: serde_json::Value = serde_json::from_str(&to_json(&report()).unwrap()).unwrap();
    let rows = value["summary"].as_array().unwrap();
    assert_eq!(rows[0]["label"], "beer_vs_water_positive");
    assert_eq!(rows[1]["label"], "wine_vs_water_negative");
    assert_eq!(rows[1]["estimate"]["n"], 18);
    assert_eq!(value["config"]["bootstrap"]["kind"], "hedges_g");
}

#[test]
fn csv_exports_to_files() {
    let report = report();
    let dir = tempfile::tempdir().unwrap();

    let summary_path = dir.path().join("summary.csv");
    write_summary_csv(&report.summary, fs::File::create(&summary_path).unwrap()).unwrap();
    let summary = fs::read_to_string(&summary_path).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[2].starts_with("wine_vs_water_negative,hedges_g,18,"));

    let conditions_path = dir.path().join("conditions.csv");
    write_conditions_csv(&report.conditions, fs::File::create(&conditions_path).unwrap())
        .unwrap();
    let conditions = fs::read_to_string(&conditions_path).unwrap();
    assert_eq!(conditions.lines().count(), 10);
    assert!(conditions.contains("\nwater_negative,19,"));
}
