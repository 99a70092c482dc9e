//! End-to-end runs on the attitude fixture.

use std::fs;

use contrast::data::{parse_wide_csv, write_long_csv};
use contrast::pairing::paired_series;
use contrast::{
    Analysis, AnalysisError, Comparison, ContrastError, DataError, Dataset, EffectSizeKind,
    HypothesisTest, PAdjust, PairedSeries, TestRow, WideRow,
};

use crate::helpers::attitude;

fn attitude_analysis() -> Analysis {
    Analysis::quick()
        .comparison("beer_vs_water_positive", "beer_positive", "water_positive")
        .comparison("wine_vs_water_negative", "wine_negative", "water_negative")
        .comparison("wine_vs_water_positive", "wine_positive", "water_positive")
}

#[test]
fn fixture_loads() {
    let dataset = attitude();
    assert_eq!(dataset.len(), 20);
    assert_eq!(dataset.conditions().len(), 9);
    assert_eq!(dataset.subject_column(), "participant");
    assert_eq!(dataset.complete_cases().len(), 18);
}

#[test]
fn summary_follows_request_order_and_drops_incomplete_pairs() {
    let report = attitude_analysis().run(&attitude()).unwrap();

    let labels: Vec<&str> = report.summary.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "beer_vs_water_positive",
            "wine_vs_water_negative",
            "wine_vs_water_positive"
        ]
    );

    // Subjects 5 and 13 each miss one side of the negative contrast only
    assert_eq!(report.summary.rows()[0].estimate.n, 20);
    assert_eq!(report.summary.rows()[1].estimate.n, 18);
    assert_eq!(report.summary.rows()[2].estimate.n, 20);
    assert_eq!(report.summary.rows()[1].test.df, 17.0);

    for row in &report.summary {
        let e = &row.estimate;
        assert!(e.ci_lower <= e.point_estimate && e.point_estimate <= e.ci_upper);
        assert!(row.test.p_value > 0.0 && row.test.p_value <= 1.0);
    }
}

#[test]
fn conditions_and_levels_are_described() {
    let report = attitude_analysis().run(&attitude()).unwrap();
    assert_eq!(report.conditions.len(), 9);

    let wine_negative = report
        .conditions
        .iter()
        .find(|c| c.condition.as_str() == "wine_negative")
        .unwrap();
    assert_eq!(wine_negative.n, 19);

    // 3 drinks + 3 imagery levels
    assert_eq!(report.levels.len(), 6);
    assert!(report.levels.iter().any(|l| l.factor == 1 && l.level == "neutral"));
}

#[test]
fn same_seed_reproduces_report() {
    let dataset = attitude();
    let a = attitude_analysis().seed(2024).run(&dataset).unwrap();
    let b = attitude_analysis().seed(2024).run(&dataset).unwrap();
    assert_eq!(a, b);

    let c = attitude_analysis().seed(2025).run(&dataset).unwrap();
    let (ra, rc) = (&a.summary.rows()[0], &c.summary.rows()[0]);
    assert_eq!(ra.estimate.point_estimate, rc.estimate.point_estimate);
    assert_eq!(ra.test, rc.test);
}

#[test]
fn adjustment_never_lowers_p_values() {
    let dataset = attitude();
    let raw = attitude_analysis()
        .p_adjust(PAdjust::None)
        .run(&dataset)
        .unwrap();
    let holm = attitude_analysis()
        .p_adjust(PAdjust::Holm)
        .run(&dataset)
        .unwrap();
    for (r, h) in raw.summary.iter().zip(&holm.summary) {
        assert!(h.test.p_value >= r.test.p_value);
        assert_eq!(h.test.statistic, r.test.statistic);
    }
}

#[test]
fn pearson_uses_raw_condition_vectors() {
    let report = attitude_analysis()
        .kind(EffectSizeKind::PearsonR)
        .run(&attitude())
        .unwrap();
    for row in &report.summary {
        assert!((-1.0..=1.0).contains(&row.estimate.point_estimate));
        assert!(row.estimate.ci_lower >= -1.0 && row.estimate.ci_upper <= 1.0);
    }
}

#[test]
fn hedges_g_is_corrected_cohens_d_on_paired_ratings() {
    let dataset = attitude();
    let g = attitude_analysis().run(&dataset).unwrap();
    let d = attitude_analysis()
        .kind(EffectSizeKind::CohensD)
        .run(&dataset)
        .unwrap();

    for (g, d) in g.summary.iter().zip(&d.summary) {
        let n = g.estimate.n as f64;
        let correction = 1.0 - 3.0 / (4.0 * (n - 1.0) - 1.0);
        assert!(
            (g.estimate.point_estimate - correction * d.estimate.point_estimate).abs() < 1e-12,
            "{}: g = {}, d = {}",
            g.label,
            g.estimate.point_estimate,
            d.estimate.point_estimate
        );
    }
}

#[test]
fn hedges_g_converges_to_cohens_d_for_many_subjects() {
    // Large between-subject spread, small within-subject shift
    let rows = (0..4_000)
        .map(|i| {
            let x = i as f64;
            let base = 50.0 + 10.0 * (x * 0.37).sin();
            let shift = 0.4 + (x * 1.913).cos();
            WideRow {
                subject: i.to_string(),
                ratings: vec![Some(base + shift), Some(base)],
            }
        })
        .collect();
    let dataset = Dataset::new("id", vec!["after".into(), "before".into()], rows).unwrap();

    let analysis = Analysis::quick()
        .comparison("after_vs_before", "after", "before")
        .resamples(200);
    let g = analysis.run(&dataset).unwrap();
    let d = analysis.kind(EffectSizeKind::CohensD).run(&dataset).unwrap();

    let g = g.summary.rows()[0].estimate.point_estimate;
    let d = d.summary.rows()[0].estimate.point_estimate;
    assert!(d > 0.3, "d = {}", d);
    assert!((g - d).abs() < 1e-3, "g = {}, d = {}", g, d);
}

#[test]
fn unknown_condition_is_reported() {
    let result = Analysis::quick()
        .comparison("juice", "juice_positive", "water_positive")
        .run(&attitude());
    match result {
        Err(AnalysisError::Data(DataError::UnknownCondition {
            condition,
            available,
        })) => {
            assert_eq!(condition.as_str(), "juice_positive");
            assert_eq!(available.len(), 9);
        }
        other => panic!("expected UnknownCondition, got {:?}", other),
    }
}

#[test]
fn too_few_pairs_fail_the_run() {
    let input = "id,a,b\n1,3,1\n2,NA,4\n";
    let dataset = parse_wide_csv(input.as_bytes()).unwrap();
    let result = Analysis::quick().comparison("a_vs_b", "a", "b").run(&dataset);
    assert!(matches!(
        result,
        Err(AnalysisError::Contrast(ContrastError::InsufficientSample { got: 1, .. }))
    ));
}

/// Reports the sign of the mean difference and a fixed p-value.
struct SignOnly;

impl HypothesisTest for SignOnly {
    fn name(&self) -> &str {
        "sign only"
    }

    fn test(&self, series: &PairedSeries) -> Result<TestRow, ContrastError> {
        let sum: f64 = series.differences().iter().sum();
        Ok(TestRow {
            statistic: sum.signum(),
            df: (series.len() - 1) as f64,
            p_value: 0.5,
        })
    }
}

#[test]
fn custom_hypothesis_test_supplies_rows() {
    let report = attitude_analysis()
        .p_adjust(PAdjust::None)
        .run_with(&attitude(), &SignOnly)
        .unwrap();
    assert_eq!(report.test, "sign only");
    for row in &report.summary {
        assert_eq!(row.test.p_value, 0.5);
        assert_eq!(row.test.statistic.abs(), 1.0);
    }
}

#[test]
fn pairing_matches_manual_differences() {
    let dataset = attitude();
    let long = dataset.to_long();
    let series = paired_series(
        &long,
        &Comparison::between("beer_positive", "water_positive"),
    )
    .unwrap();

    assert_eq!(series.len(), 20);
    // Subject 1: 8 - 16
    assert_eq!(series.subjects()[0], "1");
    assert_eq!(series.differences()[0], -8.0);
}

#[test]
fn long_csv_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("long.csv");

    let long = attitude().to_long();
    write_long_csv(&long, fs::File::create(&path).unwrap()).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    // 20 subjects x 9 conditions, two missing, plus header
    assert_eq!(lines.len(), 20 * 9 - 2 + 1);
    assert_eq!(lines[1], "1,beer_positive,8");
}
