//! Tests for configuration and argument parsing.

use contrast::{Analysis, AnalysisError, Comparison, Config, ContrastError, EffectSizeKind, PAdjust};

use crate::helpers::attitude;

#[test]
fn presets_only_change_resamples() {
    let quick = Config::quick();
    let thorough = Config::thorough();
    assert!(quick.bootstrap.resamples < Config::balanced().bootstrap.resamples);
    assert!(thorough.bootstrap.resamples > Config::balanced().bootstrap.resamples);
    assert_eq!(quick.bootstrap.kind, thorough.bootstrap.kind);
    assert_eq!(quick.bootstrap.seed, thorough.bootstrap.seed);
    assert_eq!(quick.p_adjust, thorough.p_adjust);
}

#[test]
fn effect_size_kind_parses_aliases() {
    assert_eq!("g".parse::<EffectSizeKind>(), Ok(EffectSizeKind::HedgesG));
    assert_eq!("Cohens_D".parse::<EffectSizeKind>(), Ok(EffectSizeKind::CohensD));
    assert_eq!("pearson".parse::<EffectSizeKind>(), Ok(EffectSizeKind::PearsonR));
    assert!("eta_squared".parse::<EffectSizeKind>().is_err());
}

#[test]
fn comparison_parses_with_and_without_label() {
    let labelled: Comparison = "beer=beer_positive:water_positive".parse().unwrap();
    assert_eq!(labelled.label, "beer");

    let unlabelled: Comparison = "beer_positive:water_positive".parse().unwrap();
    assert_eq!(unlabelled.label, "beer_positive_vs_water_positive");
    assert_eq!(
        unlabelled.to_string(),
        "beer_positive_vs_water_positive = beer_positive - water_positive"
    );
}

#[test]
fn p_adjust_defaults_to_holm() {
    assert_eq!(Config::default().p_adjust, PAdjust::Holm);
    assert_eq!("none".parse::<PAdjust>(), Ok(PAdjust::None));
}

#[test]
fn invalid_confidence_level_fails_before_any_work() {
    for level in [0.0, 1.0, 1.5, -0.2, f64::NAN] {
        let result = Analysis::quick()
            .comparison("beer", "beer_positive", "water_positive")
            .confidence_level(level)
            .run(&attitude());
        assert!(
            matches!(
                result,
                Err(AnalysisError::Contrast(ContrastError::InvalidConfidenceLevel { .. }))
            ),
            "level {} should be rejected",
            level
        );
    }
}

#[test]
fn zero_resamples_rejected() {
    let result = Analysis::new()
        .comparison("beer", "beer_positive", "water_positive")
        .resamples(0)
        .run(&attitude());
    assert!(matches!(
        result,
        Err(AnalysisError::Contrast(ContrastError::InvalidResampleCount { .. }))
    ));
}
