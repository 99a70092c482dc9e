//! Summary aggregation: join effect sizes with hypothesis tests by label.

use std::collections::{BTreeMap, HashSet};

use crate::error::{ContrastError, MissingPart};
use crate::result::{EffectSizeEstimate, SummaryRow, SummaryTable, TestRow};

/// Join estimates and test rows into a [`SummaryTable`] ordered like `order`.
///
/// Every requested label must have exactly one estimate and one test row,
/// and neither mapping may carry a label that was not requested. On any
/// mismatch the whole call fails; no partial table is produced.
///
/// # Errors
///
/// - [`ContrastError::DuplicateComparison`] if `order` repeats a label
/// - [`ContrastError::MissingComparison`] on any label mismatch
pub fn aggregate<S: AsRef<str>>(
    order: &[S],
    mut estimates: BTreeMap<String, EffectSizeEstimate>,
    mut tests: BTreeMap<String, TestRow>,
) -> Result<SummaryTable, ContrastError> {
    let mut requested = HashSet::with_capacity(order.len());
    for label in order {
        if !requested.insert(label.as_ref()) {
            return Err(ContrastError::DuplicateComparison {
                label: label.as_ref().to_string(),
            });
        }
    }

    let unrequested = estimates
        .keys()
        .chain(tests.keys())
        .find(|label| !requested.contains(label.as_str()));
    if let Some(label) = unrequested {
        return Err(ContrastError::MissingComparison {
            label: label.clone(),
            missing: MissingPart::Request,
        });
    }

    let rows = order
        .iter()
        .map(|label| {
            let label = label.as_ref();
            let missing = |part| ContrastError::MissingComparison {
                label: label.to_string(),
                missing: part,
            };
            let estimate = estimates
                .remove(label)
                .ok_or_else(|| missing(MissingPart::Estimate))?;
            let test = tests
                .remove(label)
                .ok_or_else(|| missing(MissingPart::TestRow))?;
            Ok(SummaryRow {
                label: label.to_string(),
                estimate,
                test,
            })
        })
        .collect::<Result<Vec<_>, ContrastError>>()?;

    Ok(SummaryTable::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::BcaConstants;
    use crate::types::EffectSizeKind;

    fn estimate(label: &str) -> EffectSizeEstimate {
        EffectSizeEstimate {
            label: label.to_string(),
            kind: EffectSizeKind::CohensD,
            point_estimate: 1.0,
            bias: 0.0,
            std_error: 0.1,
            ci_lower: 0.8,
            ci_upper: 1.2,
            widened: false,
            confidence_level: 0.95,
            n: 10,
            resamples: 100,
            degenerate_resamples: 0,
            bca: BcaConstants {
                z0: 0.0,
                acceleration: 0.0,
            },
        }
    }

    fn test_row(p: f64) -> TestRow {
        TestRow {
            statistic: 3.0,
            df: 9.0,
            p_value: p,
        }
    }

    fn estimates(labels: &[&str]) -> BTreeMap<String, EffectSizeEstimate> {
        labels
            .iter()
            .map(|l| (l.to_string(), estimate(l)))
            .collect()
    }

    #[test]
    fn test_rows_follow_request_order() {
        let order = ["C_vs_D", "A_vs_B"];
        let tests = BTreeMap::from([
            ("A_vs_B".to_string(), test_row(0.01)),
            ("C_vs_D".to_string(), test_row(0.20)),
        ]);
        let table = aggregate(&order, estimates(&["A_vs_B", "C_vs_D"]), tests).unwrap();

        let labels: Vec<&str> = table.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["C_vs_D", "A_vs_B"]);
        assert_eq!(table.get("A_vs_B").unwrap().test.p_value, 0.01);
    }

    #[test]
    fn test_missing_test_row_fails() {
        let order = ["A_vs_B", "C_vs_D"];
        let tests = BTreeMap::from([("A_vs_B".to_string(), test_row(0.01))]);
        assert_eq!(
            aggregate(&order, estimates(&["A_vs_B", "C_vs_D"]), tests),
            Err(ContrastError::MissingComparison {
                label: "C_vs_D".to_string(),
                missing: MissingPart::TestRow,
            })
        );
    }

    #[test]
    fn test_missing_estimate_fails() {
        let order = ["A_vs_B", "C_vs_D"];
        let tests = BTreeMap::from([
            ("A_vs_B".to_string(), test_row(0.01)),
            ("C_vs_D".to_string(), test_row(0.02)),
        ]);
        assert_eq!(
            aggregate(&order, estimates(&["A_vs_B"]), tests),
            Err(ContrastError::MissingComparison {
                label: "C_vs_D".to_string(),
                missing: MissingPart::Estimate,
            })
        );
    }

    #[test]
    fn test_unrequested_label_fails() {
        let order = ["A_vs_B"];
        let tests = BTreeMap::from([("A_vs_B".to_string(), test_row(0.01))]);
        assert_eq!(
            aggregate(&order, estimates(&["A_vs_B", "E_vs_F"]), tests),
            Err(ContrastError::MissingComparison {
                label: "E_vs_F".to_string(),
                missing: MissingPart::Request,
            })
        );
    }

    #[test]
    fn test_duplicate_request_fails() {
        let order = ["A_vs_B", "A_vs_B"];
        let tests = BTreeMap::from([("A_vs_B".to_string(), test_row(0.01))]);
        assert!(matches!(
            aggregate(&order, estimates(&["A_vs_B"]), tests),
            Err(ContrastError::DuplicateComparison { .. })
        ));
    }

    #[test]
    fn test_empty_request() {
        let order: [&str; 0] = [];
        let table = aggregate(&order, BTreeMap::new(), BTreeMap::new()).unwrap();
        assert!(table.is_empty());
    }
}
