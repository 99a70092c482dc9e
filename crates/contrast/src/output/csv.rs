//! CSV export of the summary table and condition descriptives.

use std::io::{self, Write};

use contrast_core::SummaryTable;

use crate::data::escape_field;
use crate::describe::ConditionSummary;

/// Write one row per comparison, in table order.
///
/// Labels holding commas or quotes are quoted.
pub fn write_summary_csv<W: Write>(table: &SummaryTable, mut writer: W) -> io::Result<()> {
    writeln!(
        writer,
        "comparison,kind,n,estimate,bias,std_error,ci_lower,ci_upper,confidence_level,\
         statistic,df,p_value"
    )?;
    for row in table {
        let e = &row.estimate;
        writeln!(
            writer,
            "{},{},{},{},{},{},{},{},{},{},{},{}",
            escape_field(&row.label),
            e.kind.name(),
            e.n,
            e.point_estimate,
            e.bias,
            e.std_error,
            e.ci_lower,
            e.ci_upper,
            e.confidence_level,
            row.test.statistic,
            row.test.df,
            row.test.p_value
        )?;
    }
    writer.flush()
}

/// Write one row per condition. Undefined spreads are left empty.
pub fn write_conditions_csv<W: Write>(
    conditions: &[ConditionSummary],
    mut writer: W,
) -> io::Result<()> {
    writeln!(writer, "condition,n,mean,median,sd,se,ci_lower,ci_upper")?;
    for c in conditions {
        let (lo, hi) = c.ci.map_or((None, None), |(lo, hi)| (Some(lo), Some(hi)));
        writeln!(
            writer,
            "{},{},{},{},{},{},{},{}",
            escape_field(c.condition.as_str()),
            c.n,
            c.mean,
            c.median,
            cell(c.sd),
            cell(c.se),
            cell(lo),
            cell(hi)
        )?;
    }
    writer.flush()
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
