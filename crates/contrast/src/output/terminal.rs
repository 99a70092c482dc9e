//! Terminal output formatting with colors and box drawing.

use colored::Colorize;

use contrast_core::{EffectSizeKind, SummaryRow, SummaryTable};

use crate::describe::{ConditionSummary, LevelSummary};
use crate::Report;

/// Format a [`Report`] for human-readable terminal output.
///
/// Comparisons whose interval excludes zero are highlighted; the rest are
/// dimmed.
pub fn format_report(report: &Report) -> String {
    let mut output = String::new();
    let bootstrap = &report.config.bootstrap;

    output.push_str(&format_box_top());
    output.push_str(&format_box_line(&"Paired Contrasts".bold().to_string()));
    output.push_str(&format_box_line(&format!(
        "{}, {:.0}% BCa interval, {} resamples, seed {}",
        bootstrap.kind,
        bootstrap.confidence_level * 100.0,
        bootstrap.resamples,
        bootstrap.seed
    )));
    output.push_str(&format_box_line(&format!(
        "{}, {} adjustment",
        report.test, report.config.p_adjust
    )));
    output.push_str(&format_box_separator());

    for row in &report.summary {
        for line in format_row(row) {
            output.push_str(&format_box_line(&line));
        }
    }

    if !report.conditions.is_empty() {
        output.push_str(&format_box_separator());
        output.push_str(&format_box_line(&"Conditions:".bold().to_string()));
        for summary in &report.conditions {
            output.push_str(&format_box_line(&format_condition(summary)));
        }
    }

    if !report.levels.is_empty() {
        output.push_str(&format_box_separator());
        output.push_str(&format_box_line(&"Marginal Means:".bold().to_string()));
        for level in &report.levels {
            output.push_str(&format_box_line(&format_level(level)));
        }
    }

    output.push_str(&format_box_bottom());
    output
}

/// Format only the summary table, one plain line per comparison.
pub fn format_summary_table(table: &SummaryTable) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{:<24} {:>8} {:>18} {:>8} {:>6} {:>8}\n",
        "comparison", "effect", "interval", "t", "df", "p"
    ));
    for row in table {
        let e = &row.estimate;
        output.push_str(&format!(
            "{:<24} {:>8.3} {:>18} {:>8.3} {:>6.0} {:>8}\n",
            row.label,
            e.point_estimate,
            format!("[{:.3}, {:.3}]", e.ci_lower, e.ci_upper),
            row.test.statistic,
            row.test.df,
            format_p(row.test.p_value),
        ));
    }
    output
}

fn format_row(row: &SummaryRow) -> Vec<String> {
    let e = &row.estimate;
    let effect = format!(
        "  {} = {:.2}  {:.0}% CI [{:.2}, {:.2}]  n = {}",
        symbol(e.kind),
        e.point_estimate,
        e.confidence_level * 100.0,
        e.ci_lower,
        e.ci_upper,
        e.n
    );
    let effect = if e.excludes_zero() {
        effect.green().to_string()
    } else {
        effect.dimmed().to_string()
    };

    let mut lines = vec![
        row.label.bold().to_string(),
        effect,
        format!(
            "  t({:.0}) = {:.2}, p {}",
            row.test.df,
            row.test.statistic,
            format_p(row.test.p_value)
        ),
    ];
    if e.degenerate_resamples > 0 {
        lines.push(
            format!("  {} resamples had no defined statistic", e.degenerate_resamples)
                .yellow()
                .to_string(),
        );
    }
    if e.widened {
        lines.push(
            "  interval extended to include the estimate"
                .yellow()
                .to_string(),
        );
    }
    lines
}

fn format_condition(summary: &ConditionSummary) -> String {
    let spread = match (summary.sd, summary.ci) {
        (Some(sd), Some((lo, hi))) => format!("SD {:.2}, 95% CI [{:.2}, {:.2}]", sd, lo, hi),
        _ => "SD n/a".to_string(),
    };
    format!(
        "  {}: M = {:.2}, Mdn = {:.2}, {} (n = {})",
        summary.condition, summary.mean, summary.median, spread, summary.n
    )
}

fn format_level(level: &LevelSummary) -> String {
    let sd = level
        .sd
        .map_or_else(|| "n/a".to_string(), |sd| format!("{:.2}", sd));
    format!(
        "  {} (factor {}): M = {:.2}, SD = {} (n = {})",
        level.level,
        level.factor + 1,
        level.mean,
        sd,
        level.n
    )
}

fn symbol(kind: EffectSizeKind) -> &'static str {
    match kind {
        EffectSizeKind::HedgesG => "g",
        EffectSizeKind::CohensD => "d",
        EffectSizeKind::PearsonR => "r",
    }
}

fn format_p(p: f64) -> String {
    if p < 0.001 {
        "< .001".to_string()
    } else {
        format!("= {:.3}", p)
    }
}

// Box drawing helpers

const BOX_WIDTH: usize = 80;

fn format_box_top() -> String {
    format!("\u{250C}{}\u{2510}\n", "\u{2500}".repeat(BOX_WIDTH))
}

fn format_box_bottom() -> String {
    format!("\u{2514}{}\u{2518}\n", "\u{2500}".repeat(BOX_WIDTH))
}

fn format_box_separator() -> String {
    format!("\u{251C}{}\u{2524}\n", "\u{2500}".repeat(BOX_WIDTH))
}

fn format_box_line(content: &str) -> String {
    let visible_len = strip_ansi_codes(content).chars().count();
    let padding = (BOX_WIDTH - 2).saturating_sub(visible_len);
    format!("\u{2502} {}{} \u{2502}\n", content, " ".repeat(padding))
}

/// Strip ANSI escape codes for accurate length calculation.
fn strip_ansi_codes(s: &str) -> String {
    let mut result = String::new();
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip until 'm' (end of ANSI sequence)
            while let Some(&next) = chars.peek() {
                chars.next();
                if next == 'm' {
                    break;
                }
            }
        } else {
            result.push(c);
        }
    }
    result
}
