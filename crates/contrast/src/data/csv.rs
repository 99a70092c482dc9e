//! CSV parsing and writing for ratings tables.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use contrast_core::Condition;

use super::{DataError, Dataset, LongRow, WideRow};

/// Load a wide-format ratings table from a CSV file.
///
/// The first column holds subject ids; every other column is a condition.
///
/// # Example file content
/// ```csv
/// participant,beer_positive,beer_negative,water_positive
/// 1,1,6,5
/// 2,43,30,NA
/// ```
///
/// # Errors
/// Returns `DataError` if the file cannot be read or parsed.
pub fn load_wide_csv(path: &Path) -> Result<Dataset, DataError> {
    let file = File::open(path)?;
    let dataset = parse_wide_csv(BufReader::new(file))?;
    tracing::debug!(
        path = %path.display(),
        subjects = dataset.len(),
        conditions = dataset.conditions().len(),
        "loaded ratings table"
    );
    Ok(dataset)
}

/// Parse a wide-format ratings table from any buffered reader.
pub fn parse_wide_csv<R: BufRead>(reader: R) -> Result<Dataset, DataError> {
    let mut lines = reader.lines().enumerate();

    let mut header = None;
    for (line_num, line_result) in lines.by_ref() {
        let line = line_result?;
        if let Some(fields) = split_fields(&line) {
            header = Some(parse_header(&fields, line_num + 1)?);
            break;
        }
    }
    let (subject_column, conditions) = header.ok_or_else(|| DataError::Parse {
        line: 1,
        message: "Missing header line".to_string(),
    })?;

    let mut rows = Vec::new();
    for (line_num, line_result) in lines {
        let line = line_result?;
        let Some(fields) = split_fields(&line) else {
            continue;
        };

        if fields.len() != conditions.len() + 1 {
            return Err(DataError::Parse {
                line: line_num + 1,
                message: format!(
                    "Expected {} columns, got {}",
                    conditions.len() + 1,
                    fields.len()
                ),
            });
        }

        let subject = fields[0];
        if subject.is_empty() {
            return Err(DataError::Parse {
                line: line_num + 1,
                message: "Missing subject id".to_string(),
            });
        }

        let ratings = fields[1..]
            .iter()
            .zip(&conditions)
            .map(|(value, condition)| parse_rating(value, condition, line_num + 1))
            .collect::<Result<Vec<_>, _>>()?;

        rows.push(WideRow {
            subject: subject.to_string(),
            ratings,
        });
    }

    Dataset::new(subject_column, conditions, rows)
}

/// Write long-format rows as `subject,condition,rating`.
pub fn write_long_csv<W: Write>(rows: &[LongRow], mut writer: W) -> std::io::Result<()> {
    writeln!(writer, "subject,condition,rating")?;
    for row in rows {
        writeln!(
            writer,
            "{},{},{}",
            escape_field(&row.subject),
            escape_field(row.condition.as_str()),
            row.rating
        )?;
    }
    writer.flush()
}

/// Quote a field that holds a comma, quote or line break, doubling inner
/// quotes.
pub(crate) fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Trimmed fields of a data line, or `None` for blank lines and `#` comments.
fn split_fields(line: &str) -> Option<Vec<&str>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    Some(line.split(',').map(str::trim).collect())
}

fn parse_header(fields: &[&str], line: usize) -> Result<(String, Vec<Condition>), DataError> {
    if fields.len() < 2 {
        return Err(DataError::Parse {
            line,
            message: format!(
                "Header needs a subject column and at least one condition, got {} columns",
                fields.len()
            ),
        });
    }
    if let Some(pos) = fields.iter().position(|f| f.is_empty()) {
        return Err(DataError::Parse {
            line,
            message: format!("Empty column name at position {}", pos + 1),
        });
    }

    let conditions = fields[1..].iter().map(|&f| Condition::new(f)).collect();
    Ok((fields[0].to_string(), conditions))
}

fn parse_rating(value: &str, condition: &Condition, line: usize) -> Result<Option<f64>, DataError> {
    if is_missing(value) {
        return Ok(None);
    }
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(DataError::InvalidValue {
            line,
            column: condition.to_string(),
            value: value.to_string(),
        }),
    }
}

fn is_missing(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case("na") || value.eq_ignore_ascii_case("nan")
}
