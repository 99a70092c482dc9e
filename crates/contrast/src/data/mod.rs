//! Ratings tables and their reshaping.
//!
//! Each processing stage has its own record type:
//!
//! - [`WideRow`]: one subject of the raw file, one optional rating per condition
//! - [`Dataset`]: wide rows plus their condition columns; [`Dataset::select`],
//!   [`Dataset::rename`] and [`Dataset::complete_cases`] return new datasets
//! - [`LongRow`]: one `(subject, condition, rating)` observation
//!
//! # Supported Formats
//!
//! - **Wide CSV**: header `subject,<condition>,<condition>,...`, one row per
//!   subject. Empty cells, `NA` and `NaN` are missing ratings. Lines starting
//!   with `#` are comments. Quoted fields are not supported on input; the
//!   writers quote fields that contain commas or quotes.
//!
//! # Example
//!
//! ```ignore
//! use contrast::data::load_wide_csv;
//! use std::path::Path;
//!
//! let dataset = load_wide_csv(Path::new("attitude.csv"))?;
//! let long = dataset.select(&["beer_positive".into(), "water_positive".into()])?.to_long();
//! println!("{} observations", long.len());
//! ```

mod csv;

pub use csv::{load_wide_csv, parse_wide_csv, write_long_csv};
pub(crate) use csv::escape_field;

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use contrast_core::{Condition, ContrastError};

/// Errors that can occur while loading or reshaping ratings.
#[derive(Debug)]
pub enum DataError {
    /// IO error reading or writing a file.
    Io(std::io::Error),

    /// Malformed line.
    Parse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Description of the parse error.
        message: String,
    },

    /// A rating cell is neither a number nor a missing marker.
    InvalidValue {
        /// Line number where the invalid value was found (1-indexed).
        line: usize,
        /// Column header of the cell.
        column: String,
        /// The invalid value string.
        value: String,
    },

    /// The same condition column appears twice.
    DuplicateCondition {
        /// The repeated condition.
        condition: Condition,
    },

    /// The same subject appears in two rows.
    DuplicateSubject {
        /// The repeated subject id.
        subject: String,
    },

    /// A subject has two ratings for one condition in long-format data.
    DuplicateObservation {
        /// Subject id.
        subject: String,
        /// Condition rated twice.
        condition: Condition,
    },

    /// A condition was referenced that the dataset does not have.
    UnknownCondition {
        /// The condition that was asked for.
        condition: Condition,
        /// The conditions the dataset does have.
        available: Vec<Condition>,
    },

    /// A row's rating count differs from the number of conditions.
    RaggedRow {
        /// Subject id of the row.
        subject: String,
        /// Ratings in the row.
        got: usize,
        /// Number of conditions.
        expected: usize,
    },

    /// A paired series could not be assembled.
    Series(ContrastError),
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Io(e) => write!(f, "IO error: {}", e),
            DataError::Parse { line, message } => {
                write!(f, "Parse error at line {}: {}", line, message)
            }
            DataError::InvalidValue {
                line,
                column,
                value,
            } => write!(
                f,
                "Invalid rating at line {}, column '{}': '{}'",
                line, column, value
            ),
            DataError::DuplicateCondition { condition } => {
                write!(f, "Condition '{}' appears more than once", condition)
            }
            DataError::DuplicateSubject { subject } => {
                write!(f, "Subject '{}' appears in more than one row", subject)
            }
            DataError::DuplicateObservation { subject, condition } => write!(
                f,
                "Subject '{}' has more than one rating for condition '{}'",
                subject, condition
            ),
            DataError::UnknownCondition {
                condition,
                available,
            } => {
                let names: Vec<&str> = available.iter().map(Condition::as_str).collect();
                write!(
                    f,
                    "Unknown condition '{}'. Available conditions: {}",
                    condition,
                    names.join(", ")
                )
            }
            DataError::RaggedRow {
                subject,
                got,
                expected,
            } => write!(
                f,
                "Subject '{}' has {} ratings, expected one per condition ({})",
                subject, got, expected
            ),
            DataError::Series(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Io(e) => Some(e),
            DataError::Series(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DataError {
    fn from(e: std::io::Error) -> Self {
        DataError::Io(e)
    }
}

impl From<ContrastError> for DataError {
    fn from(e: ContrastError) -> Self {
        DataError::Series(e)
    }
}

/// One subject of the raw wide table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WideRow {
    /// Subject identifier.
    pub subject: String,
    /// Ratings aligned with [`Dataset::conditions`]; `None` is missing.
    pub ratings: Vec<Option<f64>>,
}

/// One observation in long format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongRow {
    /// Subject identifier.
    pub subject: String,
    /// Condition the rating belongs to.
    pub condition: Condition,
    /// The rating.
    pub rating: f64,
}

/// A wide ratings table with a fixed, known set of conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    subject_column: String,
    conditions: Vec<Condition>,
    rows: Vec<WideRow>,
}

impl Dataset {
    /// Create a dataset, checking that conditions and subjects are unique and
    /// that every row has one rating slot per condition.
    pub fn new(
        subject_column: impl Into<String>,
        conditions: Vec<Condition>,
        rows: Vec<WideRow>,
    ) -> Result<Self, DataError> {
        let mut seen = HashSet::new();
        for condition in &conditions {
            if !seen.insert(condition) {
                return Err(DataError::DuplicateCondition {
                    condition: condition.clone(),
                });
            }
        }

        let mut subjects = HashSet::new();
        for row in &rows {
            if row.ratings.len() != conditions.len() {
                return Err(DataError::RaggedRow {
                    subject: row.subject.clone(),
                    got: row.ratings.len(),
                    expected: conditions.len(),
                });
            }
            if !subjects.insert(row.subject.as_str()) {
                return Err(DataError::DuplicateSubject {
                    subject: row.subject.clone(),
                });
            }
        }

        Ok(Self {
            subject_column: subject_column.into(),
            conditions,
            rows,
        })
    }

    /// Header of the subject-id column.
    pub fn subject_column(&self) -> &str {
        &self.subject_column
    }

    /// Condition columns in file order.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Subject rows in file order.
    pub fn rows(&self) -> &[WideRow] {
        &self.rows
    }

    /// Number of subjects.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no subjects.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column index of `condition`.
    pub fn condition_index(&self, condition: &Condition) -> Result<usize, DataError> {
        self.conditions
            .iter()
            .position(|c| c == condition)
            .ok_or_else(|| DataError::UnknownCondition {
                condition: condition.clone(),
                available: self.conditions.clone(),
            })
    }

    /// Keep only the `keep` conditions, in the given order.
    pub fn select(&self, keep: &[Condition]) -> Result<Dataset, DataError> {
        let indices = keep
            .iter()
            .map(|c| self.condition_index(c))
            .collect::<Result<Vec<_>, _>>()?;

        let rows = self
            .rows
            .iter()
            .map(|row| WideRow {
                subject: row.subject.clone(),
                ratings: indices.iter().map(|&i| row.ratings[i]).collect(),
            })
            .collect();

        Dataset::new(self.subject_column.clone(), keep.to_vec(), rows)
    }

    /// Rename condition columns. Conditions not mentioned keep their label.
    pub fn rename(&self, mapping: &[(Condition, Condition)]) -> Result<Dataset, DataError> {
        for (from, _) in mapping {
            self.condition_index(from)?;
        }

        let conditions = self
            .conditions
            .iter()
            .map(|c| {
                mapping
                    .iter()
                    .find(|(from, _)| from == c)
                    .map_or_else(|| c.clone(), |(_, to)| to.clone())
            })
            .collect();

        Dataset::new(self.subject_column.clone(), conditions, self.rows.clone())
    }

    /// Keep only subjects with a rating for every condition.
    pub fn complete_cases(&self) -> Dataset {
        Dataset {
            subject_column: self.subject_column.clone(),
            conditions: self.conditions.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| row.ratings.iter().all(Option::is_some))
                .cloned()
                .collect(),
        }
    }

    /// Reshape to long format, subject-major, skipping missing ratings.
    pub fn to_long(&self) -> Vec<LongRow> {
        self.rows
            .iter()
            .flat_map(|row| {
                self.conditions
                    .iter()
                    .zip(&row.ratings)
                    .filter_map(move |(condition, rating)| {
                        rating.map(|rating| LongRow {
                            subject: row.subject.clone(),
                            condition: condition.clone(),
                            rating,
                        })
                    })
            })
            .collect()
    }
}
