//! Loading the family height table and splitting it by sex.
//!
//! The input is a CSV file with a header row. Only two columns matter to the
//! analysis (a sex label and a height), but the table keeps every column so
//! the report can describe the whole file.
//!
//! # Example
//!
//! ```ignore
//! use galton_bootstrap::data::{load_csv, observations};
//! use std::path::Path;
//!
//! let table = load_csv(Path::new("galton.csv"))?;
//! let males = table.filter_eq("child_sex", "M")?;
//! let rows = observations(&table, "child_sex", "child_height")?;
//! println!("{} rows, {} male", table.len(), males.len());
//! ```

mod loader;
mod table;

pub use loader::{load_csv, read_csv};
pub use table::{observations, ColumnInfo, ColumnKind, Table, TableInfo};

use std::fmt;

/// Errors that can occur while loading or projecting the table.
#[derive(Debug)]
pub enum DataError {
    /// IO error reading the file.
    Io(std::io::Error),

    /// Malformed CSV (ragged row, bad quoting, invalid UTF-8).
    Csv {
        /// Line number where the error occurred (1-indexed), if known.
        line: Option<u64>,
        /// Description from the CSV reader.
        message: String,
    },

    /// A column the analysis needs is not in the header.
    MissingColumn {
        /// The column that was requested.
        name: String,
        /// The columns that were actually found.
        found: Vec<String>,
    },

    /// A numeric cell could not be parsed.
    InvalidValue {
        /// Line number of the offending row (1-indexed).
        line: u64,
        /// Column name.
        column: String,
        /// The raw cell text.
        value: String,
    },

    /// A sex label other than `M` or `F`.
    InvalidCategory {
        /// Line number of the offending row (1-indexed).
        line: u64,
        /// The raw label.
        value: String,
    },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Io(e) => write!(f, "IO error: {}", e),
            DataError::Csv { line: Some(line), message } => {
                write!(f, "CSV error at line {}: {}", line, message)
            }
            DataError::Csv { line: None, message } => write!(f, "CSV error: {}", message),
            DataError::MissingColumn { name, found } => {
                write!(f, "Missing column '{}'. Found columns: {:?}", name, found)
            }
            DataError::InvalidValue { line, column, value } => write!(
                f,
                "Invalid numeric value in column '{}' at line {}: '{}'",
                column, line, value
            ),
            DataError::InvalidCategory { line, value } => write!(
                f,
                "Invalid sex label at line {}: '{}' (expected 'M' or 'F')",
                line, value
            ),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DataError {
    fn from(e: std::io::Error) -> Self {
        DataError::Io(e)
    }
}

impl From<csv::Error> for DataError {
    fn from(e: csv::Error) -> Self {
        let line = e.position().map(|p| p.line());
        let message = e.to_string();
        match e.into_kind() {
            csv::ErrorKind::Io(io) => DataError::Io(io),
            _ => DataError::Csv { line, message },
        }
    }
}
