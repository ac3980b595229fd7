//! In-memory table with named columns.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DataError;
use crate::types::{Observation, Sex};

/// Ordered rows of string cells under named headers.
///
/// Loaded once and never mutated; filtering produces a new table.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    /// Source line of each row, for error messages.
    lines: Vec<u64>,
}

impl Table {
    pub(crate) fn from_parts(headers: Vec<String>, rows: Vec<Vec<String>>, lines: Vec<u64>) -> Self {
        debug_assert_eq!(rows.len(), lines.len());
        Self {
            headers,
            rows,
            lines,
        }
    }

    /// Build a table from headers and rows (line numbers start after the header).
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let lines = (0..rows.len() as u64).map(|i| i + 2).collect();
        Self::from_parts(headers, rows, lines)
    }

    /// Column names in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_index(&self, name: &str) -> Result<usize, DataError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DataError::MissingColumn {
                name: name.to_string(),
                found: self.headers.clone(),
            })
    }

    /// Raw cells of one column.
    pub fn column(&self, name: &str) -> Result<Vec<&str>, DataError> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// One column parsed as floating point.
    ///
    /// # Errors
    /// `MissingColumn` if the column is absent, `InvalidValue` (with the line
    /// number) for the first cell that does not parse to a finite number.
    /// `NaN` and infinities are rejected.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>, DataError> {
        let idx = self.column_index(name)?;
        self.rows
            .iter()
            .zip(&self.lines)
            .map(|(row, &line)| {
                let cell = &row[idx];
                cell.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| DataError::InvalidValue {
                        line,
                        column: name.to_string(),
                        value: cell.clone(),
                    })
            })
            .collect()
    }

    /// Rows whose `column` equals `value`, in original order, with all columns.
    ///
    /// An empty result is legal.
    pub fn filter_eq(&self, column: &str, value: &str) -> Result<Table, DataError> {
        let idx = self.column_index(column)?;
        let (rows, lines): (Vec<Vec<String>>, Vec<u64>) = self
            .rows
            .iter()
            .zip(&self.lines)
            .filter(|(row, _)| row[idx] == value)
            .map(|(row, &line)| (row.clone(), line))
            .unzip();

        Ok(Table::from_parts(self.headers.clone(), rows, lines))
    }

    /// Shape and per-column summary of the table.
    pub fn info(&self) -> TableInfo {
        let columns = self
            .headers
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let cells: Vec<&str> = self
                    .rows
                    .iter()
                    .map(|row| row[idx].as_str())
                    .filter(|cell| !cell.is_empty())
                    .collect();
                ColumnInfo {
                    name: name.clone(),
                    kind: ColumnKind::infer(&cells),
                    non_empty: cells.len(),
                }
            })
            .collect();

        TableInfo {
            rows: self.rows.len(),
            columns,
        }
    }
}

/// Project a table onto typed `(sex, height)` observations.
///
/// # Errors
/// `InvalidCategory` for labels other than `M`/`F`; `InvalidValue` for
/// heights that do not parse.
pub fn observations(
    table: &Table,
    sex_column: &str,
    height_column: &str,
) -> Result<Vec<Observation>, DataError> {
    let sex_idx = table.column_index(sex_column)?;
    let heights = table.numeric_column(height_column)?;

    table
        .rows
        .iter()
        .zip(&table.lines)
        .zip(heights)
        .map(|((row, &line), height)| {
            let sex: Sex = row[sex_idx]
                .parse()
                .map_err(|value| DataError::InvalidCategory { line, value })?;
            Ok(Observation::new(sex, height))
        })
        .collect()
}

/// Inferred type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Every non-empty cell parses as an integer.
    Integer,
    /// Every non-empty cell parses as a float.
    Float,
    /// Anything else.
    Text,
}

impl ColumnKind {
    fn infer(cells: &[&str]) -> Self {
        if cells.is_empty() {
            ColumnKind::Text
        } else if cells.iter().all(|c| c.parse::<i64>().is_ok()) {
            ColumnKind::Integer
        } else if cells.iter().all(|c| c.parse::<f64>().is_ok()) {
            ColumnKind::Float
        } else {
            ColumnKind::Text
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            ColumnKind::Integer => "integer",
            ColumnKind::Float => "float",
            ColumnKind::Text => "text",
        }
    }
}

/// Summary of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    /// Header name.
    pub name: String,
    /// Inferred type.
    pub kind: ColumnKind,
    /// Number of non-empty cells.
    pub non_empty: usize,
}

/// Shape of a table and its columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableInfo {
    /// Number of rows.
    pub rows: usize,
    /// Per-column summaries, in file order.
    pub columns: Vec<ColumnInfo>,
}

impl fmt::Display for TableInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .columns
            .iter()
            .map(|c| c.name.len())
            .max()
            .unwrap_or(0)
            .max("Column".len());

        writeln!(f, "Rows: {}", self.rows)?;
        writeln!(f, "Columns: {}", self.columns.len())?;
        writeln!(f, " #  {:<width$}  Non-empty  Kind", "Column", width = width)?;
        for (i, column) in self.columns.iter().enumerate() {
            writeln!(
                f,
                "{:>2}  {:<width$}  {:>9}  {}",
                i,
                column.name,
                column.non_empty,
                column.kind.as_str(),
                width = width
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_table() -> Table {
        let rows = vec![
            vec!["1", "M", "73.2"],
            vec!["1", "F", "69.2"],
            vec!["2", "M", "70.5"],
            vec!["3", "F", ""],
        ];
        Table::new(
            vec!["family".into(), "child_sex".into(), "child_height".into()],
            rows.into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
        )
    }

    #[test]
    fn test_filter_eq_preserves_order_and_columns() {
        let table = make_table();
        let males = table.filter_eq("child_sex", "M").unwrap();

        assert_eq!(males.len(), 2);
        assert_eq!(males.headers(), table.headers());
        assert_eq!(males.column("child_height").unwrap(), vec!["73.2", "70.5"]);
    }

    #[test]
    fn test_filter_eq_partitions_table() {
        let table = make_table();
        let males = table.filter_eq("child_sex", "M").unwrap();
        let females = table.filter_eq("child_sex", "F").unwrap();
        assert_eq!(males.len() + females.len(), table.len());
    }

    #[test]
    fn test_filter_eq_no_match_is_empty() {
        let table = make_table();
        let none = table.filter_eq("child_sex", "X").unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_missing_column() {
        let table = make_table();
        match table.filter_eq("sex", "M") {
            Err(DataError::MissingColumn { name, found }) => {
                assert_eq!(name, "sex");
                assert_eq!(found.len(), 3);
            }
            other => panic!("Expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_numeric_column_reports_line() {
        let table = make_table();
        match table.numeric_column("child_height") {
            Err(DataError::InvalidValue { line, value, .. }) => {
                assert_eq!(line, 5);
                assert_eq!(value, "");
            }
            other => panic!("Expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_numeric_column_rejects_non_finite() {
        for cell in ["NaN", "inf", "-inf"] {
            let table = Table::new(
                vec!["child_sex".into(), "child_height".into()],
                vec![
                    vec!["M".into(), "70.1".into()],
                    vec!["M".into(), cell.to_string()],
                ],
            );
            match table.numeric_column("child_height") {
                Err(DataError::InvalidValue { line, value, .. }) => {
                    assert_eq!(line, 3);
                    assert_eq!(value, cell);
                }
                other => panic!("Expected InvalidValue for {}, got {:?}", cell, other),
            }
        }
    }

    #[test]
    fn test_info() {
        let info = make_table().info();
        assert_eq!(info.rows, 4);
        assert_eq!(info.columns[0].kind, ColumnKind::Integer);
        assert_eq!(info.columns[1].kind, ColumnKind::Text);
        assert_eq!(info.columns[2].kind, ColumnKind::Float);
        assert_eq!(info.columns[2].non_empty, 3);

        let text = info.to_string();
        assert!(text.contains("Rows: 4"));
        assert!(text.contains("child_height"));
    }

    #[test]
    fn test_observations_rejects_unknown_label() {
        let table = Table::new(
            vec!["child_sex".into(), "child_height".into()],
            vec![
                vec!["M".into(), "70.0".into()],
                vec!["?".into(), "60.0".into()],
            ],
        );
        match observations(&table, "child_sex", "child_height") {
            Err(DataError::InvalidCategory { line, value }) => {
                assert_eq!(line, 3);
                assert_eq!(value, "?");
            }
            other => panic!("Expected InvalidCategory, got {:?}", other),
        }
    }

    #[test]
    fn test_observations() {
        let table = Table::new(
            vec!["child_sex".into(), "child_height".into()],
            vec![
                vec!["M".into(), "70.0".into()],
                vec!["F".into(), "64.5".into()],
            ],
        );
        let obs = observations(&table, "child_sex", "child_height").unwrap();
        assert_eq!(
            obs,
            vec![
                Observation::new(Sex::Male, 70.0),
                Observation::new(Sex::Female, 64.5)
            ]
        );
    }
}
