//! CSV parsing for the height table.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::{DataError, Table};

/// Load a table from a CSV file with a header row.
///
/// Cells are trimmed. Every row must have as many fields as the header;
/// a ragged row is reported with its line number.
///
/// # Errors
/// Returns `DataError::Io` if the file cannot be opened and
/// `DataError::Csv` if it cannot be parsed.
pub fn load_csv(path: &Path) -> Result<Table, DataError> {
    let file = File::open(path)?;
    let table = read_csv(file)?;
    tracing::debug!(
        "Loaded {} rows x {} columns from {}",
        table.len(),
        table.headers().len(),
        path.display()
    );
    Ok(table)
}

/// Parse a table from any reader (used for in-memory data and tests).
pub fn read_csv<R: Read>(reader: R) -> Result<Table, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();

    let mut rows = Vec::new();
    let mut lines = Vec::new();

    for result in reader.records() {
        let record = result?;
        // Header is line 1, so the first record is normally line 2
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(rows.len() as u64 + 2);
        rows.push(record.iter().map(String::from).collect());
        lines.push(line);
    }

    Ok(Table::from_parts(headers, rows, lines))
}
