use std::path::Path;

use crate::error::CleanError;

use super::model::{CellValue, Table};

/// Columns the cleaning step operates on; everything else is passthrough.
pub const REQUIRED_COLUMNS: [&str; 4] = ["price", "longitude", "latitude", "last_review"];

/// Load a listings CSV into a [`Table`].
///
/// Layout: UTF-8, comma-separated, header row with column names. Every cell
/// is typed with [`CellValue::guess`]; empty fields load as `Null`.
///
/// Fails with [`CleanError::Parse`] when the file is not valid CSV or any of
/// [`REQUIRED_COLUMNS`] is missing from the header.
pub fn load_csv(path: &Path) -> Result<Table, CleanError> {
    let mut reader = csv::Reader::from_path(path).map_err(CleanError::from_csv)?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(CleanError::from_csv)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    for required in REQUIRED_COLUMNS {
        if !columns.iter().any(|c| c == required) {
            return Err(CleanError::parse(format!(
                "missing required column '{required}'"
            )));
        }
    }

    let mut table = Table::new(columns);

    for (row_no, result) in reader.records().enumerate() {
        // The reader is strict: ragged rows surface as UnequalLengths here.
        let record = result.map_err(|e| match CleanError::from_csv(e) {
            CleanError::Io(io_err) => CleanError::Io(io_err),
            other => CleanError::parse(format!("row {row_no}: {other}")),
        })?;
        let row: Vec<CellValue> = record.iter().map(CellValue::guess).collect();
        table.rows.push(row);
    }

    Ok(table)
}
