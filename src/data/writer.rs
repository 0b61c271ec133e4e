use std::path::Path;

use crate::error::CleanError;

use super::model::Table;

/// Serialize a [`Table`] to CSV: header row with the original column names,
/// comma-separated values, no row index column. `Null` cells become empty
/// fields.
pub fn write_csv(table: &Table, path: &Path) -> Result<(), CleanError> {
    let mut writer = csv::Writer::from_path(path).map_err(CleanError::from_csv)?;

    writer
        .write_record(&table.columns)
        .map_err(CleanError::from_csv)?;

    for row in &table.rows {
        let fields: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
        writer.write_record(&fields).map_err(CleanError::from_csv)?;
    }

    writer.flush()?;
    Ok(())
}
