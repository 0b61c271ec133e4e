use crate::error::CleanError;

use super::model::Table;

// ---------------------------------------------------------------------------
// Range predicates over numeric columns
// ---------------------------------------------------------------------------

/// NYC bounding box used to discard geolocation outliers. Not configurable.
pub const LONGITUDE_RANGE: (f64, f64) = (-74.25, -73.50);
pub const LATITUDE_RANGE: (f64, f64) = (40.5, 41.2);

/// Indices of rows whose `column` value lies in `[min, max]` inclusive.
///
/// Cells that are missing or not numeric fail the membership test, so their
/// rows are dropped. An inverted range (`min > max`) matches nothing — the
/// caller gets an empty selection, not an error.
pub fn rows_in_range(
    table: &Table,
    column: &str,
    min: f64,
    max: f64,
) -> Result<Vec<usize>, CleanError> {
    let idx = table
        .column_index(column)
        .ok_or_else(|| CleanError::parse(format!("missing required column '{column}'")))?;

    let indices = table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| match row[idx].as_f64() {
            Some(v) => v >= min && v <= max,
            None => false,
        })
        .map(|(i, _)| i)
        .collect();
    Ok(indices)
}

/// Indices of rows whose coordinates fall inside the NYC bounding box.
pub fn rows_in_bounding_box(table: &Table) -> Result<Vec<usize>, CleanError> {
    let lon_idx = table
        .column_index("longitude")
        .ok_or_else(|| CleanError::parse("missing required column 'longitude'"))?;
    let lat_idx = table
        .column_index("latitude")
        .ok_or_else(|| CleanError::parse("missing required column 'latitude'"))?;

    let (lon_min, lon_max) = LONGITUDE_RANGE;
    let (lat_min, lat_max) = LATITUDE_RANGE;

    let indices = table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            let lon = row[lon_idx].as_f64();
            let lat = row[lat_idx].as_f64();
            match (lon, lat) {
                (Some(lon), Some(lat)) => {
                    lon >= lon_min && lon <= lon_max && lat >= lat_min && lat <= lat_max
                }
                _ => false,
            }
        })
        .map(|(i, _)| i)
        .collect();
    Ok(indices)
}
