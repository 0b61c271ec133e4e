use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common Pandas dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    Null,
}

impl CellValue {
    /// Guess the narrowest type for a raw CSV field.
    ///
    /// Empty fields become `Null`; dates are *not* guessed here — the
    /// `last_review` column is re-parsed explicitly by the cleaning step.
    pub fn guess(s: &str) -> CellValue {
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        if s == "true" || s == "false" {
            return CellValue::Bool(s == "true");
        }
        CellValue::String(s.to_string())
    }

    /// Interpret the value as an `f64` for range predicates.
    /// Strings, bools, dates and nulls are not numbers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Re-parse the value as a calendar date.
    ///
    /// Accepts `YYYY-MM-DD` plus the common timestamp spellings
    /// (`YYYY-MM-DD HH:MM:SS`, RFC 3339 `T` separator). Anything else is
    /// `None` — the caller maps that to `Null`, never to a dropped row.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(d) => Some(*d),
            CellValue::String(s) => parse_date(s),
            _ => None,
        }
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// CSV rendering: `Null` serializes as an empty field, dates as ISO-8601.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::Null => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// An in-memory table of rows with named columns.
///
/// Column order is the original header order so the serialized output keeps
/// the input's shape; columns the cleaning step does not touch pass through
/// unchanged.
#[derive(Debug, Clone)]
pub struct Table {
    /// Column names, in header order.
    pub columns: Vec<String>,
    /// Rows; each row has exactly `columns.len()` cells.
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Table {
            columns,
            rows: Vec::new(),
        }
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at (row, column index).
    pub fn value(&self, row: usize, col: usize) -> &CellValue {
        &self.rows[row][col]
    }

    /// New table keeping only the given row indices, in order.
    pub fn select(&self, indices: &[usize]) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows (it may still have columns).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Reinterpret every cell of `column` as a calendar date.
    /// Unparseable values become `Null`; no row is removed.
    pub fn coerce_date_column(&mut self, column: &str) {
        let Some(idx) = self.column_index(column) else {
            return;
        };
        for row in &mut self.rows {
            row[idx] = match row[idx].as_date() {
                Some(d) => CellValue::Date(d),
                None => CellValue::Null,
            };
        }
    }
}
