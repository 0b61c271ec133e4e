use std::io;

use thiserror::Error;

/// Everything the cleaning step can fail with.
///
/// Nothing here is caught or retried inside the crate: every variant
/// propagates to the process boundary and aborts the run before an output
/// artifact is registered.
#[derive(Debug, Error)]
pub enum CleanError {
    /// The input artifact reference could not be resolved to a local file.
    #[error("failed to resolve artifact '{reference}': {reason}")]
    Resolution { reference: String, reason: String },

    /// Malformed tabular input (bad CSV, missing required columns, ...).
    #[error("malformed input data: {0}")]
    Parse(String),

    /// Local filesystem failure (read, write, copy).
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl CleanError {
    pub fn resolution(reference: impl Into<String>, reason: impl Into<String>) -> Self {
        CleanError::Resolution {
            reference: reference.into(),
            reason: reason.into(),
        }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        CleanError::Parse(msg.into())
    }

    /// Classify a `csv::Error`: underlying I/O failures stay `Io`,
    /// everything else (bad UTF-8, unequal row lengths, ...) is `Parse`.
    pub fn from_csv(err: csv::Error) -> Self {
        if err.is_io_error() {
            match err.into_kind() {
                csv::ErrorKind::Io(io_err) => CleanError::Io(io_err),
                other => CleanError::Parse(format!("{other:?}")),
            }
        } else {
            CleanError::Parse(err.to_string())
        }
    }
}
