//! All error types for the mocodec crate.
//!
//! These are returned from all fallible operations (table construction, generation, sink I/O, input parsing).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid table offset: {0} (offsets cannot be negative)")]
    InvalidOffset(i64),

    #[error("value {0} does not fit in a 32-bit MO field")]
    OffsetOverflow(u64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unable to write to {}: {source}", path.display())]
    NotWritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("byte sink is already closed")]
    SinkClosed,

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("unknown format `{0}`")]
    UnknownFormat(String),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid data: {0}")]
    DataMismatch(String),
}

impl Error {
    /// Creates a not-writable error for the given destination.
    pub fn not_writable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::NotWritable {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` for failures of the output sink (write, flush, close, open).
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            Error::Io(_) | Error::NotWritable { .. } | Error::SinkClosed
        )
    }
}
