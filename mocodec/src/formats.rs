//! Source formats a text domain can be read from.
//!
//! JSON documents deserialize straight into [`crate::TextDomain`]; CSV files go
//! through [`CsvRecord`] rows.

pub mod csv;

use std::{
    fmt::{Display, Formatter},
    path::Path,
    str::FromStr,
};

pub use self::csv::CsvRecord;

use crate::Error;

/// Represents all supported domain source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    /// A JSON document holding one `TextDomain`.
    Json,
    /// Headerless `context,original,translated[,forms...]` rows.
    Csv,
}

impl Display for FormatType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatType::Json => write!(f, "json"),
            FormatType::Csv => write!(f, "csv"),
        }
    }
}

/// Accepts `"json"` and `"csv"`, case-insensitively.
///
/// # Example
/// ```rust
/// use mocodec::formats::FormatType;
/// use std::str::FromStr;
/// assert_eq!(FormatType::from_str("JSON").unwrap(), FormatType::Json);
/// assert!(FormatType::from_str("po").is_err());
/// ```
impl FromStr for FormatType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "json" => Ok(FormatType::Json),
            "csv" => Ok(FormatType::Csv),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

impl FormatType {
    /// Returns the typical file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FormatType::Json => "json",
            FormatType::Csv => "csv",
        }
    }
}

/// Infers the source format from a file extension.
pub fn infer_format_from_path<P: AsRef<Path>>(path: P) -> Option<FormatType> {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| ext.parse().ok())
}
