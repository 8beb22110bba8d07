use crate::utils::error::{EtlError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub use serde_json::Value;

/// One row of data: field names mapped to values, in source insertion order.
pub type Record = serde_json::Map<String, Value>;

/// An ordered sequence of records flowing through the pipeline.
pub type Dataset = Vec<Record>;

/// File formats understood by the extractor and loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    Json,
    Csv,
}

impl DataFormat {
    /// Resolves the format from an explicit override, falling back to the
    /// lowercase extension of `path`.
    pub fn resolve(path: &Path, format_override: Option<&str>) -> Result<Self> {
        match format_override {
            Some(format) => format.parse(),
            None => Self::from_extension(path),
        }
    }

    pub fn from_extension(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .unwrap_or_default();
        extension.parse()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataFormat::Json => "json",
            DataFormat::Csv => "csv",
        }
    }
}

impl FromStr for DataFormat {
    type Err = EtlError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(DataFormat::Json),
            "csv" => Ok(DataFormat::Csv),
            other => Err(EtlError::unsupported_format(other)),
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text form of a value as it appears in summaries and CSV cells.
/// Strings are emitted verbatim, null as an empty string.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
