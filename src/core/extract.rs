use crate::core::{DataFormat, Dataset, Record, Value};
use crate::utils::error::{EtlError, Result};
use std::fs;
use std::io;
use std::path::Path;

/// Reads a dataset from `path`. The format is `format_override` when given,
/// otherwise the lowercase file extension.
pub fn extract<P: AsRef<Path>>(path: P, format_override: Option<&str>) -> Result<Dataset> {
    let path = path.as_ref();
    let format = DataFormat::resolve(path, format_override)?;
    tracing::debug!("Extracting {} data from: {}", format, path.display());

    let records = match format {
        DataFormat::Json => extract_from_json(path)?,
        DataFormat::Csv => extract_from_csv(path)?,
    };

    tracing::debug!("Read {} records from {}", records.len(), path.display());
    Ok(records)
}

/// 頂層陣列即為資料集，其他值包成單筆資料集。每個元素都必須是 JSON 物件
pub fn extract_from_json<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let content = read_source(path)?;
    let parsed: Value = serde_json::from_str(&content)?;

    let items = match parsed {
        Value::Array(items) => items,
        other => vec![other],
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(record) => Ok(record),
            other => Err(EtlError::ParseError {
                path: path.display().to_string(),
                message: format!("expected an object at index {}, found {}", index, kind_of(&other)),
            }),
        })
        .collect()
}

/// First row is the header; every cell is kept as text. Short rows get
/// `null` for the missing columns, cells beyond the header are dropped.
pub fn extract_from_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let content = read_source(path)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let mut records = Vec::new();

    for row in reader.records() {
        let row = row?;
        let mut record = Record::new();
        for (index, header) in headers.iter().enumerate() {
            let value = row
                .get(index)
                .map(|cell| Value::String(cell.to_string()))
                .unwrap_or(Value::Null);
            record.insert(header.to_string(), value);
        }
        records.push(record);
    }

    Ok(records)
}

// 非 UTF-8 內容屬於解析錯誤，不是 IO 錯誤
fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => EtlError::NotFound {
            path: path.display().to_string(),
        },
        io::ErrorKind::InvalidData => EtlError::ParseError {
            path: path.display().to_string(),
            message: format!("content is not valid UTF-8: {}", e),
        },
        _ => EtlError::IoError(e),
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
