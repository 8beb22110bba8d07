use crate::core::{DataFormat, Record};
use crate::domain::model::value_to_text;
use crate::utils::error::Result;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const SUMMARY_PREVIEW_FIELDS: usize = 5;

/// Writes `data` to `path` in the format given by `format_override` or the
/// file extension.
pub fn load_to_file<P: AsRef<Path>>(
    data: &[Record],
    path: P,
    format_override: Option<&str>,
) -> Result<()> {
    let path = path.as_ref();
    let format = DataFormat::resolve(path, format_override)?;
    tracing::debug!("Writing {} records as {} to: {}", data.len(), format, path.display());

    match format {
        DataFormat::Json => load_to_json(data, path),
        DataFormat::Csv => load_to_csv(data, path),
    }
}

/// 輸出縮排兩格的 JSON 陣列，非 ASCII 字元原樣保留
pub fn load_to_json<P: AsRef<Path>>(data: &[Record], path: P) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;

    let json_data = serde_json::to_string_pretty(data)?;
    fs::write(path, json_data)?;
    Ok(())
}

/// Header comes from the first record. Fields missing on later records are
/// written as empty cells; fields the header does not name are dropped.
/// An empty dataset, or one whose first record has no fields, writes nothing.
pub fn load_to_csv<P: AsRef<Path>>(data: &[Record], path: P) -> Result<()> {
    let path = path.as_ref();
    let Some(first) = data.first() else {
        tracing::warn!("No records to write, skipping CSV output: {}", path.display());
        return Ok(());
    };

    // 空標題會寫出 "" 行，讀回時變成一個不存在的欄位
    if first.is_empty() {
        tracing::warn!("First record has no fields, skipping CSV output: {}", path.display());
        return Ok(());
    }

    ensure_parent_dir(path)?;

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&headers)?;

    for record in data {
        let row = headers
            .iter()
            .map(|header| record.get(*header).map(value_to_text).unwrap_or_default());
        writer.write_record(row)?;
    }

    writer.flush()?;
    Ok(())
}

/// 總筆數、第一筆記錄的欄位名稱，以及最多五個欄位值
pub fn render_summary(data: &[Record]) -> String {
    let Some(first) = data.first() else {
        return "No data to summarize.\n".to_string();
    };

    let mut out = String::new();
    let fields: Vec<&str> = first.keys().map(String::as_str).collect();
    let _ = writeln!(out, "Total records: {}", data.len());
    let _ = writeln!(out, "Fields: {}", fields.join(", "));
    let _ = writeln!(out);
    let _ = writeln!(out, "First record:");
    for (key, value) in first.iter().take(SUMMARY_PREVIEW_FIELDS) {
        let _ = writeln!(out, "  {}: {}", key, display_value(value));
    }
    out
}

pub fn print_summary(data: &[Record]) {
    print!("{}", render_summary(data));
}

fn display_value(value: &serde_json::Value) -> String {
    if value.is_null() {
        "null".to_string()
    } else {
        value_to_text(value)
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::EtlError;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn dataset(value: Value) -> Vec<Record> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_load_to_json_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/deeper/out.json");
        let data = dataset(json!([{"name": "Zoë", "age": 30}]));

        load_to_file(&data, &path, None).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("Zoë"));
        assert!(content.contains("\n  {\n    \"name\""));
        let back: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(back, json!([{"name": "Zoë", "age": 30}]));
    }

    #[test]
    fn test_load_empty_dataset_to_json_writes_empty_array() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.json");

        load_to_file(&[], &path, None).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_load_to_csv_header_from_first_record() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out/people.csv");
        let data = dataset(json!([
            {"name": "John", "age": 30, "active": true},
            {"name": "Jane", "extra": "dropped"},
            {"age": 41, "name": null}
        ]));

        load_to_file(&data, &path, None).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["name,age,active", "John,30,true", "Jane,,", ",41,"]);
    }

    #[test]
    fn test_load_records_without_fields_to_csv_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blank.csv");
        let data = dataset(json!([{}, {"id": 1}]));

        load_to_file(&data, &path, None).unwrap();

        assert!(!path.exists());
    }

    #[test]
    fn test_load_empty_dataset_to_csv_is_a_no_op() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing_dir/empty.csv");

        load_to_file(&[], &path, None).unwrap();

        assert!(!path.exists());
        assert!(!temp_dir.path().join("missing_dir").exists());
    }

    #[test]
    fn test_load_with_format_override() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.data");
        let data = dataset(json!([{"id": 1}]));

        load_to_file(&data, &path, Some("csv")).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "id\n1\n");
    }

    #[test]
    fn test_load_unsupported_format() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.parquet");

        let err = load_to_file(&dataset(json!([{"id": 1}])), &path, None).unwrap_err();

        assert!(matches!(err, EtlError::UnsupportedFormat { ref format } if format == "parquet"));
        assert!(!path.exists());
    }

    #[test]
    fn test_load_to_unwritable_path_is_an_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let data = dataset(json!([{"id": 1}]));

        for name in ["out.json", "out.csv"] {
            let err = load_to_file(&data, blocker.join(name), None).unwrap_err();

            assert!(matches!(err, EtlError::IoError(_)), "unexpected error for {}: {:?}", name, err);
            assert_eq!(err.category(), crate::utils::error::ErrorCategory::Io);
        }
        assert_eq!(fs::read_to_string(&blocker).unwrap(), "not a directory");
    }

    #[test]
    fn test_render_summary() {
        let data = dataset(json!([
            {"a": 1, "b": "two", "c": null, "d": 4, "e": 5, "f": 6},
            {"a": 2}
        ]));

        let summary = render_summary(&data);

        assert!(summary.starts_with("Total records: 2\n"));
        assert!(summary.contains("Fields: a, b, c, d, e, f\n"));
        assert!(summary.contains("  b: two\n"));
        assert!(summary.contains("  c: null\n"));
        assert!(summary.contains("  e: 5\n"));
        assert!(!summary.contains("  f: 6"));
    }

    #[test]
    fn test_render_summary_empty() {
        assert_eq!(render_summary(&[]), "No data to summarize.\n");
    }
}
