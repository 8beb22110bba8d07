use crate::core::{Dataset, Record, Transformation, Value};
use crate::utils::error::Result;
use std::collections::HashMap;

/// 將值修剪為文字。`null`、空字串與純空白都回傳 `None`，非字串值先轉成文字
pub fn clean_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => clean_text(s),
        other => clean_text(&other.to_string()),
    }
}

fn clean_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Best-effort numeric coercion. Never fails: anything that does not parse
/// yields `default`.
pub fn to_numeric(value: &Value, default: f64) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(default),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(default),
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        _ => default,
    }
}

/// 轉小寫，空白與連字號改為底線
pub fn standardize_column_name(name: &str) -> String {
    name.to_lowercase().replace([' ', '-'], "_")
}

pub fn standardize_column_names(data: Dataset) -> Dataset {
    data.into_iter()
        .map(|record| {
            record
                .into_iter()
                .map(|(key, value)| (standardize_column_name(&key), value))
                .collect()
        })
        .collect()
}

/// Cleans every string-valued field; other values are left untouched.
pub fn clean_record(record: Record) -> Record {
    record
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => clean_text(&s).map(Value::String).unwrap_or(Value::Null),
                other => other,
            };
            (key, value)
        })
        .collect()
}

/// 依序對每筆記錄套用轉換，第一個錯誤就中止整個階段
pub fn apply_transformation<T>(data: Dataset, transformation: &T) -> Result<Dataset>
where
    T: Transformation + ?Sized,
{
    data.into_iter()
        .map(|record| transformation.apply(record))
        .collect()
}

pub fn filter_data<F>(data: Dataset, predicate: F) -> Dataset
where
    F: Fn(&Record) -> bool,
{
    data.into_iter().filter(|record| predicate(record)).collect()
}

/// Groups records by the value of `group_by` and runs `aggregate` over each
/// group. A missing field groups with explicit `null`. Groups come back in
/// first-seen order.
pub fn aggregate_data<F, R>(data: &[Record], group_by: &str, aggregate: F) -> Vec<(Value, R)>
where
    F: Fn(&[Record]) -> R,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(Value, Vec<Record>)> = Vec::new();

    for record in data {
        let key = record.get(group_by).cloned().unwrap_or(Value::Null);
        // Value 沒有實作 Hash，改用 JSON 文字當鍵
        let slot = *index.entry(key.to_string()).or_insert_with(|| {
            groups.push((key, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(record.clone());
    }

    groups
        .into_iter()
        .map(|(key, records)| {
            let result = aggregate(&records);
            (key, result)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::EtlError;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("test records must be objects"),
        }
    }

    #[test]
    fn test_clean_string() {
        assert_eq!(clean_string(&Value::Null), None);
        assert_eq!(clean_string(&json!("  x  ")), Some("x".to_string()));
        assert_eq!(clean_string(&json!("   ")), None);
        assert_eq!(clean_string(&json!("")), None);
        assert_eq!(clean_string(&json!(42)), Some("42".to_string()));
        assert_eq!(clean_string(&json!(false)), Some("false".to_string()));
    }

    #[test]
    fn test_to_numeric() {
        assert_eq!(to_numeric(&json!("abc"), 0.0), 0.0);
        assert_eq!(to_numeric(&json!("3.5"), 0.0), 3.5);
        assert_eq!(to_numeric(&json!(" 12 "), 0.0), 12.0);
        assert_eq!(to_numeric(&json!(7), 0.0), 7.0);
        assert_eq!(to_numeric(&json!(true), 0.0), 1.0);
        assert_eq!(to_numeric(&Value::Null, -1.0), -1.0);
        assert_eq!(to_numeric(&json!([1]), 9.0), 9.0);
    }

    #[test]
    fn test_standardize_column_names() {
        let data = vec![record(json!({"First Name": "Ada", "e-mail": "a@x", "AGE": 36}))];

        let result = standardize_column_names(data);
        let keys: Vec<&str> = result[0].keys().map(String::as_str).collect();

        assert_eq!(keys, vec!["first_name", "e_mail", "age"]);
        assert_eq!(result[0]["first_name"], json!("Ada"));
        assert_eq!(result[0]["age"], json!(36));
    }

    #[test]
    fn test_clean_record_only_touches_strings() {
        let cleaned = clean_record(record(json!({
            "name": " John ",
            "blank": "   ",
            "age": 30,
            "active": true,
            "missing": null
        })));

        assert_eq!(cleaned["name"], json!("John"));
        assert_eq!(cleaned["blank"], Value::Null);
        assert_eq!(cleaned["age"], json!(30));
        assert_eq!(cleaned["active"], json!(true));
        assert_eq!(cleaned["missing"], Value::Null);
    }

    #[test]
    fn test_apply_transformation_preserves_order() {
        let data = vec![
            record(json!({"n": 1})),
            record(json!({"n": 2})),
            record(json!({"n": 3})),
        ];
        let double = |mut r: Record| -> Result<Record> {
            let n = to_numeric(&r["n"], 0.0);
            r.insert("n".to_string(), json!(n * 2.0));
            Ok(r)
        };

        let result = apply_transformation(data, &double).unwrap();

        let values: Vec<f64> = result.iter().map(|r| to_numeric(&r["n"], 0.0)).collect();
        assert_eq!(values, vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_apply_transformation_propagates_failure() {
        let data = vec![record(json!({"n": 1})), record(json!({"n": 2}))];
        let failing = |r: Record| -> Result<Record> {
            if r["n"] == json!(2) {
                Err(EtlError::transformation("n must not be 2"))
            } else {
                Ok(r)
            }
        };

        let err = apply_transformation(data, &failing).unwrap_err();

        assert!(matches!(err, EtlError::TransformationError { .. }));
    }

    #[test]
    fn test_filter_data() {
        let data = vec![
            record(json!({"id": 1, "keep": true})),
            record(json!({"id": 2, "keep": false})),
            record(json!({"id": 3, "keep": true})),
        ];

        let result = filter_data(data, |r| r["keep"] == json!(true));

        assert_eq!(result.len(), 2);
        assert_eq!(result[0]["id"], json!(1));
        assert_eq!(result[1]["id"], json!(3));
    }

    #[test]
    fn test_aggregate_data_sums_per_group() {
        let data = vec![
            record(json!({"g": "a", "v": 1})),
            record(json!({"g": "a", "v": 2})),
            record(json!({"g": "b", "v": 3})),
        ];

        let result = aggregate_data(&data, "g", |group| {
            group.iter().map(|r| to_numeric(&r["v"], 0.0)).sum::<f64>()
        });

        assert_eq!(result, vec![(json!("a"), 3.0), (json!("b"), 3.0)]);
    }

    #[test]
    fn test_aggregate_missing_field_groups_as_null() {
        let data = vec![
            record(json!({"g": null, "v": 1})),
            record(json!({"v": 2})),
            record(json!({"g": 1, "v": 3})),
        ];

        let result = aggregate_data(&data, "g", |group| group.len());

        assert_eq!(result, vec![(Value::Null, 2), (json!(1), 1)]);
    }
}
