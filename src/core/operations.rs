//! Transformations that can be described in a job file rather than code.

use crate::core::transform::to_numeric;
use crate::core::{Record, Transformation, Value};
use crate::utils::error::Result;
use std::collections::{HashMap, HashSet};

/// Renames fields in place; unmapped fields keep their names.
#[derive(Debug, Clone)]
pub struct RenameFields {
    mapping: HashMap<String, String>,
}

impl RenameFields {
    pub fn new(mapping: HashMap<String, String>) -> Self {
        Self { mapping }
    }
}

impl Transformation for RenameFields {
    fn apply(&self, record: Record) -> Result<Record> {
        Ok(record
            .into_iter()
            .map(|(key, value)| match self.mapping.get(&key) {
                Some(renamed) => (renamed.clone(), value),
                None => (key, value),
            })
            .collect())
    }

    fn describe(&self) -> String {
        format!("rename {} field(s)", self.mapping.len())
    }
}

#[derive(Debug, Clone)]
pub struct KeepOnlyFields {
    fields: HashSet<String>,
}

impl KeepOnlyFields {
    pub fn new<I: IntoIterator<Item = String>>(fields: I) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }
}

impl Transformation for KeepOnlyFields {
    fn apply(&self, mut record: Record) -> Result<Record> {
        record.retain(|key, _| self.fields.contains(key));
        Ok(record)
    }

    fn describe(&self) -> String {
        format!("keep only {} field(s)", self.fields.len())
    }
}

#[derive(Debug, Clone)]
pub struct ExcludeFields {
    fields: HashSet<String>,
}

impl ExcludeFields {
    pub fn new<I: IntoIterator<Item = String>>(fields: I) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }
}

impl Transformation for ExcludeFields {
    fn apply(&self, mut record: Record) -> Result<Record> {
        record.retain(|key, _| !self.fields.contains(key));
        Ok(record)
    }

    fn describe(&self) -> String {
        format!("exclude {} field(s)", self.fields.len())
    }
}

/// Replaces the named fields with their numeric value, falling back to
/// `default` when a value does not parse. Absent fields stay absent.
#[derive(Debug, Clone)]
pub struct CoerceNumeric {
    fields: Vec<String>,
    default: f64,
}

impl CoerceNumeric {
    pub fn new(fields: Vec<String>, default: f64) -> Self {
        Self { fields, default }
    }
}

impl Transformation for CoerceNumeric {
    fn apply(&self, mut record: Record) -> Result<Record> {
        for field in &self.fields {
            if let Some(value) = record.get_mut(field) {
                let number = to_numeric(value, self.default);
                *value = numeric_value(number);
            }
        }
        Ok(record)
    }

    fn describe(&self) -> String {
        format!("coerce {} field(s) to numbers", self.fields.len())
    }
}

// Whole numbers are written as integers so "30" becomes 30, not 30.0.
fn numeric_value(number: f64) -> Value {
    if number.fract() == 0.0 && number.abs() < i64::MAX as f64 {
        Value::from(number as i64)
    } else {
        serde_json::Number::from_f64(number)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

/// Keeps records whose `field` equals `expected`. A string field also
/// matches the text form of a non-string expectation, so CSV input can be
/// filtered with TOML numbers and booleans.
#[derive(Debug, Clone)]
pub struct FieldEquals {
    field: String,
    expected: Value,
}

impl FieldEquals {
    pub fn new(field: impl Into<String>, expected: Value) -> Self {
        Self {
            field: field.into(),
            expected,
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        match (record.get(&self.field), &self.expected) {
            (None, Value::Null) => true,
            (None, _) => false,
            (Some(actual), expected) if actual == expected => true,
            (Some(Value::String(_)), Value::String(_)) => false,
            (Some(Value::String(actual)), expected) => *actual == expected.to_string(),
            _ => false,
        }
    }
}
