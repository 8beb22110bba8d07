use crate::domain::model::{Dataset, Record};
use crate::utils::error::Result;

/// A per-record transformation. It must not depend on any other record.
///
/// Closures of the shape `Fn(Record) -> Result<Record>` implement this
/// directly, so callers can pass either a closure or a configured type.
pub trait Transformation {
    fn apply(&self, record: Record) -> Result<Record>;

    /// Short label used in progress output.
    fn describe(&self) -> String {
        "custom transformation".to_string()
    }
}

impl<F> Transformation for F
where
    F: Fn(Record) -> Result<Record>,
{
    fn apply(&self, record: Record) -> Result<Record> {
        self(record)
    }
}

/// The three stages a runnable pipeline provides; the engine sequences them.
pub trait Pipeline {
    fn extract(&self) -> Result<Dataset>;
    fn transform(&self, data: Dataset) -> Result<Dataset>;
    fn load(&self, data: &[Record]) -> Result<String>;
}
