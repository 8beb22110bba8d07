use crate::core::extract::extract;
use crate::core::load::load_to_file;
use crate::core::operations::FieldEquals;
use crate::core::transform::{
    apply_transformation, clean_record, filter_data, standardize_column_names,
};
use crate::core::{Dataset, Pipeline, Record, Transformation};
use crate::utils::error::Result;
use std::path::PathBuf;

/// 檔案到檔案的 pipeline：先執行使用者轉換，再標準化欄位名稱並清理字串
pub struct FilePipeline {
    source_path: PathBuf,
    output_path: PathBuf,
    source_format: Option<String>,
    output_format: Option<String>,
    transformations: Vec<Box<dyn Transformation>>,
    filters: Vec<FieldEquals>,
}

impl FilePipeline {
    pub fn new(source_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            output_path: output_path.into(),
            source_format: None,
            output_format: None,
            transformations: Vec::new(),
            filters: Vec::new(),
        }
    }

    pub fn with_source_format(mut self, format: Option<String>) -> Self {
        self.source_format = format;
        self
    }

    pub fn with_output_format(mut self, format: Option<String>) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_transformations(mut self, transformations: Vec<Box<dyn Transformation>>) -> Self {
        self.transformations = transformations;
        self
    }

    pub fn add_transformation<T: Transformation + 'static>(mut self, transformation: T) -> Self {
        self.transformations.push(Box::new(transformation));
        self
    }

    /// 過濾在轉換之後、標準化之前執行，所以使用轉換後的欄位名稱
    pub fn with_filters(mut self, filters: Vec<FieldEquals>) -> Self {
        self.filters = filters;
        self
    }

    pub fn transformation_count(&self) -> usize {
        self.transformations.len()
    }
}

impl Pipeline for FilePipeline {
    fn extract(&self) -> Result<Dataset> {
        println!("\n[EXTRACT] Reading data from: {}", self.source_path.display());
        extract(&self.source_path, self.source_format.as_deref())
    }

    fn transform(&self, data: Dataset) -> Result<Dataset> {
        println!("\n[TRANSFORM] Applying transformations...");

        let mut data = data;
        for (step, transformation) in self.transformations.iter().enumerate() {
            println!("  Applying transformation {}...", step + 1);
            tracing::debug!("Transformation {}: {}", step + 1, transformation.describe());
            data = apply_transformation(data, &**transformation)?;
        }

        if !self.filters.is_empty() {
            let before = data.len();
            data = filter_data(data, |record: &Record| {
                self.filters.iter().all(|filter| filter.matches(record))
            });
            tracing::debug!("Filters kept {} of {} records", data.len(), before);
        }

        let data = standardize_column_names(data);
        Ok(data.into_iter().map(clean_record).collect())
    }

    fn load(&self, data: &[Record]) -> Result<String> {
        println!("\n[LOAD] Saving data to: {}", self.output_path.display());
        load_to_file(data, &self.output_path, self.output_format.as_deref())?;
        Ok(self.output_path.display().to_string())
    }
}
