use crate::core::operations::{CoerceNumeric, ExcludeFields, FieldEquals, KeepOnlyFields, RenameFields};
use crate::core::pipeline::FilePipeline;
use crate::core::{Transformation, Value};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// 以 TOML 描述的一次 pipeline 執行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub pipeline: PipelineConfig,
    pub source: SourceConfig,
    #[serde(default)]
    pub transform: TransformConfig,
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub path: String,
    pub format: Option<String>,
}

/// 設定的轉換依固定順序執行：重新命名、保留欄位、排除欄位、數值轉換。
/// 過濾條件在所有轉換之後才執行
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransformConfig {
    pub field_mapping: Option<HashMap<String, String>>,
    pub keep_only_fields: Option<Vec<String>>,
    pub exclude_fields: Option<Vec<String>>,
    pub numeric_fields: Option<Vec<String>>,
    pub numeric_default: Option<f64>,
    pub filters: Option<HashMap<String, Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub path: String,
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// 只有來源與輸出的作業 (來自命令列參數)
    pub fn from_paths(source: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            pipeline: PipelineConfig::default(),
            source: SourceConfig {
                path: source.into(),
                format: None,
            },
            transform: TransformConfig::default(),
            load: LoadConfig {
                path: output.into(),
                format: None,
            },
            monitoring: None,
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn name(&self) -> &str {
        self.pipeline.name.as_deref().unwrap_or("record-etl")
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn transformations(&self) -> Vec<Box<dyn Transformation>> {
        let mut steps: Vec<Box<dyn Transformation>> = Vec::new();
        let transform = &self.transform;

        if let Some(mapping) = &transform.field_mapping {
            steps.push(Box::new(RenameFields::new(mapping.clone())));
        }
        if let Some(fields) = &transform.keep_only_fields {
            steps.push(Box::new(KeepOnlyFields::new(fields.iter().cloned())));
        }
        if let Some(fields) = &transform.exclude_fields {
            steps.push(Box::new(ExcludeFields::new(fields.iter().cloned())));
        }
        if let Some(fields) = &transform.numeric_fields {
            steps.push(Box::new(CoerceNumeric::new(
                fields.clone(),
                transform.numeric_default.unwrap_or(0.0),
            )));
        }

        steps
    }

    pub fn filters(&self) -> Vec<FieldEquals> {
        self.transform
            .filters
            .iter()
            .flatten()
            .map(|(field, expected)| FieldEquals::new(field.clone(), expected.clone()))
            .collect()
    }

    pub fn build_pipeline(&self) -> FilePipeline {
        FilePipeline::new(&self.source.path, &self.load.path)
            .with_source_format(self.source.format.clone())
            .with_output_format(self.load.format.clone())
            .with_transformations(self.transformations())
            .with_filters(self.filters())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("source.path", &self.source.path)?;
        validation::validate_path("load.path", &self.load.path)?;
        validation::validate_format("source.format", &self.source.path, self.source.format.as_deref())?;
        validation::validate_format("load.format", &self.load.path, self.load.format.as_deref())?;

        if let Some(fields) = &self.transform.keep_only_fields {
            for field in fields {
                validation::validate_non_empty_string("transform.keep_only_fields", field)?;
            }
        }

        Ok(())
    }
}
