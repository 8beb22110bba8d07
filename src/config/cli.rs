use crate::config::toml_config::TomlConfig;
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "record-etl")]
#[command(about = "Extract records from JSON or CSV, normalize them and write JSON or CSV")]
pub struct CliConfig {
    /// Source file (.json or .csv)
    pub source: Option<String>,

    /// Output file (.json or .csv)
    pub output: Option<String>,

    /// Path to a TOML job file; positional paths override it
    #[arg(short, long)]
    pub config: Option<String>,

    /// Source format, overriding the file extension
    #[arg(long)]
    pub source_format: Option<String>,

    /// Output format, overriding the file extension
    #[arg(long)]
    pub output_format: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage after each stage")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Show the resolved job without reading or writing files")]
    pub dry_run: bool,
}

impl CliConfig {
    /// 合併作業檔與命令列參數，命令列的值優先
    pub fn resolve_job(&self) -> Result<TomlConfig> {
        let mut job = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => {
                let source = validate_required_field("source", &self.source)?;
                let output = validate_required_field("output", &self.output)?;
                TomlConfig::from_paths(source.clone(), output.clone())
            }
        };

        if let Some(source) = &self.source {
            job.source.path = source.clone();
        }
        if let Some(output) = &self.output {
            job.load.path = output.clone();
        }
        if self.source_format.is_some() {
            job.source.format = self.source_format.clone();
        }
        if self.output_format.is_some() {
            job.load.format = self.output_format.clone();
        }

        Ok(job)
    }

    pub fn monitor_enabled(&self, job: &TomlConfig) -> bool {
        self.monitor || job.monitoring_enabled()
    }
}
