use crate::core::pipeline::FilePipeline;
use crate::core::load::print_summary;
use crate::core::{Dataset, Pipeline, Transformation};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use std::path::Path;

const BANNER_WIDTH: usize = 50;

/// 依序執行 pipeline 各階段並回報進度。任何階段失敗即結束，不重試也不回滾
pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Runs extract, transform, load and summary, returning the dataset
    /// exactly as it was written.
    pub fn run(&self) -> Result<Dataset> {
        print_banner("Starting ETL Pipeline");
        tracing::info!("🚀 Starting ETL run");

        let raw_data = self.pipeline.extract()?;
        println!("Extracted {} records", raw_data.len());
        tracing::info!("📥 Extracted {} records", raw_data.len());
        self.monitor.log_stats("Extract");

        let data = self.pipeline.transform(raw_data)?;
        println!("Transformed {} records", data.len());
        tracing::info!("🔄 Transformed {} records", data.len());
        self.monitor.log_stats("Transform");

        let output_path = self.pipeline.load(&data)?;
        println!("Data saved successfully");
        tracing::info!("💾 Output saved to: {}", output_path);
        self.monitor.log_stats("Load");

        println!("\n[SUMMARY]");
        print_summary(&data);

        println!();
        print_banner("ETL Pipeline Completed");
        self.monitor.log_final_stats();

        Ok(data)
    }
}

fn print_banner(title: &str) {
    let rule = "=".repeat(BANNER_WIDTH);
    println!("{}", rule);
    println!("{}", title);
    println!("{}", rule);
}

/// Extracts `source_path`, applies `transformations` in order, standardizes
/// column names, cleans string fields, writes `output_path` and prints a
/// summary. Both formats are taken from the file extensions.
pub fn run_pipeline<S, O>(
    source_path: S,
    output_path: O,
    transformations: Vec<Box<dyn Transformation>>,
) -> Result<Dataset>
where
    S: AsRef<Path>,
    O: AsRef<Path>,
{
    let pipeline = FilePipeline::new(source_path.as_ref(), output_path.as_ref())
        .with_transformations(transformations);
    EtlEngine::new(pipeline).run()
}
