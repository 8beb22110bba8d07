use anyhow::Context;
use clap::Parser;
use record_etl::utils::error::{EtlError, ErrorSeverity};
use record_etl::utils::{logger, validation::Validate};
use record_etl::{CliConfig, EtlEngine, TomlConfig};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting record-etl CLI");
    tracing::debug!("CLI config: {:?}", config);

    let job = match config.resolve_job() {
        Ok(job) => job,
        Err(e) => {
            eprintln!("❌ Failed to resolve the job: {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if let Err(e) = job.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if config.dry_run {
        print_dry_run(&job).context("failed to render the dry run")?;
        return Ok(());
    }

    let monitor_enabled = config.monitor_enabled(&job);
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let engine = EtlEngine::new_with_monitoring(job.build_pipeline(), monitor_enabled);

    match engine.run() {
        Ok(data) => {
            tracing::info!("✅ {} finished with {} records", job.name(), data.len());
        }
        Err(e) => {
            report_failure(&e);
            std::process::exit(exit_code(e.severity()));
        }
    }

    Ok(())
}

fn report_failure(e: &EtlError) {
    tracing::error!(
        "❌ ETL process failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
}

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn print_dry_run(job: &TomlConfig) -> anyhow::Result<()> {
    println!("🔍 Dry Run: {}", job.name());
    if let Some(description) = &job.pipeline.description {
        println!("  {}", description);
    }
    println!();
    println!(
        "  Source: {} ({})",
        job.source.path,
        job.source.format.as_deref().unwrap_or("by extension")
    );
    println!(
        "  Output: {} ({})",
        job.load.path,
        job.load.format.as_deref().unwrap_or("by extension")
    );

    let steps = job.transformations();
    println!();
    println!("🛠️ Transformations: {}", steps.len());
    for (index, step) in steps.iter().enumerate() {
        println!("  {}. {}", index + 1, step.describe());
    }

    let filters = job.filters();
    if !filters.is_empty() {
        println!("  Filters: {}", filters.len());
    }
    println!("  Then: standardize column names, clean string values");

    println!();
    println!(
        "📄 Resolved job:\n{}",
        toml::to_string_pretty(job).context("serializing the resolved job")?
    );
    Ok(())
}
