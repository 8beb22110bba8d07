use anyhow::Result;
use record_etl::utils::validation::Validate;
use record_etl::{EtlEngine, TomlConfig};
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

/// Job files configure renames, field selection, numeric coercion and
/// filters on top of the fixed normalization steps.
#[test]
fn test_job_file_drives_full_pipeline() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let temp_path = temp_dir.path().to_str().unwrap().replace('\\', "/");

    fs::write(
        temp_dir.path().join("customers.csv"),
        "Customer Name,Age,Status,Password\n Ada ,36,active,x\nBob,n/a,inactive,y\n Cy ,41,active,z\n",
    )?;

    let config_content = format!(
        r#"
[pipeline]
name = "customers"

[source]
path = "{0}/customers.csv"

[transform]
keep_only_fields = ["Name", "Age", "Status"]
numeric_fields = ["Age"]

[transform.field_mapping]
"Customer Name" = "Name"

[transform.filters]
Status = "active"

[load]
path = "{0}/out/customers.json"
"#,
        temp_path
    );
    let config_path = temp_dir.path().join("job.toml");
    fs::write(&config_path, config_content)?;

    let job = TomlConfig::from_file(&config_path)?;
    job.validate()?;

    let data = EtlEngine::new(job.build_pipeline()).run()?;

    let written: Value =
        serde_json::from_str(&fs::read_to_string(temp_dir.path().join("out/customers.json"))?)?;
    assert_eq!(
        written,
        json!([
            {"name": "Ada", "age": 36, "status": "active"},
            {"name": "Cy", "age": 41, "status": "active"}
        ])
    );
    assert_eq!(data.len(), 2);
    Ok(())
}

#[test]
fn test_job_file_with_format_overrides() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let temp_path = temp_dir.path().to_str().unwrap().replace('\\', "/");

    fs::write(temp_dir.path().join("export.txt"), r#"{"Order-ID": 7, "Total": " 12.50 "}"#)?;

    let config_content = format!(
        r#"
[source]
path = "{0}/export.txt"
format = "json"

[transform]
exclude_fields = ["Total"]

[load]
path = "{0}/export.out"
format = "csv"
"#,
        temp_path
    );

    let job = TomlConfig::from_toml_str(&config_content)?;
    job.validate()?;
    EtlEngine::new(job.build_pipeline()).run()?;

    let content = fs::read_to_string(temp_dir.path().join("export.out"))?;
    assert_eq!(content, "order_id\n7\n");
    Ok(())
}

#[test]
fn test_job_file_validation_catches_bad_output_format() -> Result<()> {
    let job = TomlConfig::from_toml_str(
        r#"
[source]
path = "in.json"

[load]
path = "out.json"
format = "xlsx"
"#,
    )?;

    assert!(job.validate().is_err());
    Ok(())
}
