pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use crate::core::etl::{run_pipeline, EtlEngine};
pub use crate::core::pipeline::FilePipeline;
pub use domain::model::{DataFormat, Dataset, Record, Value};
pub use domain::ports::{Pipeline, Transformation};
pub use utils::error::{EtlError, Result};
