pub mod etl;
pub mod extract;
pub mod load;
pub mod operations;
pub mod pipeline;
pub mod transform;

pub use crate::domain::model::{DataFormat, Dataset, Record, Value};
pub use crate::domain::ports::{Pipeline, Transformation};
pub use crate::utils::error::Result;
