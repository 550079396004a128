pub mod config;

pub use config::{PipelineConfig, FileFormat, ModelFiles};
