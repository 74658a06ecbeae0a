//! Pipeline conversions module
//!
//! This module contains orchestration logic that turns a directory of queries
//! into a single composite image.

mod query_to_image;
pub mod types;

#[cfg(test)]
mod tests;

pub use query_to_image::QueryToImagePipeline;
pub use types::{FailurePolicy, PipelineConfig, PipelineConfigBuilder};
