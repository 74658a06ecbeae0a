//! Query-to-image pipeline module
//!
//! This module provides a structured approach to drawing SQL results, with
//! separate modules for query discovery, row fetching, image reconstruction,
//! composite rendering and orchestration.

pub mod query;
pub mod rows;
pub mod reconstruct;
pub mod render;
pub mod conversions;
pub mod common;

pub use common::{
    DrawError,
    Result,
};

pub use query::{
    QueryCollector,
    DirectoryQueryCollector,
    QueryFile,
};

pub use rows::{
    Channel,
    PixelRecord,
    RowSource,
    SqliteRowSource,
};

pub use reconstruct::{
    ChannelPolicy,
    ImageReconstructor,
    IntensityPolicy,
    ReconstructConfig,
};

pub use render::{
    CompositeRenderer,
    RenderConfig,
};

pub use conversions::{
    FailurePolicy,
    PipelineConfig,
    QueryToImagePipeline,
};
