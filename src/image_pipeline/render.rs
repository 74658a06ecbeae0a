//! Composite rendering module
//!
//! This module scales reconstructed images into fixed-size tiles, lays them
//! out left to right and writes the result to disk.

mod compositor;
pub mod types;

pub use compositor::CompositeRenderer;
pub use types::{RenderConfig, RenderConfigBuilder, DEFAULT_OUTPUT_FILENAME};
