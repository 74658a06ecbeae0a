//! Image reconstruction module
//!
//! This module reshapes the sparse rows of one result set into a dense RGB image.

mod reconstructor;
pub mod types;

pub use reconstructor::ImageReconstructor;
pub use types::{ChannelPolicy, IntensityPolicy, ReconstructConfig, ReconstructConfigBuilder};
