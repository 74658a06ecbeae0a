//! Query discovery module
//!
//! This module locates the SQL files whose results become composite tiles.

mod collector;
mod directory_collector;
pub mod types;

pub use collector::QueryCollector;
pub use directory_collector::DirectoryQueryCollector;
pub use types::{QueryFile, QUERY_FILE_SUFFIX};
