//! Row source module
//!
//! This module executes query text against the relational store and decodes
//! the resulting rows into pixel records.

mod source;
mod sqlite_source;
pub mod types;

pub use source::RowSource;
pub use sqlite_source::SqliteRowSource;
pub use types::{Channel, PixelRecord};
