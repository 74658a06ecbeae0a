use std::path::Path;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::query::types::QueryFile;

pub trait QueryCollector {
    fn collect(&self, dir: &Path) -> Result<Vec<QueryFile>>;
}
