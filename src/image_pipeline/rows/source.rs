use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::rows::types::PixelRecord;

pub trait RowSource {
    fn fetch_rows(&self, sql: &str) -> Result<Vec<PixelRecord>>;
}
