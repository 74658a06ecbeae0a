use tracing::{info, instrument, warn};
use image::RgbImage;
use std::path::Path;

use crate::image_pipeline::{
    common::error::Result,
    conversions::types::{FailurePolicy, PipelineConfig},
    query::{DirectoryQueryCollector, QueryCollector, QueryFile},
    reconstruct::ImageReconstructor,
    render::CompositeRenderer,
    rows::{RowSource, SqliteRowSource},
};

/// Collect queries, run each one, rebuild its image and tile the results.
///
/// Queries are processed one at a time in collected order, which is also the
/// left-to-right order of the composite.
pub struct QueryToImagePipeline<C: QueryCollector, S: RowSource> {
    collector: C,
    source: S,
    reconstructor: ImageReconstructor,
    renderer: CompositeRenderer,
    config: PipelineConfig,
}

impl QueryToImagePipeline<DirectoryQueryCollector, SqliteRowSource> {
    pub fn new(source: SqliteRowSource, config: PipelineConfig) -> Self {
        Self::with_custom(DirectoryQueryCollector, source, config)
    }
}

impl<C: QueryCollector, S: RowSource> QueryToImagePipeline<C, S> {
    pub fn with_custom(collector: C, source: S, config: PipelineConfig) -> Self {
        Self {
            collector,
            source,
            reconstructor: ImageReconstructor::new(config.reconstruct.clone()),
            renderer: CompositeRenderer::new(config.render.clone()),
            config,
        }
    }

    /// Runs one query and rebuilds its result set as an image.
    #[instrument(skip(self, query), fields(query = %query.name()))]
    pub fn query_image(&self, query: &QueryFile) -> Result<RgbImage> {
        let records = {
            let _span = tracing::info_span!("execute_query").entered();
            self.source.fetch_rows(&query.sql)?
        };

        let _span = tracing::info_span!("reconstruct", records = records.len()).entered();
        self.reconstructor.build_image(&records)
    }

    /// Builds one image per query, honouring the configured failure policy.
    pub fn query_images(&self, queries: &[QueryFile]) -> Result<Vec<RgbImage>> {
        let mut images = Vec::with_capacity(queries.len());
        for query in queries {
            match self.query_image(query) {
                Ok(image) => images.push(image),
                Err(e) if self.config.failure_policy == FailurePolicy::Skip => {
                    warn!("Skipping query {}: {}", query.name(), e);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(images)
    }

    #[instrument(skip(self, query_dir, output_path))]
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(&self, query_dir: P, output_path: Q) -> Result<RgbImage> {
        let query_dir = query_dir.as_ref();
        let output_path = output_path.as_ref();

        info!(
            queries = %query_dir.display(),
            output = %output_path.display(),
            "Drawing composite"
        );

        let queries = {
            let _span = tracing::info_span!("collect_queries").entered();
            self.collector.collect(query_dir)?
        };

        let images = self.query_images(&queries)?;

        let canvas = {
            let _span = tracing::info_span!("render_composite", tiles = images.len()).entered();
            self.renderer.render(&images, output_path)?
        };

        info!(
            tiles = images.len(),
            width = canvas.width(),
            height = canvas.height(),
            "Draw complete"
        );
        Ok(canvas)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}
