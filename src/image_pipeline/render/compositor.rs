use std::borrow::Cow;
use std::io::{Cursor, Write};
use std::path::Path;

use image::{imageops, DynamicImage, ImageFormat, RgbImage};
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument};
use crate::image_pipeline::common::error::{DrawError, Result};
use crate::image_pipeline::render::types::{RenderConfig, DEFAULT_OUTPUT_FILENAME};

pub struct CompositeRenderer {
    config: RenderConfig,
}

impl Default for CompositeRenderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

impl CompositeRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Lays the images out left to right on a fresh canvas.
    ///
    /// The canvas is `tile_width * images.len()` by `tile_height`. Each image
    /// is shrunk to fit its tile and pasted at the tile's top-left corner.
    pub fn compose(&self, images: &[RgbImage]) -> Result<RgbImage> {
        let RenderConfig {
            tile_width,
            tile_height,
            ..
        } = self.config;

        if images.is_empty() {
            return Err(DrawError::EmptyImageSequence);
        }
        if tile_width == 0 || tile_height == 0 {
            return Err(DrawError::Config(format!(
                "tile size {}x{} must be non-zero",
                tile_width, tile_height
            )));
        }

        let canvas_width = u32::try_from(images.len())
            .ok()
            .and_then(|count| count.checked_mul(tile_width))
            .ok_or_else(|| {
                DrawError::Config(format!(
                    "{} tiles of width {} exceed the maximum canvas width",
                    images.len(),
                    tile_width
                ))
            })?;

        let mut canvas = RgbImage::from_pixel(canvas_width, tile_height, self.config.background);

        for (pos, image) in images.iter().enumerate() {
            let tile = self.fit_to_tile(image);
            let offset = pos as i64 * tile_width as i64;
            debug!(
                "Tile {}: {}x{} -> {}x{} at x={}",
                pos,
                image.width(),
                image.height(),
                tile.width(),
                tile.height(),
                offset
            );
            imageops::replace(&mut canvas, &*tile, offset, 0);
        }

        Ok(canvas)
    }

    /// Composes the images and writes the canvas to `output_path`.
    ///
    /// The encoding is chosen from the file extension. The canvas is encoded
    /// in memory and moved into place through a temporary file in the same
    /// directory, so a failure leaves any existing file at `output_path` as it was.
    #[instrument(skip(self, images, output_path), fields(images = images.len()))]
    pub fn render<P: AsRef<Path>>(&self, images: &[RgbImage], output_path: P) -> Result<RgbImage> {
        let output_path = output_path.as_ref();
        let canvas = self.compose(images)?;

        let persistence = |e: &dyn std::fmt::Display| {
            DrawError::Persistence(format!("{}: {}", output_path.display(), e))
        };

        let format = ImageFormat::from_path(output_path).map_err(|e| persistence(&e))?;
        let mut encoded = Vec::new();
        canvas
            .write_to(&mut Cursor::new(&mut encoded), format)
            .map_err(|e| persistence(&e))?;
        debug!("Encoded composite as {:?}, {} bytes", format, encoded.len());

        let dir = match output_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = NamedTempFile::new_in(dir).map_err(|e| persistence(&e))?;
        staged.write_all(&encoded).map_err(|e| persistence(&e))?;
        staged.persist(output_path).map_err(|e| persistence(&e.error))?;

        info!(
            output = %output_path.display(),
            width = canvas.width(),
            height = canvas.height(),
            "Composite written"
        );
        Ok(canvas)
    }

    /// [`CompositeRenderer::render`] into `draw_fun.jpg` in the working directory.
    ///
    /// The query pipeline never calls this; it writes to the configured
    /// output path, `draw-fun.png` unless overridden.
    pub fn render_default(&self, images: &[RgbImage]) -> Result<RgbImage> {
        self.render(images, DEFAULT_OUTPUT_FILENAME)
    }

    /// Shrinks `image` to fit one tile, preserving aspect ratio.
    /// Images that already fit are used as they are.
    fn fit_to_tile<'a>(&self, image: &'a RgbImage) -> Cow<'a, RgbImage> {
        let (tile_width, tile_height) = (self.config.tile_width, self.config.tile_height);
        if image.width() <= tile_width && image.height() <= tile_height {
            return Cow::Borrowed(image);
        }

        let resized = DynamicImage::ImageRgb8(image.clone())
            .resize(tile_width, tile_height, self.config.filter)
            .into_rgb8();
        Cow::Owned(resized)
    }
}
