//! Composite rendering configuration types

use image::imageops::FilterType;
use image::Rgb;

/// Output file used when the caller does not name one.
pub const DEFAULT_OUTPUT_FILENAME: &str = "draw_fun.jpg";

/// Configuration for building the composite image
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Width of one tile slot in pixels
    pub tile_width: u32,
    /// Height of one tile slot, and of the composite
    pub tile_height: u32,
    /// Fill color for canvas area not covered by an image
    pub background: Rgb<u8>,
    /// Resampling filter used when shrinking an image
    pub filter: FilterType,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            tile_width: 256,
            tile_height: 256,
            background: Rgb([250, 250, 250]),
            filter: FilterType::Lanczos3,
        }
    }
}

impl RenderConfig {
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder::default()
    }
}

/// Builder for RenderConfig
#[derive(Default)]
pub struct RenderConfigBuilder {
    tile_width: Option<u32>,
    tile_height: Option<u32>,
    background: Option<Rgb<u8>>,
    filter: Option<FilterType>,
}

impl RenderConfigBuilder {
    pub fn tile_size(mut self, width: u32, height: u32) -> Self {
        self.tile_width = Some(width);
        self.tile_height = Some(height);
        self
    }

    pub fn background(mut self, color: [u8; 3]) -> Self {
        self.background = Some(Rgb(color));
        self
    }

    pub fn filter(mut self, filter: FilterType) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn build(self) -> RenderConfig {
        let default = RenderConfig::default();
        RenderConfig {
            tile_width: self.tile_width.unwrap_or(default.tile_width),
            tile_height: self.tile_height.unwrap_or(default.tile_height),
            background: self.background.unwrap_or(default.background),
            filter: self.filter.unwrap_or(default.filter),
        }
    }
}
