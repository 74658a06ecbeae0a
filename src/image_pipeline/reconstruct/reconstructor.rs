//! Rebuilds an RGB image from `(x, y, z, channel, value)` records.

use image::RgbImage;
use tracing::{debug, warn};
use crate::image_pipeline::common::error::{DrawError, Result};
use crate::image_pipeline::reconstruct::types::{ChannelPolicy, IntensityPolicy, ReconstructConfig};
use crate::image_pipeline::rows::types::{Channel, PixelRecord};

pub struct ImageReconstructor {
    config: ReconstructConfig,
}

impl Default for ImageReconstructor {
    fn default() -> Self {
        Self::new(ReconstructConfig::default())
    }
}

impl ImageReconstructor {
    pub fn new(config: ReconstructConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReconstructConfig {
        &self.config
    }

    /// Builds one image from a complete result set.
    ///
    /// Width and height are one past the largest `x` and `y` over all records.
    /// Records with an unknown channel count toward that only when both
    /// coordinates are non-negative; otherwise they are ignored entirely.
    /// Each of the three channels must then cover every `(x, y)` in that
    /// rectangle exactly once; a gap, a duplicate or a missing channel is a
    /// [`DrawError::Shape`].
    pub fn build_image(&self, records: &[PixelRecord]) -> Result<RgbImage> {
        if records.is_empty() {
            return Err(DrawError::Shape("result set is empty".to_string()));
        }

        let mut planes: [Vec<&PixelRecord>; 3] = [Vec::new(), Vec::new(), Vec::new()];
        let mut dropped = 0usize;
        for record in records {
            match Channel::from_code(record.channel) {
                Some(channel) => planes[channel.index()].push(record),
                None if self.config.channel_policy == ChannelPolicy::Reject => {
                    return Err(DrawError::InvalidRecord(format!(
                        "channel {} at ({}, {}) is not 0, 1 or 2",
                        record.channel, record.x, record.y
                    )));
                }
                None => dropped += 1,
            }
        }
        if dropped > 0 {
            match self.config.channel_policy {
                ChannelPolicy::Warn => {
                    warn!("Dropped {} records with a channel outside 0-2", dropped)
                }
                _ => debug!("Dropped {} records with a channel outside 0-2", dropped),
            }
        }

        let (width, height) = dimensions(records)?;
        let area = width as u64 * height as u64;

        // Counts are checked before allocating so a stray huge coordinate
        // cannot request an enormous buffer.
        for channel in Channel::ALL {
            let count = planes[channel.index()].len() as u64;
            if count != area {
                return Err(DrawError::Shape(format!(
                    "{:?} channel has {} records, a {}x{} image needs {}",
                    channel, count, width, height, area
                )));
            }
        }

        let mut image = RgbImage::new(width, height);
        let mut filled = vec![false; area as usize * 3];
        for channel in Channel::ALL {
            for record in &planes[channel.index()] {
                let (x, y) = (record.x as u32, record.y as u32);
                let slot = (y as usize * width as usize + x as usize) * 3 + channel.index();
                if filled[slot] {
                    return Err(DrawError::Shape(format!(
                        "duplicate {:?} record at ({}, {})",
                        channel, x, y
                    )));
                }
                filled[slot] = true;
                image.get_pixel_mut(x, y).0[channel.index()] = self.intensity(record)?;
            }
        }

        debug!("Reconstructed {}x{} image from {} records", width, height, records.len());
        Ok(image)
    }

    fn intensity(&self, record: &PixelRecord) -> Result<u8> {
        let value = record.value;
        match self.config.intensity_policy {
            IntensityPolicy::Wrap => Ok(value as u8),
            IntensityPolicy::Clamp => Ok(value.clamp(0, u8::MAX as i64) as u8),
            IntensityPolicy::Reject => u8::try_from(value).map_err(|_| {
                DrawError::InvalidRecord(format!(
                    "intensity {} at ({}, {}) is outside 0-255",
                    value, record.x, record.y
                ))
            }),
        }
    }
}

fn dimensions(records: &[PixelRecord]) -> Result<(u32, u32)> {
    let negative = |r: &&PixelRecord| r.x < 0 || r.y < 0;

    if let Some(record) = records
        .iter()
        .filter(|r| Channel::from_code(r.channel).is_some())
        .find(negative)
    {
        return Err(DrawError::Shape(format!(
            "negative coordinate ({}, {})",
            record.x, record.y
        )));
    }

    let placed = || records.iter().filter(|r| !negative(r));
    let (Some(max_x), Some(max_y)) = (placed().map(|r| r.x).max(), placed().map(|r| r.y).max())
    else {
        return Err(DrawError::Shape("no record has a usable coordinate".to_string()));
    };
    let width = extent(max_x)
        .ok_or_else(|| DrawError::Shape(format!("x coordinate {} is too large", max_x)))?;
    let height = extent(max_y)
        .ok_or_else(|| DrawError::Shape(format!("y coordinate {} is too large", max_y)))?;

    Ok((width, height))
}

fn extent(max: i64) -> Option<u32> {
    max.checked_add(1).and_then(|len| u32::try_from(len).ok())
}
