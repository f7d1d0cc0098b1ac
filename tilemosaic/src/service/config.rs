//! Service configuration.

use std::time::Duration;

use crate::codec::{OutputFormat, DEFAULT_JPEG_QUALITY};
use crate::composer::GridShape;
use crate::config::{ConfigFile, ConfigFileError};
use crate::fetch::DEFAULT_TIMEOUT;
use crate::orchestrator::{DEFAULT_MAX_CONCURRENT, MAX_CONCURRENT_LIMIT};
use crate::source::SourceSet;
use crate::tile::TileSize;

/// Everything a [`MosaicService`](super::MosaicService) needs to run.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    sources: SourceSet,
    grid: GridShape,
    tile_size: TileSize,
    format: OutputFormat,
    jpeg_quality: u8,
    timeout: Duration,
    max_concurrent: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            sources: SourceSet::default(),
            grid: GridShape::default(),
            tile_size: TileSize::default(),
            format: OutputFormat::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            timeout: DEFAULT_TIMEOUT,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }
}

impl ServiceConfig {
    /// Builds a service configuration from a loaded config file.
    pub fn from_config_file(config: &ConfigFile) -> Result<Self, ConfigFileError> {
        config.validate()?;
        Ok(Self {
            sources: config.source_set()?,
            grid: config.grid_shape()?,
            tile_size: config.tile_size()?,
            format: config.output.format,
            jpeg_quality: config.output.jpeg_quality,
            timeout: Duration::from_secs(config.download.timeout),
            max_concurrent: config.download.parallel,
        })
    }

    pub fn with_sources(mut self, sources: SourceSet) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_grid(mut self, grid: GridShape) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_tile_size(mut self, tile_size: TileSize) -> Self {
        self.tile_size = tile_size;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the JPEG quality, clamped to 1..=100.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the fetch concurrency cap, clamped to `1..=MAX_CONCURRENT_LIMIT`.
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.clamp(1, MAX_CONCURRENT_LIMIT);
        self
    }

    pub fn sources(&self) -> &SourceSet {
        &self.sources
    }

    pub fn grid(&self) -> GridShape {
        self.grid
    }

    pub fn tile_size(&self) -> TileSize {
        self.tile_size
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }
}
