//! Common types and utilities shared across CLI commands.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use tilemosaic::codec::OutputFormat;
use tilemosaic::composer::GridShape;
use tilemosaic::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Output encoding selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ImageFormat {
    /// JPEG (lossy, smaller)
    Jpeg,
    /// PNG (lossless)
    Png,
}

impl From<ImageFormat> for OutputFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Jpeg => OutputFormat::Jpeg,
            ImageFormat::Png => OutputFormat::Png,
        }
    }
}

/// Options that override config file values.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigOverrides {
    /// Config file to load instead of ~/.tilemosaic/config.ini
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// URL template for source images; must contain {id}
    #[arg(long)]
    pub url_template: Option<String>,

    /// First source id (inclusive)
    #[arg(long)]
    pub first: Option<u32>,

    /// Last source id (inclusive)
    #[arg(long)]
    pub last: Option<u32>,

    /// Grid rows
    #[arg(long)]
    pub rows: Option<u32>,

    /// Grid columns
    #[arg(long)]
    pub cols: Option<u32>,

    /// Size the grid to fit the source range, ignoring --rows/--cols
    #[arg(long, conflicts_with_all = ["rows", "cols"])]
    pub auto_grid: bool,

    /// Square tile edge in pixels
    #[arg(long, value_name = "PIXELS")]
    pub tile_size: Option<u32>,

    /// Output encoding
    #[arg(long, value_enum)]
    pub format: Option<ImageFormat>,

    /// JPEG quality (1-100)
    #[arg(long)]
    pub jpeg_quality: Option<u8>,

    /// Per-image timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Maximum concurrent image fetches
    #[arg(long)]
    pub parallel: Option<usize>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    pub log_level: Option<String>,
}

impl ConfigOverrides {
    /// Path of the config file these overrides apply to.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(config_file_path)
    }

    /// Load the config file and apply overrides. CLI takes precedence.
    pub fn load(&self) -> Result<ConfigFile, CliError> {
        let path = self.config_path();
        if self.config.is_some() && !path.exists() {
            return Err(CliError::Config(format!(
                "Config file '{}' does not exist",
                path.display()
            )));
        }
        let mut config = ConfigFile::load_from(&path)?;
        self.apply(&mut config)?;
        Ok(config)
    }

    /// Overlay the set options onto `config` and re-validate.
    pub fn apply(&self, config: &mut ConfigFile) -> Result<(), CliError> {
        if let Some(template) = &self.url_template {
            config.source.url_template = template.clone();
        }
        if let Some(first) = self.first {
            config.source.first = first;
        }
        if let Some(last) = self.last {
            config.source.last = last;
        }
        if let Some(rows) = self.rows {
            config.grid.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.grid.cols = cols;
        }
        if let Some(edge) = self.tile_size {
            config.tile.width = edge;
            config.tile.height = edge;
        }
        if let Some(format) = self.format {
            config.output.format = format.into();
        }
        if let Some(quality) = self.jpeg_quality {
            config.output.jpeg_quality = quality;
        }
        if let Some(timeout) = self.timeout {
            config.download.timeout = timeout;
        }
        if let Some(parallel) = self.parallel {
            config.download.parallel = parallel;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }

        config.validate()?;

        if self.auto_grid {
            let count = config.source_set()?.len();
            if let Some(grid) = GridShape::for_count(count) {
                config.grid.rows = grid.rows();
                config.grid.cols = grid.cols();
            }
        }
        Ok(())
    }
}
