//! Configuration file handling for ~/.tilemosaic/config.ini.
//!
//! Settings structs live in [`super::settings`], parsing in
//! [`super::parser`] and serialization in [`super::writer`].

use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use super::settings::ConfigFile;
use crate::composer::GridShape;
use crate::orchestrator::MAX_CONCURRENT_LIMIT;
use crate::source::{SourceSet, SourceSetError};
use crate::tile::{TileSize, MAX_TILE_EDGE};

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFileError {
    pub(super) fn invalid(
        section: &str,
        key: &str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<SourceSetError> for ConfigFileError {
    fn from(e: SourceSetError) -> Self {
        match &e {
            SourceSetError::MissingPlaceholder(template) => {
                Self::invalid("source", "url_template", template, e.to_string())
            }
            SourceSetError::EmptyRange { first, last } => Self::invalid(
                "source",
                "first",
                format!("{}..{}", first, last),
                e.to_string(),
            ),
        }
    }
}

impl ConfigFile {
    /// Load configuration from the default path (~/.tilemosaic/config.ini).
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to the default path (~/.tilemosaic/config.ini).
    pub fn save(&self) -> Result<(), ConfigFileError> {
        self.save_to(&config_file_path())
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        let content = super::writer::to_config_string(self);
        std::fs::write(path, content).map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// Create the default config file if it doesn't exist.
    ///
    /// Returns the path to the config file.
    pub fn ensure_exists() -> Result<PathBuf, ConfigFileError> {
        let path = config_file_path();
        if !path.exists() {
            Self::default().save_to(&path)?;
        }
        Ok(path)
    }

    /// Checks value ranges that parsing alone does not enforce.
    ///
    /// Runs after every load and again after command-line overrides.
    pub fn validate(&self) -> Result<(), ConfigFileError> {
        self.source_set()?;

        if self.grid.rows == 0 {
            return Err(ConfigFileError::invalid("grid", "rows", 0, "must be positive"));
        }
        if self.grid.cols == 0 {
            return Err(ConfigFileError::invalid("grid", "cols", 0, "must be positive"));
        }
        for (key, edge) in [("width", self.tile.width), ("height", self.tile.height)] {
            if edge == 0 || edge > MAX_TILE_EDGE {
                return Err(ConfigFileError::invalid(
                    "tile",
                    key,
                    edge,
                    format!("must be between 1 and {}", MAX_TILE_EDGE),
                ));
            }
        }
        if !(1..=100).contains(&self.output.jpeg_quality) {
            return Err(ConfigFileError::invalid(
                "output",
                "jpeg_quality",
                self.output.jpeg_quality,
                "must be between 1 and 100",
            ));
        }
        if self.download.timeout == 0 {
            return Err(ConfigFileError::invalid(
                "download",
                "timeout",
                0,
                "must be a positive integer (seconds)",
            ));
        }
        if self.download.parallel == 0 || self.download.parallel > MAX_CONCURRENT_LIMIT {
            return Err(ConfigFileError::invalid(
                "download",
                "parallel",
                self.download.parallel,
                format!("must be between 1 and {}", MAX_CONCURRENT_LIMIT),
            ));
        }
        Ok(())
    }

    /// Fails when the grid has fewer cells than the source range yields.
    pub fn validate_grid(&self) -> Result<(), ConfigFileError> {
        let sources = self.source_set()?.len();
        let grid = self.grid_shape()?;
        if grid.fits(sources) {
            return Ok(());
        }
        Err(ConfigFileError::invalid(
            "grid",
            "rows",
            format!("{}x{}", grid.rows(), grid.cols()),
            format!(
                "grid has {} cells but the source range yields {} images",
                grid.cell_count(),
                sources
            ),
        ))
    }

    /// The configured source range.
    pub fn source_set(&self) -> Result<SourceSet, ConfigFileError> {
        Ok(SourceSet::new(
            self.source.url_template.clone(),
            self.source.first,
            self.source.last,
        )?)
    }

    /// The configured grid shape.
    pub fn grid_shape(&self) -> Result<GridShape, ConfigFileError> {
        GridShape::new(self.grid.rows, self.grid.cols).ok_or_else(|| {
            ConfigFileError::invalid(
                "grid",
                "rows",
                format!("{}x{}", self.grid.rows, self.grid.cols),
                "rows and cols must be positive",
            )
        })
    }

    /// The configured tile size.
    pub fn tile_size(&self) -> Result<TileSize, ConfigFileError> {
        TileSize::new(self.tile.width, self.tile.height).ok_or_else(|| {
            ConfigFileError::invalid(
                "tile",
                "width",
                format!("{}x{}", self.tile.width, self.tile.height),
                format!("width and height must be between 1 and {}", MAX_TILE_EDGE),
            )
        })
    }
}

/// Get the path to the config directory (~/.tilemosaic).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".tilemosaic")
}

/// Get the path to the config file (~/.tilemosaic/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::OutputFormat;
    use crate::config::settings::DEFAULT_DOWNLOAD_TIMEOUT_SECS;

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();

        assert_eq!(config.source.first, 1);
        assert_eq!(config.source.last, 132);
        assert_eq!(config.grid.rows, 12);
        assert_eq!(config.grid.cols, 11);
        assert_eq!(config.tile.width, 32);
        assert_eq!(config.output.format, OutputFormat::Jpeg);
        assert_eq!(config.download.timeout, DEFAULT_DOWNLOAD_TIMEOUT_SECS);
        assert_eq!(config.server.listen.to_string(), "0.0.0.0:8000");
        assert!(config.logging.file.is_none());
        assert!(config.validate().is_ok());
        assert!(config.validate_grid().is_ok());
    }

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.ini");

        let config = ConfigFile::load_from(&config_path).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.source.url_template = "http://localhost/img/{id}.png".to_string();
        config.source.first = 5;
        config.source.last = 8;
        config.grid.rows = 2;
        config.grid.cols = 2;
        config.tile.width = 48;
        config.tile.height = 24;
        config.output.format = OutputFormat::Png;
        config.output.jpeg_quality = 70;
        config.download.timeout = 3;
        config.download.parallel = 4;
        config.server.listen = "127.0.0.1:9090".parse().unwrap();
        config.logging.level = "debug".to_string();
        config.logging.file = Some(temp_dir.path().join("tilemosaic.log"));

        config.save_to(&config_path).unwrap();
        let reloaded = ConfigFile::load_from(&config_path).unwrap();

        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let mut config = ConfigFile::default();
        config.download.parallel = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigFileError::InvalidValue { key, .. }) if key == "parallel"
        ));

        let mut config = ConfigFile::default();
        config.tile.height = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_values() {
        let mut config = ConfigFile::default();
        config.download.parallel = usize::MAX;
        assert!(matches!(
            config.validate(),
            Err(ConfigFileError::InvalidValue { key, .. }) if key == "parallel"
        ));

        let mut config = ConfigFile::default();
        config.tile.width = 70_000;
        assert!(matches!(
            config.validate(),
            Err(ConfigFileError::InvalidValue { key, .. }) if key == "width"
        ));
        assert!(config.tile_size().is_err());

        let mut config = ConfigFile::default();
        config.tile.height = MAX_TILE_EDGE;
        config.download.parallel = MAX_CONCURRENT_LIMIT;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_source_range() {
        let mut config = ConfigFile::default();
        config.source.first = 10;
        config.source.last = 9;
        assert!(matches!(
            config.validate(),
            Err(ConfigFileError::InvalidValue { section, .. }) if section == "source"
        ));
    }

    #[test]
    fn test_validate_grid_too_small() {
        let mut config = ConfigFile::default();
        config.grid.rows = 10;
        config.grid.cols = 10;

        let err = config.validate_grid().unwrap_err();
        assert!(err.to_string().contains("100 cells"));
        assert!(err.to_string().contains("132 images"));
    }
}
