//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization, runtime and service
//! creation so command handlers stay small.

use tilemosaic::config::ConfigFile;
use tilemosaic::logging::{init_logging, LoggingGuard};
use tilemosaic::service::{MosaicService, ServiceConfig};
use tokio::runtime::Runtime;
use tracing::info;

use crate::commands::common::ConfigOverrides;
use crate::error::CliError;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Keeps the log file writer alive while the runner exists
    _logging_guard: LoggingGuard,
    config: ConfigFile,
}

impl CliRunner {
    /// Load config (with overrides applied) and initialize logging.
    pub fn new(overrides: &ConfigOverrides) -> Result<Self, CliError> {
        let config = overrides.load()?;

        let logging_guard = init_logging(&config.logging.level, config.logging.file.as_deref())
            .map_err(CliError::LoggingInit)?;

        Ok(Self {
            _logging_guard: logging_guard,
            config,
        })
    }

    /// Get the effective configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!(version = tilemosaic::VERSION, command = command, "TileMosaic starting");
    }

    /// Build a multi-threaded tokio runtime.
    pub fn runtime(&self) -> Result<Runtime, CliError> {
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(CliError::Runtime)
    }

    /// Create the mosaic service from the effective configuration.
    ///
    /// Fails if the grid cannot hold the configured source range.
    pub fn create_service(&self) -> Result<MosaicService, CliError> {
        self.config.validate_grid()?;
        let service_config = ServiceConfig::from_config_file(&self.config)?;

        let service = MosaicService::new(service_config).map_err(CliError::ServiceCreation)?;
        let config = service.config();
        info!(
            sources = config.sources().len(),
            grid = %config.grid(),
            tile_size = %config.tile_size(),
            format = %config.format(),
            timeout_secs = config.timeout().as_secs(),
            max_concurrent = config.max_concurrent(),
            "Service created"
        );
        Ok(service)
    }
}
