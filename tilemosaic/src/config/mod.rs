//! Configuration loaded from `~/.tilemosaic/config.ini`.
//!
//! # Example
//!
//! ```no_run
//! use tilemosaic::config::ConfigFile;
//!
//! let config = ConfigFile::load()?;
//! let sources = config.source_set()?;
//! println!("{} sources into {}", sources.len(), config.grid_shape()?);
//! # Ok::<(), tilemosaic::config::ConfigFileError>(())
//! ```

mod file;
mod parser;
mod settings;
mod writer;

pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    default_listen_addr, ConfigFile, DownloadSettings, GridSettings, LoggingSettings,
    OutputSettings, ServerSettings, SourceSettings, TileSettings, DEFAULT_DOWNLOAD_TIMEOUT_SECS,
    DEFAULT_LISTEN_PORT, DEFAULT_LOG_LEVEL,
};
