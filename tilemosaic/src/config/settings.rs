//! Settings structs for each configuration section.
//!
//! Each struct represents one `[section]` of the INI config file.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::PathBuf;

use crate::codec::{OutputFormat, DEFAULT_JPEG_QUALITY};
use crate::composer::{DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS};
use crate::orchestrator::DEFAULT_MAX_CONCURRENT;
use crate::source::{DEFAULT_FIRST_ID, DEFAULT_LAST_ID, DEFAULT_URL_TEMPLATE};
use crate::tile::DEFAULT_TILE_EDGE;

/// Default per-fetch timeout in seconds.
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 10;

/// Default server port.
pub const DEFAULT_LISTEN_PORT: u16 = 8000;

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default listen address, `0.0.0.0:8000`.
pub fn default_listen_addr() -> SocketAddr {
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, DEFAULT_LISTEN_PORT))
}

/// Complete configuration loaded from config.ini.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    /// Source image range
    pub source: SourceSettings,
    /// Composite grid shape
    pub grid: GridSettings,
    /// Tile dimensions
    pub tile: TileSettings,
    /// Composite encoding
    pub output: OutputSettings,
    /// Fetch behavior
    pub download: DownloadSettings,
    /// HTTP server
    pub server: ServerSettings,
    /// Logging
    pub logging: LoggingSettings,
}

/// `[source]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSettings {
    /// URL template containing `{id}`
    pub url_template: String,
    /// First identifier, inclusive
    pub first: u32,
    /// Last identifier, inclusive
    pub last: u32,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            first: DEFAULT_FIRST_ID,
            last: DEFAULT_LAST_ID,
        }
    }
}

/// `[grid]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSettings {
    pub rows: u32,
    pub cols: u32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            rows: DEFAULT_GRID_ROWS,
            cols: DEFAULT_GRID_COLS,
        }
    }
}

/// `[tile]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSettings {
    pub width: u32,
    pub height: u32,
}

impl Default for TileSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_TILE_EDGE,
            height: DEFAULT_TILE_EDGE,
        }
    }
}

/// `[output]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSettings {
    /// Encoding of tiles and the composite
    pub format: OutputFormat,
    /// JPEG quality, 1..=100
    pub jpeg_quality: u8,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// `[download]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadSettings {
    /// Per-fetch timeout in seconds
    pub timeout: u64,
    /// Maximum concurrent fetches
    pub parallel: usize,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_DOWNLOAD_TIMEOUT_SECS,
            parallel: DEFAULT_MAX_CONCURRENT,
        }
    }
}

/// `[server]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerSettings {
    pub listen: SocketAddr,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen: default_listen_addr(),
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Level filter, overridden by `RUST_LOG`
    pub level: String,
    /// Optional log file; stdout only when unset
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            file: None,
        }
    }
}
