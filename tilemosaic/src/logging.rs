//! Logging infrastructure for TileMosaic.
//!
//! Structured `tracing` output to stdout, optionally mirrored to a log file
//! (cleared on start). `RUST_LOG` overrides the configured level.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log file or its directory could not be prepared.
    #[error("Failed to prepare log file {path}: {source}")]
    File {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The level string is not a valid filter directive.
    #[error("Invalid log level '{0}'")]
    InvalidLevel(String),

    /// A global subscriber is already installed.
    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard flushes and closes the log file writer.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize logging.
///
/// Installs a stdout layer and, when `log_file` is given, a non-blocking
/// file layer without ANSI colors.
///
/// # Errors
///
/// Fails if the level is invalid, the log file cannot be created, or a
/// global subscriber already exists.
pub fn init_logging(level: &str, log_file: Option<&Path>) -> Result<LoggingGuard, LoggingError> {
    let env_filter = build_filter(level)?;

    let (file_layer, file_guard) = match log_file {
        Some(path) => {
            prepare_log_file(path)?;
            let file_name = path.file_name().unwrap_or(path.as_os_str());
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// `RUST_LOG` when set, otherwise `level`.
fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|_| LoggingError::InvalidLevel(level.to_string()))
}

/// Creates the parent directory and truncates the file.
fn prepare_log_file(path: &Path) -> Result<(), LoggingError> {
    let to_error = |source: io::Error| LoggingError::File {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_error)?;
    }
    fs::write(path, "").map_err(to_error)
}
