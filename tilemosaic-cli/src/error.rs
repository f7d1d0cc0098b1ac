//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and exit codes.

use std::fmt;
use std::io;
use std::net::SocketAddr;
use std::process;

use tilemosaic::config::ConfigFileError;
use tilemosaic::logging::LoggingError;
use tilemosaic::service::ServiceError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(LoggingError),
    /// Configuration error
    Config(String),
    /// Failed to create the tokio runtime
    Runtime(io::Error),
    /// Failed to create service
    ServiceCreation(ServiceError),
    /// Failed to render the composite
    Render(ServiceError),
    /// Failed to write output file
    FileWrite { path: String, error: io::Error },
    /// Failed to bind the listen address
    Bind { addr: SocketAddr, error: io::Error },
    /// HTTP server error
    Serve(io::Error),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Config(_) => {
                eprintln!();
                eprintln!("Check the config file or run 'tilemosaic config path' to locate it.");
            }
            CliError::Bind { .. } => {
                eprintln!();
                eprintln!("Another process may be using the port. Try --listen <addr:port>.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(e) => write!(f, "Failed to initialize logging: {}", e),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
            CliError::ServiceCreation(e) => write!(f, "Failed to create service: {}", e),
            CliError::Render(e) => write!(f, "Failed to render mosaic: {}", e),
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path, error)
            }
            CliError::Bind { addr, error } => write!(f, "Failed to listen on {}: {}", addr, error),
            CliError::Serve(e) => write!(f, "HTTP server error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::LoggingInit(e) => Some(e),
            CliError::Runtime(e) => Some(e),
            CliError::ServiceCreation(e) => Some(e),
            CliError::Render(e) => Some(e),
            CliError::FileWrite { error, .. } => Some(error),
            CliError::Bind { error, .. } => Some(error),
            CliError::Serve(e) => Some(e),
            CliError::Config(_) => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<ServiceError> for CliError {
    fn from(e: ServiceError) -> Self {
        CliError::Render(e)
    }
}
