//! Fetch types and errors

use thiserror::Error;

/// Transport-level failures of an HTTP request.
///
/// These never reach the caller of the pipeline: the fetcher folds every
/// variant into [`TileOutcome::TransientError`](crate::tile::TileOutcome).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request did not complete within the configured timeout.
    #[error("Timed out after {timeout_ms}ms fetching {url}")]
    Timeout { url: String, timeout_ms: u64 },

    /// Could not connect to the remote host.
    #[error("Connection failed for {url}: {reason}")]
    Connect { url: String, reason: String },

    /// Request failed for another reason (invalid URL, TLS, redirect loop).
    #[error("Request failed for {url}: {reason}")]
    Request { url: String, reason: String },

    /// Response started but the body could not be read.
    #[error("Failed to read response body from {url}: {reason}")]
    Body { url: String, reason: String },

    /// The HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),
}

/// Status and body of a completed HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response.
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }
}
