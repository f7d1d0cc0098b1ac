//! Service error types.

use thiserror::Error;

use crate::composer::ComposeError;
use crate::fetch::FetchError;
use crate::tile::NormalizerError;

/// Errors surfaced by [`MosaicService`](super::MosaicService).
///
/// Individual fetch failures never appear here; they become sentinel tiles.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(#[from] FetchError),

    /// Sentinel tiles could not be encoded.
    #[error("Normalizer setup failed: {0}")]
    Normalizer(#[from] NormalizerError),

    /// Composite could not be built.
    #[error("Composition failed: {0}")]
    Compose(#[from] ComposeError),

    /// A blocking task panicked or was cancelled.
    #[error("Background task failed: {0}")]
    Join(String),
}
