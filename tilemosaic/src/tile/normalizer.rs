//! Conversion of fetch outcomes into fixed-size tiles.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use super::sentinel::{generate_sentinel, Sentinel};
use super::types::{Tile, TileOutcome, TileSize, TileSource};
use crate::codec::{CodecError, ImageCodec, OutputFormat};

/// Errors that can occur while constructing a [`TileNormalizer`].
///
/// Normalization itself never fails; only preparing the sentinels can.
#[derive(Debug, Error)]
pub enum NormalizerError {
    /// A sentinel tile could not be encoded.
    #[error("Failed to encode {kind:?} sentinel tile: {source}")]
    Sentinel {
        kind: Sentinel,
        #[source]
        source: CodecError,
    },
}

/// Turns every [`TileOutcome`] into a [`Tile`].
///
/// Both sentinels are encoded once at construction and cloned on use.
pub struct TileNormalizer {
    codec: Arc<dyn ImageCodec>,
    size: TileSize,
    format: OutputFormat,
    not_found: Tile,
    error: Tile,
}

impl TileNormalizer {
    /// Creates a normalizer producing `size` tiles encoded as `format`.
    pub fn new(
        codec: Arc<dyn ImageCodec>,
        size: TileSize,
        format: OutputFormat,
    ) -> Result<Self, NormalizerError> {
        let sentinel = |kind| {
            generate_sentinel(codec.as_ref(), kind, size, format)
                .map_err(|source| NormalizerError::Sentinel { kind, source })
        };
        let not_found = sentinel(Sentinel::NotFound)?;
        let error = sentinel(Sentinel::Error)?;

        Ok(Self {
            codec,
            size,
            format,
            not_found,
            error,
        })
    }

    /// Tile dimensions produced.
    pub fn size(&self) -> TileSize {
        self.size
    }

    /// Encoding format produced.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Black tile used for missing sources.
    pub fn not_found_sentinel(&self) -> Tile {
        self.not_found.clone()
    }

    /// Blue tile used for failed sources.
    pub fn error_sentinel(&self) -> Tile {
        self.error.clone()
    }

    /// Normalizes one outcome. Total: always returns a tile.
    pub fn normalize(&self, outcome: TileOutcome) -> Tile {
        match outcome {
            TileOutcome::Success(bytes) => match self.reencode(&bytes) {
                Ok(tile) => tile,
                Err(e) => {
                    debug!(error = %e, bytes = bytes.len(), "Substituting error tile for undecodable image");
                    self.error_sentinel()
                }
            },
            TileOutcome::NotFound => {
                debug!("Substituting not-found tile for missing image");
                self.not_found_sentinel()
            }
            TileOutcome::TransientError(reason) => {
                debug!(reason = %reason, "Substituting error tile for failed fetch");
                self.error_sentinel()
            }
        }
    }

    fn reencode(&self, bytes: &[u8]) -> Result<Tile, CodecError> {
        let decoded = self.codec.decode(bytes)?;
        let (width, height) = self.size.dimensions();
        let resized = self.codec.resize(&decoded, width, height);
        let data = self.codec.encode(&resized, self.format)?;
        Ok(Tile::new(data, self.size, self.format, TileSource::Fetched))
    }
}
