//! Tile normalization.
//!
//! Every fetched source becomes exactly one fixed-size encoded [`Tile`]:
//!
//! ```text
//! TileOutcome::Success(bytes) ──► decode ──► resize W×H ──► encode ──► Tile (Fetched)
//!                                   │ decode/encode error
//!                                   ▼
//! TileOutcome::TransientError ───────────────────────────────────────► blue sentinel
//! TileOutcome::NotFound ─────────────────────────────────────────────► black sentinel
//! ```
//!
//! [`TileNormalizer::normalize`] is total over [`TileOutcome`]; failures end
//! in a sentinel and never propagate further down the pipeline.

mod normalizer;
mod sentinel;
mod types;

pub use normalizer::{NormalizerError, TileNormalizer};
pub use sentinel::{generate_sentinel, Sentinel};
pub use types::{Tile, TileOutcome, TileSize, TileSource, DEFAULT_TILE_EDGE, MAX_TILE_EDGE};
