//! Orchestrator types

use std::fmt;
use std::time::Duration;

use crate::tile::{Tile, TileSource};

/// Default cap on concurrently running fetches.
pub const DEFAULT_MAX_CONCURRENT: usize = 64;

/// Largest accepted concurrency cap; the semaphore cannot hold more permits.
pub const MAX_CONCURRENT_LIMIT: usize = tokio::sync::Semaphore::MAX_PERMITS;

/// Statistics about one fan-out run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchStats {
    /// Number of sources requested
    pub total: usize,
    /// Tiles built from real image content
    pub fetched: usize,
    /// Black sentinels (source reported missing)
    pub not_found: usize,
    /// Blue sentinels (transient, decode or task failure)
    pub failed: usize,
    /// Wall-clock time of the run
    pub elapsed: Duration,
}

impl FetchStats {
    /// Tallies the tiles of a finished run.
    pub fn from_tiles(tiles: &[Tile], elapsed: Duration) -> Self {
        let mut stats = Self {
            total: tiles.len(),
            elapsed,
            ..Self::default()
        };
        for tile in tiles {
            match tile.source() {
                TileSource::Fetched => stats.fetched += 1,
                TileSource::NotFound => stats.not_found += 1,
                TileSource::Failed => stats.failed += 1,
            }
        }
        stats
    }
}

impl fmt::Display for FetchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} sources: {} fetched, {} not found, {} failed in {:.2}s",
            self.total,
            self.fetched,
            self.not_found,
            self.failed,
            self.elapsed.as_secs_f64()
        )
    }
}

/// Ordered tiles plus statistics of a fan-out run.
#[derive(Debug, Clone)]
pub struct FetchReport {
    /// One tile per input source, in input order.
    pub tiles: Vec<Tile>,
    /// Run statistics.
    pub stats: FetchStats,
}
