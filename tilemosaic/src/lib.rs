//! TileMosaic - composite thumbnail grids from remote images
//!
//! This library fetches a set of remote images concurrently, normalizes each
//! one into a fixed-size tile, and composes the tiles into a single grid
//! image. Missing images become black tiles and failed ones blue tiles, so a
//! render always produces a complete grid.

pub mod codec;
pub mod composer;
pub mod config;
pub mod fetch;
pub mod logging;
pub mod orchestrator;
pub mod service;
pub mod source;
pub mod tile;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
