//! High-level mosaic service.
//!
//! [`MosaicService`] wires the fetcher, normalizer, orchestrator and composer
//! together from a [`ServiceConfig`]:
//!
//! ```text
//! &[SourceId] ──► FetchOrchestrator ──► Vec<Tile> ──► GridComposer ──► CompositeImage
//!                  (async fan-out)                    (blocking pool)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use tilemosaic::service::{MosaicService, ServiceConfig};
//!
//! let service = MosaicService::new(ServiceConfig::default())?;
//! let composite = service.render_configured().await?;
//! std::fs::write("mosaic.jpg", composite.data())?;
//! ```

mod config;
mod error;
mod mosaic;

pub use config::ServiceConfig;
pub use error::ServiceError;
pub use mosaic::{MosaicRender, MosaicService};
