//! The fetch → normalize → compose pipeline behind one call.

use std::sync::Arc;

use tracing::info;

use super::config::ServiceConfig;
use super::error::ServiceError;
use crate::codec::{ImageCodec, ImageCrateCodec};
use crate::composer::{ComposeError, CompositeImage, GridComposer, GridShape};
use crate::fetch::{AsyncHttpClient, AsyncReqwestClient, TileFetcher};
use crate::orchestrator::{FetchOrchestrator, FetchStats};
use crate::source::SourceId;
use crate::tile::TileNormalizer;

/// A rendered composite together with the fetch statistics behind it.
#[derive(Debug, Clone)]
pub struct MosaicRender {
    pub composite: CompositeImage,
    pub stats: FetchStats,
}

/// Builds composite images from remote sources.
///
/// Callers supply identifiers and a grid and get back encoded bytes plus a
/// content type. Per-source failures show up as sentinel tiles; only
/// composition can fail the whole render.
pub struct MosaicService<C: AsyncHttpClient = AsyncReqwestClient> {
    config: ServiceConfig,
    orchestrator: FetchOrchestrator<C>,
    composer: Arc<GridComposer>,
}

impl MosaicService<AsyncReqwestClient> {
    /// Creates a service backed by a reqwest client.
    pub fn new(config: ServiceConfig) -> Result<Self, ServiceError> {
        let client = AsyncReqwestClient::with_timeout(config.timeout())?;
        Self::with_client(config, client)
    }
}

impl<C: AsyncHttpClient + 'static> MosaicService<C> {
    /// Creates a service around an existing HTTP client.
    pub fn with_client(config: ServiceConfig, client: C) -> Result<Self, ServiceError> {
        let codec: Arc<dyn ImageCodec> =
            Arc::new(ImageCrateCodec::new().with_jpeg_quality(config.jpeg_quality()));

        let normalizer = TileNormalizer::new(Arc::clone(&codec), config.tile_size(), config.format())?;
        let fetcher = TileFetcher::with_timeout(client, config.timeout());
        let orchestrator = FetchOrchestrator::new(Arc::new(fetcher), Arc::new(normalizer))
            .with_max_concurrent(config.max_concurrent());
        let composer = GridComposer::new(codec, config.tile_size(), config.format());

        Ok(Self {
            config,
            orchestrator,
            composer: Arc::new(composer),
        })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Renders `sources` into `grid`.
    pub async fn render(
        &self,
        sources: &[SourceId],
        grid: GridShape,
    ) -> Result<CompositeImage, ServiceError> {
        Ok(self.render_with_stats(sources, grid).await?.composite)
    }

    /// Renders the configured source range into the configured grid.
    pub async fn render_configured(&self) -> Result<CompositeImage, ServiceError> {
        let sources = self.config.sources().expand();
        self.render(&sources, self.config.grid()).await
    }

    /// Like [`MosaicService::render`], also returning fetch statistics.
    pub async fn render_with_stats(
        &self,
        sources: &[SourceId],
        grid: GridShape,
    ) -> Result<MosaicRender, ServiceError> {
        // Reject before issuing any request
        if !grid.fits(sources.len()) {
            return Err(ComposeError::GridTooSmall {
                grid,
                cells: grid.cell_count(),
                tiles: sources.len(),
            }
            .into());
        }

        let report = self.orchestrator.fetch_all(sources).await;
        let stats = report.stats;
        let tiles = report.tiles;

        let composer = Arc::clone(&self.composer);
        let composite = tokio::task::spawn_blocking(move || composer.compose(&tiles, grid))
            .await
            .map_err(|e| ServiceError::Join(e.to_string()))??;

        info!(
            grid = %grid,
            format = %composite.format(),
            bytes = composite.data().len(),
            stats = %stats,
            "Composite rendered"
        );

        Ok(MosaicRender { composite, stats })
    }
}
