//! Concurrent fetch and normalization of a source list.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

use super::types::{FetchReport, FetchStats, DEFAULT_MAX_CONCURRENT, MAX_CONCURRENT_LIMIT};
use crate::fetch::{AsyncHttpClient, TileFetcher};
use crate::source::SourceId;
use crate::tile::{Tile, TileNormalizer, TileOutcome};

/// Fans fetch + normalize out over every source and joins the results.
///
/// Each source runs as its own task; the orchestrator waits for all of them
/// and writes each tile into the slot of its input index, so output order
/// never depends on completion order. A task that panics leaves its slot
/// empty and the slot is filled with the error sentinel.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use tilemosaic::fetch::{AsyncReqwestClient, TileFetcher};
/// use tilemosaic::orchestrator::FetchOrchestrator;
///
/// let fetcher = TileFetcher::new(AsyncReqwestClient::new()?);
/// let orchestrator = FetchOrchestrator::new(Arc::new(fetcher), Arc::new(normalizer));
/// let report = orchestrator.fetch_all(&sources).await;
/// assert_eq!(report.tiles.len(), sources.len());
/// ```
pub struct FetchOrchestrator<C: AsyncHttpClient> {
    fetcher: Arc<TileFetcher<C>>,
    normalizer: Arc<TileNormalizer>,
    max_concurrent: usize,
}

impl<C: AsyncHttpClient + 'static> FetchOrchestrator<C> {
    /// Creates an orchestrator with the default concurrency cap.
    pub fn new(fetcher: Arc<TileFetcher<C>>, normalizer: Arc<TileNormalizer>) -> Self {
        Self {
            fetcher,
            normalizer,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }

    /// Sets the maximum number of sources in flight at once, clamped to
    /// `1..=MAX_CONCURRENT_LIMIT`.
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.clamp(1, MAX_CONCURRENT_LIMIT);
        self
    }

    /// Maximum number of sources in flight at once.
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// The normalizer tiles are produced with.
    pub fn normalizer(&self) -> &Arc<TileNormalizer> {
        &self.normalizer
    }

    #[cfg(test)]
    pub(crate) fn fetcher(&self) -> &TileFetcher<C> {
        &self.fetcher
    }

    /// Fetches and normalizes every source.
    ///
    /// Always returns exactly `sources.len()` tiles, tile `i` derived only
    /// from source `i`.
    pub async fn fetch_all(&self, sources: &[SourceId]) -> FetchReport {
        let started = Instant::now();
        let permits = Arc::new(Semaphore::new(self.max_concurrent));
        let mut tasks = JoinSet::new();

        for (index, source) in sources.iter().cloned().enumerate() {
            let fetcher = Arc::clone(&self.fetcher);
            let normalizer = Arc::clone(&self.normalizer);
            let permits = Arc::clone(&permits);

            tasks.spawn(async move {
                // The semaphore is never closed
                let _permit = permits.acquire_owned().await.ok();
                let outcome = fetcher.fetch(&source).await;
                let tile = normalize_blocking(normalizer, outcome).await;
                (index, tile)
            });
        }

        let mut slots: Vec<Option<Tile>> = (0..sources.len()).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, tile)) => slots[index] = Some(tile),
                Err(e) => warn!(error = %e, "Tile task did not complete"),
            }
        }

        let tiles: Vec<Tile> = slots
            .into_iter()
            .map(|slot| slot.unwrap_or_else(|| self.normalizer.error_sentinel()))
            .collect();

        let stats = FetchStats::from_tiles(&tiles, started.elapsed());
        info!(
            total = stats.total,
            fetched = stats.fetched,
            not_found = stats.not_found,
            failed = stats.failed,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "Fetch fan-out complete"
        );

        FetchReport { tiles, stats }
    }
}

/// Runs CPU-bound decode/resize/encode off the async workers.
async fn normalize_blocking(normalizer: Arc<TileNormalizer>, outcome: TileOutcome) -> Tile {
    let worker = Arc::clone(&normalizer);
    match tokio::task::spawn_blocking(move || worker.normalize(outcome)).await {
        Ok(tile) => tile,
        Err(e) => {
            warn!(error = %e, "Normalization task failed");
            normalizer.error_sentinel()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use image::{Rgb, RgbImage};

    use crate::codec::{ImageCodec, ImageCrateCodec, OutputFormat};
    use crate::fetch::{FetchError, HttpResponse, MockAsyncHttpClient, MockReply};
    use crate::tile::{TileSize, TileSource};

    /// Answers 404 after a short pause and records the peak number of
    /// requests in flight.
    #[derive(Default)]
    struct InFlightClient {
        current: AtomicUsize,
        peak: AtomicUsize,
    }

    impl AsyncHttpClient for InFlightClient {
        async fn get(&self, _url: &str) -> Result<HttpResponse, FetchError> {
            let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.current.fetch_sub(1, Ordering::SeqCst);
            Ok(HttpResponse::new(404, Vec::new()))
        }
    }

    fn png(color: Rgb<u8>) -> Vec<u8> {
        ImageCrateCodec::new()
            .encode(&RgbImage::from_pixel(48, 48, color), OutputFormat::Png)
            .unwrap()
    }

    fn orchestrator(mock: MockAsyncHttpClient) -> FetchOrchestrator<MockAsyncHttpClient> {
        orchestrator_with(mock)
    }

    fn orchestrator_with<C: AsyncHttpClient + 'static>(client: C) -> FetchOrchestrator<C> {
        let normalizer = TileNormalizer::new(
            Arc::new(ImageCrateCodec::new()),
            TileSize::default(),
            OutputFormat::Png,
        )
        .unwrap();
        let fetcher = TileFetcher::with_timeout(client, Duration::from_millis(200));
        FetchOrchestrator::new(Arc::new(fetcher), Arc::new(normalizer))
    }

    fn center(tile: &Tile) -> Rgb<u8> {
        *ImageCrateCodec::new()
            .decode(tile.data())
            .unwrap()
            .get_pixel(16, 16)
    }

    fn assert_close(actual: Rgb<u8>, expected: Rgb<u8>) {
        let close = actual.0.iter().zip(expected.0).all(|(a, e)| a.abs_diff(e) <= 2);
        assert!(close, "expected ~{:?}, got {:?}", expected, actual);
    }

    fn sources(n: usize) -> Vec<SourceId> {
        (0..n).map(|i| SourceId::new(format!("http://img/{}", i))).collect()
    }

    #[tokio::test]
    async fn test_empty_input_gives_empty_output() {
        let report = orchestrator(MockAsyncHttpClient::new()).fetch_all(&[]).await;
        assert!(report.tiles.is_empty());
        assert_eq!(report.stats.total, 0);
    }

    #[tokio::test]
    async fn test_output_order_ignores_completion_order() {
        // Earlier indices finish last
        let colors = [Rgb([250, 0, 0]), Rgb([0, 250, 0]), Rgb([250, 250, 0]), Rgb([0, 250, 250])];
        let mut mock = MockAsyncHttpClient::new();
        for (i, color) in colors.iter().enumerate() {
            let delay = Duration::from_millis(40 * (colors.len() - i) as u64);
            mock = mock.reply(
                &format!("http://img/{}", i),
                MockReply::Delayed(delay, Box::new(MockReply::Respond(200, png(*color)))),
            );
        }

        let report = orchestrator(mock).fetch_all(&sources(4)).await;

        assert_eq!(report.tiles.len(), 4);
        for (tile, color) in report.tiles.iter().zip(colors) {
            assert_eq!(tile.source(), TileSource::Fetched);
            assert_close(center(tile), color);
        }
    }

    #[tokio::test]
    async fn test_failures_are_isolated() {
        let mock = MockAsyncHttpClient::new()
            .reply("http://img/0", MockReply::Respond(200, png(Rgb([9, 99, 199]))))
            .reply("http://img/1", MockReply::Respond(404, vec![]))
            .reply(
                "http://img/2",
                MockReply::Delayed(Duration::from_secs(30), Box::new(MockReply::Respond(200, vec![1]))),
            )
            .reply("http://img/3", MockReply::Respond(200, b"not an image".to_vec()))
            .reply("http://img/4", MockReply::Respond(500, vec![]));

        let report = orchestrator(mock).fetch_all(&sources(5)).await;

        let kinds: Vec<_> = report.tiles.iter().map(|t| t.source()).collect();
        assert_eq!(
            kinds,
            vec![
                TileSource::Fetched,
                TileSource::NotFound,
                TileSource::Failed,
                TileSource::Failed,
                TileSource::Failed,
            ]
        );
        assert_close(center(&report.tiles[0]), Rgb([9, 99, 199]));
        assert_eq!(center(&report.tiles[1]), Rgb([0, 0, 0]));
        assert_eq!(center(&report.tiles[2]), Rgb([0, 0, 255]));
        assert_eq!(report.stats.fetched, 1);
        assert_eq!(report.stats.not_found, 1);
        assert_eq!(report.stats.failed, 3);
    }

    #[tokio::test]
    async fn test_every_source_fetched_once() {
        let mock = MockAsyncHttpClient::new();
        let orchestrator = orchestrator(mock).with_max_concurrent(3);

        let report = orchestrator.fetch_all(&sources(20)).await;

        assert_eq!(report.tiles.len(), 20);
        assert_eq!(report.stats.not_found, 20);
        assert_eq!(orchestrator.fetcher().client().calls(), 20);
    }

    #[tokio::test]
    async fn test_concurrency_cap_minimum_is_one() {
        let orchestrator = orchestrator(MockAsyncHttpClient::new()).with_max_concurrent(0);
        assert_eq!(orchestrator.max_concurrent(), 1);
    }

    #[tokio::test]
    async fn test_oversized_cap_is_clamped() {
        let orchestrator = orchestrator(MockAsyncHttpClient::new()).with_max_concurrent(usize::MAX);
        assert_eq!(orchestrator.max_concurrent(), MAX_CONCURRENT_LIMIT);

        let report = orchestrator.fetch_all(&sources(3)).await;
        assert_eq!(report.tiles.len(), 3);
        assert_eq!(report.stats.not_found, 3);
    }

    #[tokio::test]
    async fn test_fetches_run_concurrently() {
        let orchestrator = orchestrator_with(InFlightClient::default());

        let report = orchestrator.fetch_all(&sources(10)).await;

        assert_eq!(report.stats.not_found, 10);
        assert!(orchestrator.fetcher().client().peak.load(Ordering::SeqCst) > 1);
    }

    #[tokio::test]
    async fn test_in_flight_requests_respect_cap() {
        let orchestrator = orchestrator_with(InFlightClient::default()).with_max_concurrent(3);

        let report = orchestrator.fetch_all(&sources(12)).await;

        assert_eq!(report.tiles.len(), 12);
        assert!(orchestrator.fetcher().client().peak.load(Ordering::SeqCst) <= 3);
    }
}
