//! Single-image fetch with outcome classification.

use std::time::Duration;

use tracing::{debug, warn};

use super::http::{AsyncHttpClient, DEFAULT_TIMEOUT};
use super::types::{FetchError, HttpResponse};
use crate::source::SourceId;
use crate::tile::TileOutcome;

/// Status treated as a successful fetch.
const STATUS_OK: u16 = 200;

/// Status treated as an explicitly missing image.
const STATUS_NOT_FOUND: u16 = 404;

/// Maps a completed HTTP response to a [`TileOutcome`].
///
/// - 200 with a body → `Success`
/// - 404 → `NotFound`
/// - anything else, including 200 with an empty body → `TransientError`
pub fn classify(response: HttpResponse) -> TileOutcome {
    match response.status {
        STATUS_OK if !response.body.is_empty() => TileOutcome::Success(response.body),
        STATUS_OK => TileOutcome::TransientError("HTTP 200 with empty body".to_string()),
        STATUS_NOT_FOUND => TileOutcome::NotFound,
        status => TileOutcome::TransientError(format!("HTTP {}", status)),
    }
}

/// Fetches one source image and classifies the result.
///
/// Makes exactly one attempt per call. The timeout bounds the whole call,
/// independent of any timeout inside the client.
pub struct TileFetcher<C: AsyncHttpClient> {
    client: C,
    timeout: Duration,
}

impl<C: AsyncHttpClient> TileFetcher<C> {
    /// Creates a fetcher with the default timeout.
    pub fn new(client: C) -> Self {
        Self::with_timeout(client, DEFAULT_TIMEOUT)
    }

    /// Creates a fetcher with a custom timeout.
    pub fn with_timeout(client: C, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Per-fetch timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[cfg(test)]
    pub(crate) fn client(&self) -> &C {
        &self.client
    }

    /// Fetches `source`, never failing outward.
    pub async fn fetch(&self, source: &SourceId) -> TileOutcome {
        let url = source.as_str();

        let result = match tokio::time::timeout(self.timeout, self.client.get(url)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout {
                url: url.to_string(),
                timeout_ms: self.timeout.as_millis() as u64,
            }),
        };

        match result {
            Ok(response) => {
                let status = response.status;
                let outcome = classify(response);
                debug!(url = url, status = status, outcome = outcome.label(), "Fetch classified");
                outcome
            }
            Err(e) => {
                warn!(url = url, error = %e, "Fetch failed");
                TileOutcome::TransientError(e.to_string())
            }
        }
    }
}
