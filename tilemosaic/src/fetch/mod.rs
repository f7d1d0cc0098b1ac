//! Remote image retrieval.
//!
//! [`TileFetcher`] issues one bounded HTTP GET per source and classifies the
//! result into a [`TileOutcome`](crate::tile::TileOutcome). The transport sits
//! behind [`AsyncHttpClient`] so the fetcher runs unchanged against a mock.
//!
//! ```ignore
//! use tilemosaic::fetch::{AsyncReqwestClient, TileFetcher};
//!
//! let client = AsyncReqwestClient::with_timeout(Duration::from_secs(5))?;
//! let fetcher = TileFetcher::with_timeout(client, Duration::from_secs(5));
//! let outcome = fetcher.fetch(&SourceId::new("https://example.com/1.jpeg")).await;
//! ```

mod fetcher;
mod http;
mod types;

pub use fetcher::{classify, TileFetcher};
pub use http::{AsyncHttpClient, AsyncReqwestClient, DEFAULT_TIMEOUT};
pub use types::{FetchError, HttpResponse};

#[cfg(test)]
pub use http::tests::{MockAsyncHttpClient, MockReply};
