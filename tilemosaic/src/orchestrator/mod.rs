//! Fetch orchestration
//!
//! Runs fetch + normalize for every source concurrently and joins the
//! results back into input order.

mod fanout;
mod types;

pub use fanout::FetchOrchestrator;
pub use types::{FetchReport, FetchStats, DEFAULT_MAX_CONCURRENT, MAX_CONCURRENT_LIMIT};
