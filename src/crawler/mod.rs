//! Crawler module for discovering, resolving and downloading solutions
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry and backoff
//! - Profile discovery
//! - Best-submission resolution over paginated history
//! - Overall crawl coordination

mod coordinator;
mod discovery;
mod fetcher;
mod ranker;
mod resolver;

#[cfg(test)]
pub(crate) mod testing;

pub use coordinator::Coordinator;
pub use discovery::discover;
pub use fetcher::{
    build_http_client, FetchFailure, FetchOutcome, Fetcher, HttpFetcher, HttpTransport,
    RetryPolicy, Transport, TransportError, TransportResponse,
};
pub use ranker::{compare_submissions, rank};
pub use resolver::{ProblemResolver, Resolution, DEFAULT_MAX_PAGES};

use crate::config::Config;
use crate::output::CrawlReport;
use crate::HarvestError;

/// Runs a complete crawl for one user
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client from the configuration
/// 2. Read the user's profile and list solved problems
/// 3. Pick the best accepted submission for each problem
/// 4. Download and write every picked submission
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The crawl ran; per-problem failures are in the report
/// * `Err(HarvestError)` - The crawler could not be set up
pub async fn crawl(config: &Config, username: &str) -> Result<CrawlReport, HarvestError> {
    let coordinator = Coordinator::from_config(config)?;
    Ok(coordinator.run(username).await)
}
