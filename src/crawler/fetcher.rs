//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - The `Transport` seam between the retry loop and the network
//! - The retry policy (attempt limit, growing delay, denied statuses)
//! - Classifying every fetch as a page, a denial, or unavailable

use crate::config::{FetchConfig, UserAgentConfig};
use async_trait::async_trait;
use reqwest::Client;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Failures below the HTTP status level
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("failed to read response body from {url}: {message}")]
    Body { url: String, message: String },
}

/// Status and body of one HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,

    /// Response body; empty for non-success statuses
    pub body: String,
}

/// Performs a single GET, with no retries of its own
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError>;
}

/// `Transport` backed by a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::Request {
                url: url.to_string(),
                message: describe_request_error(&e),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Ok(TransportResponse {
                status: status.as_u16(),
                body: String::new(),
            });
        }

        let body = response.text().await.map_err(|e| TransportError::Body {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        Ok(TransportResponse {
            status: status.as_u16(),
            body,
        })
    }
}

fn describe_request_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timeout".to_string()
    } else if error.is_connect() {
        "connection refused".to_string()
    } else {
        error.to_string()
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `fetch` - Timeouts for each request
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    fetch: &FetchConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(fetch.request_timeout_secs))
        .connect_timeout(Duration::from_secs(fetch.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Retry behaviour for a single logical fetch
///
/// A delay is slept before every attempt. The delay before attempt `k`
/// (1-based) is `initial_delay + (k - 1) * delay_increment`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,

    pub initial_delay: Duration,

    pub delay_increment: Duration,

    /// Statuses that end the fetch immediately as `Denied`
    pub denied_statuses: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_millis(100),
            delay_increment: Duration::from_secs(1),
            denied_statuses: vec![403],
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &FetchConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            initial_delay: Duration::from_millis(config.initial_delay_ms),
            delay_increment: Duration::from_millis(config.delay_increment_ms),
            denied_statuses: config.denied_statuses.clone(),
        }
    }

    /// Delay slept before the given attempt (1-based)
    pub fn delay_before_attempt(&self, attempt: u32) -> Duration {
        self.initial_delay + self.delay_increment * attempt.saturating_sub(1)
    }

    pub fn is_denied(&self, status: u16) -> bool {
        self.denied_statuses.contains(&status)
    }

    /// Whether another attempt may follow the given failed one
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

/// Outcome of one logical fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The full decoded response body
    Page(String),

    /// The server refused access; retrying will not help
    Denied,

    /// No usable response: transport failure or retries exhausted
    Unavailable,
}

impl FetchOutcome {
    pub fn into_page(self) -> Option<String> {
        match self {
            Self::Page(body) => Some(body),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<FetchFailure> {
        match self {
            Self::Page(_) => None,
            Self::Denied => Some(FetchFailure::Denied),
            Self::Unavailable => Some(FetchFailure::Unavailable),
        }
    }
}

/// The two terminal fetch failures, for callers that record them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchFailure {
    Denied,
    Unavailable,
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Denied => write!(f, "access denied"),
            Self::Unavailable => write!(f, "site unavailable"),
        }
    }
}

/// Fetches URLs through a `Transport` under a `RetryPolicy`
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | HTTP 2xx | Immediate → Page |
/// | Denied status (403) | Immediate → Denied |
/// | Other status | Retry until `max_attempts`, then → Unavailable |
/// | Transport error | Immediate → Unavailable |
///
/// The fetcher keeps no state between calls, so one instance can serve any
/// number of sequential or concurrent fetches.
#[derive(Debug, Clone)]
pub struct Fetcher<T> {
    transport: T,
    policy: RetryPolicy,
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches a URL, retrying transient failures per the policy
    pub async fn fetch(&self, url: &str) -> FetchOutcome {
        let mut attempt = 0;

        loop {
            attempt += 1;
            tokio::time::sleep(self.policy.delay_before_attempt(attempt)).await;

            tracing::debug!(
                "GET {} (attempt {}/{})",
                url,
                attempt,
                self.policy.max_attempts
            );

            let response = match self.transport.get(url).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!("{}; the site looks unresponsive, giving up", e);
                    return FetchOutcome::Unavailable;
                }
            };

            if (200..300).contains(&response.status) {
                return FetchOutcome::Page(response.body);
            }

            if self.policy.is_denied(response.status) {
                tracing::info!("HTTP {} from {}: access denied", response.status, url);
                return FetchOutcome::Denied;
            }

            if !self.policy.should_retry(attempt) {
                tracing::warn!(
                    "HTTP {} from {}: giving up after {} attempts",
                    response.status,
                    url,
                    attempt
                );
                return FetchOutcome::Unavailable;
            }

            tracing::warn!(
                "HTTP {} from {}, retrying in {:?}",
                response.status,
                url,
                self.policy.delay_before_attempt(attempt + 1)
            );
        }
    }
}

/// Fetcher that talks to the real site
pub type HttpFetcher = Fetcher<HttpTransport>;
