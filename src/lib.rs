//! chef-harvest: downloads a user's accepted CodeChef solutions
//!
//! This crate discovers every problem a user has solved, picks the best
//! accepted submission for each one, and writes that submission's source
//! to local storage.

pub mod config;
pub mod crawler;
pub mod model;
pub mod output;
pub mod site;
pub mod state;

use thiserror::Error;

/// Main error type for chef-harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for chef-harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, FetchOutcome, Fetcher, RetryPolicy};
pub use output::CrawlReport;
pub use state::ProblemOutcome;
