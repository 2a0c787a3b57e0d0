//! Configuration module for chef-harvest
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every section is optional, so an empty file (or no file at all)
//! yields a working configuration for CodeChef.
//!
//! # Example
//!
//! ```no_run
//! use chef_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("chef-harvest.toml")).unwrap();
//! println!("Crawling {}", config.site.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, FetchConfig, OutputConfig, ResolverConfig, SiteConfig, UserAgentConfig,
    DEFAULT_ROOT_DIR_NAME,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
