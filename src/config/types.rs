use serde::Deserialize;
use std::path::PathBuf;

/// Directory created under the home directory when no output root is configured
pub const DEFAULT_ROOT_DIR_NAME: &str = "CodechefCodes";

/// Main configuration structure for chef-harvest
///
/// Every section is optional; a missing section takes its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Which site to crawl
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL that profile, status and plain-text paths are joined onto
    #[serde(rename = "base-url")]
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.codechef.com".to_string(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "chef-harvest".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://github.com/chef-harvest/chef-harvest".to_string(),
            contact_email: "chef-harvest@users.noreply.github.com".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Format: CrawlerName/Version (+ContactURL; ContactEmail)
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Retry and timeout behaviour for every request
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Total attempts per fetch, including the first
    #[serde(rename = "max-attempts")]
    pub max_attempts: u32,

    /// Delay before the first attempt (milliseconds)
    #[serde(rename = "initial-delay-ms")]
    pub initial_delay_ms: u64,

    /// Amount the delay grows after every failed attempt (milliseconds)
    #[serde(rename = "delay-increment-ms")]
    pub delay_increment_ms: u64,

    /// HTTP statuses treated as a permanent access denial
    #[serde(rename = "denied-statuses")]
    pub denied_statuses: Vec<u16>,

    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay_ms: 100,
            delay_increment_ms: 1000,
            denied_statuses: vec![403],
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// History-page scanning limits
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Maximum number of history pages scanned per problem
    #[serde(rename = "max-pages")]
    pub max_pages: u32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_pages: crate::crawler::DEFAULT_MAX_PAGES,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory solutions are written below; `~/` is expanded
    #[serde(rename = "root-dir")]
    pub root_dir: Option<String>,

    /// Path to an optional markdown summary file
    #[serde(rename = "summary-path")]
    pub summary_path: Option<String>,
}

impl OutputConfig {
    /// Resolves the output root, defaulting to `~/CodechefCodes`
    pub fn resolve_root_dir(&self) -> PathBuf {
        match self.root_dir.as_deref() {
            Some(dir) => expand_home(dir),
            None => home_dir().join(DEFAULT_ROOT_DIR_NAME),
        }
    }
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => home_dir().join(rest),
        None if path == "~" => home_dir(),
        None => PathBuf::from(path),
    }
}
