use crate::render::ResourceKind;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::time::Duration;
use url::Url;

/// Main configuration structure for Site-Snapshot, as read from TOML
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// URL the crawl starts from
    #[serde(rename = "seed-url", default)]
    pub seed_url: Option<String>,

    /// Maximum depth to crawl from the seed URL
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Per-page navigation timeout (milliseconds)
    #[serde(rename = "navigation-timeout", default = "default_navigation_timeout")]
    pub navigation_timeout: u64,

    /// Resource categories the renderer refuses to load
    #[serde(rename = "blocked-resources", default = "default_blocked_resources")]
    pub blocked_resources: Vec<ResourceKind>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            seed_url: None,
            max_depth: default_max_depth(),
            navigation_timeout: default_navigation_timeout(),
            blocked_resources: default_blocked_resources(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the `User-Agent` header value: `Name/Version`
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.crawler_name, self.crawler_version)
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the per-depth snapshot files are written to
    #[serde(default = "default_output_directory")]
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
        }
    }
}

fn default_max_depth() -> u32 {
    2
}

fn default_navigation_timeout() -> u64 {
    60_000
}

fn default_blocked_resources() -> Vec<ResourceKind> {
    ResourceKind::ALL.to_vec()
}

fn default_crawler_name() -> String {
    "site-snapshot".to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_output_directory() -> String {
    ".".to_string()
}

/// Immutable settings for one crawl run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    pub seed_url: Url,
    pub max_depth: u32,
    pub blocked_resource_kinds: BTreeSet<ResourceKind>,
    pub navigation_timeout: Duration,
}

impl CrawlConfig {
    /// Creates a crawl configuration with the default timeout and no blocked resources
    pub fn new(seed_url: Url, max_depth: u32) -> Self {
        Self {
            seed_url,
            max_depth,
            blocked_resource_kinds: BTreeSet::new(),
            navigation_timeout: Duration::from_millis(default_navigation_timeout()),
        }
    }

    pub fn with_blocked(mut self, kinds: impl IntoIterator<Item = ResourceKind>) -> Self {
        self.blocked_resource_kinds = kinds.into_iter().collect();
        self
    }

    pub fn with_navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }
}
