//! Site-Snapshot: a depth-bounded website snapshotter
//!
//! This crate crawls a website from a seed URL, following same-host links up to
//! a maximum depth, extracting normalized page text, and persisting one JSON
//! snapshot per crawl depth.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod render;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Site-Snapshot operations
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Render error: {0}")]
    Render(#[from] render::RenderError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::PageState,
        to: state::PageState,
    },

    #[error("URL was never claimed: {0}")]
    NotClaimed(String),
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

    #[error("No seed URL configured (use --seed, URL_WEB_PAGE or crawler.seed-url)")]
    MissingSeed,
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Site-Snapshot operations
pub type Result<T> = std::result::Result<T, SnapshotError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::{Config, CrawlConfig};
pub use crawler::{run_crawl, Coordinator, CrawlOutcome, PageNode};
pub use render::{HttpRenderer, PageRenderer, RenderSession, ResourceKind};
pub use state::{PageState, VisitedRegistry};
