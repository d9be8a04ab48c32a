//! Configuration module for Site-Snapshot
//!
//! This module handles loading, parsing, and validating TOML configuration files,
//! and turning them into the immutable [`CrawlConfig`] a run works from.
//!
//! # Example
//!
//! ```no_run
//! use site_snapshot::config::{build_crawl_config, load_config};
//! use std::path::Path;
//!
//! let config = load_config(Path::new("snapshot.toml")).unwrap();
//! let crawl = build_crawl_config(&config, None).unwrap();
//! println!("Crawling {} to depth {}", crawl.seed_url, crawl.max_depth);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{Config, CrawlConfig, CrawlerConfig, OutputConfig, UserAgentConfig};

pub use parser::{build_crawl_config, compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate_seed_url;
