use crate::config::types::{Config, CrawlConfig};
use crate::config::validation::{validate, validate_seed_url};
use crate::{ConfigError, ConfigResult};
use sha2::{Digest, Sha256};
use std::path::Path;
use std::time::Duration;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use site_snapshot::config::load_config;
///
/// let config = load_config(Path::new("snapshot.toml")).unwrap();
/// println!("Max depth: {}", config.crawler.max_depth);
/// ```
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so a snapshot can be traced back to the configuration
/// that produced it.
pub fn compute_config_hash(path: &Path) -> ConfigResult<String> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> ConfigResult<(Config, String)> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

/// Builds the immutable run configuration
///
/// `seed_override` (from the command line or the `URL_WEB_PAGE` environment
/// variable) wins over `crawler.seed-url`. A blank value counts as unset, so a
/// blank override falls back to the file. No non-blank seed at all is fatal.
pub fn build_crawl_config(
    config: &Config,
    seed_override: Option<&str>,
) -> ConfigResult<CrawlConfig> {
    let seed = [seed_override, config.crawler.seed_url.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .ok_or(ConfigError::MissingSeed)?;

    let seed_url = validate_seed_url(seed)?;

    Ok(CrawlConfig::new(seed_url, config.crawler.max_depth)
        .with_blocked(config.crawler.blocked_resources.iter().copied())
        .with_navigation_timeout(Duration::from_millis(config.crawler.navigation_timeout)))
}
