//! Crawler module for depth-bounded site snapshots
//!
//! This module contains the core crawling logic:
//! - The page tree produced by a crawl
//! - Recursive, depth-first crawl coordination
//! - Wiring of the HTTP renderer and file sink for a complete run

mod coordinator;
mod node;

pub use coordinator::Coordinator;
pub use node::PageNode;

use crate::config::{build_crawl_config, Config};
use crate::output::{CrawlStats, FileSink};
use crate::render::HttpRenderer;
use crate::SnapshotError;

/// Result of a complete crawl run
#[derive(Debug)]
pub struct CrawlOutcome {
    /// The page tree, or `None` if the seed could not be rendered
    pub root: Option<PageNode>,
    pub stats: CrawlStats,
}

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Resolve the seed URL and build the run configuration
/// 2. Build the HTTP renderer
/// 3. Crawl depth-first from the seed
/// 4. Write one snapshot file per depth into the output directory
///
/// # Arguments
///
/// * `config` - The loaded configuration
/// * `seed_override` - Seed URL from the command line or environment, if any
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - The crawl ran; per-page failures are in the stats
/// * `Err(SnapshotError)` - Configuration or renderer setup failed
///
/// # Example
///
/// ```no_run
/// use site_snapshot::config::Config;
/// use site_snapshot::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let outcome = run_crawl(&Config::default(), Some("https://example.com/")).await?;
/// println!("{} pages", outcome.stats.pages);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(
    config: &Config,
    seed_override: Option<&str>,
) -> Result<CrawlOutcome, SnapshotError> {
    let crawl_config = build_crawl_config(config, seed_override)?;
    let renderer = HttpRenderer::new(&config.user_agent)?;
    let sink = FileSink::new(&config.output.directory);

    let mut coordinator = Coordinator::new(crawl_config, renderer, sink);
    let root = coordinator.run().await;
    let (_, stats) = coordinator.into_parts();

    Ok(CrawlOutcome { root, stats })
}
