//! Site-Snapshot main entry point
//!
//! This is the command-line interface for the Site-Snapshot crawler.

use clap::Parser;
use site_snapshot::config::{build_crawl_config, load_config_with_hash, Config};
use site_snapshot::crawler::run_crawl;
use site_snapshot::output::print_statistics;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site-Snapshot: a depth-bounded website snapshotter
///
/// Crawls same-host links from a seed URL up to a maximum depth and writes
/// one JSON snapshot per depth (website_data_<depth>.txt).
#[derive(Parser, Debug)]
#[command(name = "site-snapshot")]
#[command(version)]
#[command(about = "A depth-bounded website snapshotter", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// URL to start crawling from
    #[arg(long, env = "URL_WEB_PAGE", value_name = "URL")]
    seed: Option<String>,

    /// Override the configured maximum crawl depth
    #[arg(long, value_name = "DEPTH")]
    max_depth: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if let Some(depth) = cli.max_depth {
        config.crawler.max_depth = depth;
    }

    if cli.dry_run {
        handle_dry_run(&config, cli.seed.as_deref())?;
    } else {
        handle_crawl(&config, cli.seed.as_deref(), cli.quiet).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_snapshot=info,warn"),
            1 => EnvFilter::new("site_snapshot=debug,info"),
            2 => EnvFilter::new("site_snapshot=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config, seed: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let crawl = build_crawl_config(config, seed)?;

    println!("=== Site-Snapshot Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed URL: {}", crawl.seed_url);
    println!("  Max depth: {}", crawl.max_depth);
    println!(
        "  Navigation timeout: {}ms",
        crawl.navigation_timeout.as_millis()
    );
    let blocked: Vec<&str> = crawl
        .blocked_resource_kinds
        .iter()
        .map(|kind| kind.as_str())
        .collect();
    println!("  Blocked resources: {}", blocked.join(", "));

    println!("\nUser Agent: {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);
    println!(
        "  Files: website_data_0.txt .. website_data_{}.txt",
        crawl.max_depth
    );

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: &Config,
    seed: Option<&str>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match run_crawl(config, seed).await {
        Ok(outcome) => {
            if outcome.root.is_none() {
                tracing::warn!("No snapshot written: the seed page could not be rendered");
            }
            if !quiet {
                print_statistics(&outcome.stats);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
