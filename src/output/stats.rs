//! Crawl run statistics
//!
//! Counters kept by the coordinator while it walks the site, printed once the
//! run is over.

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// URLs claimed in the visited registry
    pub claimed: u64,

    /// Page nodes produced
    pub pages: u64,

    /// Links skipped because they were already visited
    pub already_visited: u64,

    /// Crawl steps refused because they were past the depth limit
    pub depth_skipped: u64,

    /// Claimed URLs whose render or extraction failed
    pub render_failed: u64,

    /// Claimed URLs that redirected onto an already visited page
    pub duplicates: u64,

    /// Snapshot writes that succeeded
    pub snapshots_written: u64,

    /// Snapshot writes that failed
    pub snapshot_failures: u64,
}

impl CrawlStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Percentage of claimed URLs that produced a page
    pub fn success_rate(&self) -> f64 {
        if self.claimed == 0 {
            return 0.0;
        }
        (self.pages as f64 / self.claimed as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStats) {
    println!("=== Crawl Statistics ===\n");

    println!("Pages:");
    println!("  Claimed: {}", stats.claimed);
    println!("  Produced: {}", stats.pages);
    println!("  Render failures: {}", stats.render_failed);
    println!("  Redirect duplicates: {}", stats.duplicates);
    println!();

    println!("Links skipped:");
    println!("  Already visited: {}", stats.already_visited);
    println!("  Beyond max depth: {}", stats.depth_skipped);
    println!();

    println!("Snapshots:");
    println!("  Written: {}", stats.snapshots_written);
    println!("  Failed: {}", stats.snapshot_failures);
    println!();

    println!(
        "Success Rate: {:.1}% ({} / {} claimed pages rendered)",
        stats.success_rate(),
        stats.pages,
        stats.claimed
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_rate() {
        let stats = CrawlStats {
            claimed: 8,
            pages: 6,
            render_failed: 2,
            ..CrawlStats::default()
        };
        assert!((stats.success_rate() - 75.0).abs() < 0.01);
    }

    #[test]
    fn test_success_rate_zero_pages() {
        assert_eq!(CrawlStats::new().success_rate(), 0.0);
    }
}
