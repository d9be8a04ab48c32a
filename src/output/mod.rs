//! Output module for persisting crawl snapshots
//!
//! This module handles:
//! - The persistence sink interface and its file and in-memory implementations
//! - Depth-scoped snapshot keys and JSON rendering of page trees
//! - Run statistics

mod file;
mod memory;
pub mod stats;
mod traits;

pub use file::FileSink;
pub use memory::MemorySink;
pub use stats::{print_statistics, CrawlStats};
pub use traits::{OutputError, OutputResult, PersistenceSink};

use serde::Serialize;

/// Returns the persistence key for a crawl depth
///
/// Keys depend on depth alone: every page crawled at the same depth writes to
/// the same key, so only the last one written at each depth survives.
pub fn snapshot_key(depth: u32) -> String {
    format!("website_data_{}.txt", depth)
}

/// Renders a snapshot as indented JSON
pub fn serialize_snapshot<T: Serialize>(snapshot: &T) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_key() {
        assert_eq!(snapshot_key(0), "website_data_0.txt");
        assert_eq!(snapshot_key(12), "website_data_12.txt");
    }

    #[test]
    fn test_serialize_snapshot_is_indented() {
        #[derive(Serialize)]
        struct Sample {
            title: &'static str,
        }

        let json = serialize_snapshot(&Sample { title: "Home" }).unwrap();
        assert_eq!(json, "{\n  \"title\": \"Home\"\n}");
    }
}
