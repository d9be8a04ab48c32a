//! In-memory persistence sink

use crate::output::{OutputResult, PersistenceSink};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Records every write in order; handy for inspecting a run without touching disk
#[derive(Debug, Default)]
pub struct MemorySink {
    writes: Mutex<Vec<(String, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All writes so far, oldest first
    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Current payload per key, i.e. what a file-backed sink would hold
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.writes().into_iter().collect()
    }

    /// Latest payload written under `key`
    pub fn latest(&self, key: &str) -> Option<String> {
        self.writes()
            .into_iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, payload)| payload)
    }
}

impl PersistenceSink for MemorySink {
    async fn write(&self, key: &str, payload: &str) -> OutputResult<()> {
        // A panic elsewhere while holding the lock leaves the log itself intact
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((key.to_string(), payload.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_latest_write_wins() {
        let sink = MemorySink::new();
        sink.write("a", "1").await.unwrap();
        sink.write("b", "2").await.unwrap();
        sink.write("a", "3").await.unwrap();

        assert_eq!(sink.writes().len(), 3);
        assert_eq!(sink.latest("a").as_deref(), Some("3"));
        assert_eq!(sink.snapshot().len(), 2);
        assert_eq!(sink.snapshot()["a"], "3");
        assert_eq!(sink.latest("missing"), None);
    }

    #[tokio::test]
    async fn test_write_after_poisoned_lock_is_kept() {
        let sink = MemorySink::new();
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = sink.writes.lock().unwrap();
            panic!("holder panicked");
        }));
        assert!(sink.writes.is_poisoned());

        sink.write("website_data_0.txt", "{}").await.unwrap();

        assert_eq!(sink.latest("website_data_0.txt").as_deref(), Some("{}"));
    }
}
