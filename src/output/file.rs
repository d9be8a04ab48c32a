//! File-backed persistence sink

use crate::output::{OutputResult, PersistenceSink};
use std::path::{Path, PathBuf};

/// Writes each snapshot to `<directory>/<key>`
#[derive(Debug, Clone)]
pub struct FileSink {
    directory: PathBuf,
}

impl FileSink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Full path a key is written to
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.directory.join(key)
    }
}

impl PersistenceSink for FileSink {
    async fn write(&self, key: &str, payload: &str) -> OutputResult<()> {
        tokio::fs::create_dir_all(&self.directory).await?;
        let path = self.path_for(key);
        tokio::fs::write(&path, payload).await?;
        tracing::info!("Snapshot saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("nested/out"));

        sink.write("website_data_0.txt", "{}").await.unwrap();

        let written = std::fs::read_to_string(sink.path_for("website_data_0.txt")).unwrap();
        assert_eq!(written, "{}");
    }

    #[tokio::test]
    async fn test_write_overwrites_key() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path());

        sink.write("website_data_1.txt", "first").await.unwrap();
        sink.write("website_data_1.txt", "second").await.unwrap();

        let written = std::fs::read_to_string(dir.path().join("website_data_1.txt")).unwrap();
        assert_eq!(written, "second");
    }

    #[tokio::test]
    async fn test_write_failure_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();

        let sink = FileSink::new(&blocker);
        assert!(sink.write("website_data_0.txt", "{}").await.is_err());
    }
}
