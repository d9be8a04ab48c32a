//! Persistence sink trait and error types

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Durable destination for page snapshots
///
/// A write under an existing key replaces the previous payload.
#[allow(async_fn_in_trait)]
pub trait PersistenceSink {
    /// Writes a serialized payload under `key`
    ///
    /// # Arguments
    ///
    /// * `key` - The snapshot name (see [`snapshot_key`](crate::output::snapshot_key))
    /// * `payload` - The serialized snapshot
    async fn write(&self, key: &str, payload: &str) -> OutputResult<()>;
}
