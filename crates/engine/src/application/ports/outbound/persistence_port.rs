//! Persistence Ports - durable snapshot and image blob storage.
//!
//! Durability is best-effort: writes are fire-and-forget from the engine's
//! perspective, failures are logged and retried on the next save trigger.
//! Loads must never crash on corrupt data; they degrade to "no saved state".

use async_trait::async_trait;
use thiserror::Error;

use snaphunt_domain::{ImageId, SessionSnapshot};

/// Errors from the persistence boundary
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Encoding failed: {0}")]
    Encoding(String),
}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        Self::WriteFailed(err.to_string())
    }
}

/// Port for storing the complete session snapshot.
#[async_trait]
pub trait SnapshotStorePort: Send + Sync {
    /// Persist a consistent point-in-time snapshot. Concurrent saves need
    /// not serialize strictly; the last completed write wins.
    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), PersistenceError>;

    /// Load the last saved snapshot. Absent on first launch; corrupt data
    /// degrades to `Ok(None)`, never an error.
    async fn load(&self) -> Result<Option<SessionSnapshot>, PersistenceError>;
}

/// Port for image blobs, keyed by an id generated at store time. Identical
/// images get distinct ids; no deduplication.
#[async_trait]
pub trait BlobStorePort: Send + Sync {
    async fn put(&self, bytes: &[u8]) -> Result<ImageId, PersistenceError>;

    async fn get(&self, id: ImageId) -> Result<Option<Vec<u8>>, PersistenceError>;
}
