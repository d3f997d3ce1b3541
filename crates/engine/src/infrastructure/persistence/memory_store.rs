//! In-memory store implementations for development and testing
//!
//! These do not persist data across process restarts and are suitable for
//! tests and development only.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use snaphunt_domain::{ImageId, SessionSnapshot};

use crate::application::ports::outbound::{BlobStorePort, PersistenceError, SnapshotStorePort};

/// In-memory snapshot store
#[derive(Default)]
pub struct MemorySnapshotStore {
    snapshot: Arc<RwLock<Option<SessionSnapshot>>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-load a snapshot, as if a previous run had saved it.
    pub fn with_snapshot(snapshot: SessionSnapshot) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(Some(snapshot))),
        }
    }
}

#[async_trait]
impl SnapshotStorePort for MemorySnapshotStore {
    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), PersistenceError> {
        *self.snapshot.write().await = Some(snapshot.clone());
        Ok(())
    }

    async fn load(&self) -> Result<Option<SessionSnapshot>, PersistenceError> {
        Ok(self.snapshot.read().await.clone())
    }
}

/// In-memory blob store
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: Arc<RwLock<HashMap<ImageId, Vec<u8>>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStorePort for MemoryBlobStore {
    async fn put(&self, bytes: &[u8]) -> Result<ImageId, PersistenceError> {
        let id = ImageId::new();
        self.blobs.write().await.insert(id, bytes.to_vec());
        Ok(id)
    }

    async fn get(&self, id: ImageId) -> Result<Option<Vec<u8>>, PersistenceError> {
        Ok(self.blobs.read().await.get(&id).cloned())
    }
}
