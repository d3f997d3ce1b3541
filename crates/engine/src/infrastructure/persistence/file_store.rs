//! File-backed snapshot store: one JSON document per session.
//!
//! Writes go to a temp file first and land with an atomic rename, so a crash
//! mid-write leaves the previous snapshot intact. A snapshot that fails to
//! decode is treated as absent - logged, never propagated as a crash.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::warn;

use snaphunt_domain::SessionSnapshot;

use crate::application::ports::outbound::{PersistenceError, SnapshotStorePort};

const SNAPSHOT_FILE: &str = "session.json";

pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(SNAPSHOT_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotStorePort for FileSnapshotStore {
    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), PersistenceError> {
        let json = serde_json::to_vec_pretty(snapshot)
            .map_err(|e| PersistenceError::Encoding(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &json).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    async fn load(&self) -> Result<Option<SessionSnapshot>, PersistenceError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(PersistenceError::ReadFailed(err.to_string())),
        };

        match serde_json::from_slice(&bytes) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "corrupt session snapshot; starting fresh"
                );
                Ok(None)
            }
        }
    }
}
