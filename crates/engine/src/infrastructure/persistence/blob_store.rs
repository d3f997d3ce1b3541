//! File-backed image blob store, one file per capture keyed by a fresh id.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use snaphunt_domain::ImageId;

use crate::application::ports::outbound::{BlobStorePort, PersistenceError};

const IMAGES_DIR: &str = "images";

pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            dir: data_dir.as_ref().join(IMAGES_DIR),
        }
    }

    fn path_for(&self, id: ImageId) -> PathBuf {
        self.dir.join(format!("{}.jpg", id))
    }
}

#[async_trait]
impl BlobStorePort for FileBlobStore {
    async fn put(&self, bytes: &[u8]) -> Result<ImageId, PersistenceError> {
        fs::create_dir_all(&self.dir).await?;
        let id = ImageId::new();
        fs::write(self.path_for(id), bytes).await?;
        Ok(id)
    }

    async fn get(&self, id: ImageId) -> Result<Option<Vec<u8>>, PersistenceError> {
        match fs::read(self.path_for(id)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(PersistenceError::ReadFailed(err.to_string())),
        }
    }
}
