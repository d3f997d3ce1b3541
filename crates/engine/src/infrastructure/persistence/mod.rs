//! Persistence adapters.

mod blob_store;
mod file_store;
mod memory_store;

pub use blob_store::FileBlobStore;
pub use file_store::FileSnapshotStore;
pub use memory_store::{MemoryBlobStore, MemorySnapshotStore};
