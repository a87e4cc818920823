//! Infrastructure layer: snapshot persistence, the storage engine, config.

pub mod config;
pub mod snapshot;
pub mod storage;

pub use config::StorageConfig;
pub use snapshot::{
    FileSnapshotStore, InMemorySnapshotStore, SnapshotStore, StorageError, StorageResult,
};
pub use storage::{IdentityMap, ReloadOutcome, Storage};
