//! Snapshot persistence boundary.
//!
//! This module defines the storage-facing abstraction for reading and
//! replacing the single snapshot document, with file-backed and in-memory
//! implementations.

pub mod file;
pub mod in_memory;
pub mod r#trait;

pub use file::FileSnapshotStore;
pub use in_memory::InMemorySnapshotStore;
pub use r#trait::{SnapshotStore, StorageError, StorageResult};
