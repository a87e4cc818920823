use std::sync::Arc;

use thiserror::Error;

/// Storage-layer error.
///
/// Two families live here:
///
/// - **Integrity**: the snapshot exists but cannot be trusted (unparseable,
///   unknown discriminator, colliding keys). See [`StorageError::is_integrity`].
/// - **Operational**: I/O and serialization failures while reading or writing.
///
/// A missing snapshot is *not* an error; `SnapshotStore::read` returns `None`.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("snapshot I/O failed for {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt snapshot: {0}")]
    CorruptSnapshot(String),

    #[error("unknown type in snapshot: {0}")]
    UnknownType(String),

    #[error("duplicate key in identity map: {0}")]
    DuplicateKey(String),

    #[error("snapshot serialization failed: {0}")]
    Serialize(String),
}

impl StorageError {
    pub fn io(location: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            location: location.into(),
            source,
        }
    }

    /// True when the snapshot is present but unusable.
    pub fn is_integrity(&self) -> bool {
        matches!(
            self,
            StorageError::CorruptSnapshot(_)
                | StorageError::UnknownType(_)
                | StorageError::DuplicateKey(_)
        )
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Whole-snapshot persistence boundary.
///
/// Implementations hold exactly one aggregate snapshot document:
///
/// - `read` returns the full document, or `None` when no snapshot exists
/// - `write` replaces the full document (never a partial or delta write)
/// - `quarantine` moves an unusable document aside so a fresh one can be written
pub trait SnapshotStore {
    fn read(&self) -> StorageResult<Option<String>>;

    fn write(&self, contents: &str) -> StorageResult<()>;

    /// Move the current snapshot aside. Returns where it went, or `None` if
    /// there was nothing to move.
    fn quarantine(&self) -> StorageResult<Option<String>>;
}

impl<S> SnapshotStore for Arc<S>
where
    S: SnapshotStore + ?Sized,
{
    fn read(&self) -> StorageResult<Option<String>> {
        (**self).read()
    }

    fn write(&self, contents: &str) -> StorageResult<()> {
        (**self).write(contents)
    }

    fn quarantine(&self) -> StorageResult<Option<String>> {
        (**self).quarantine()
    }
}
