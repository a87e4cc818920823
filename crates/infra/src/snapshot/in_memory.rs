use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use super::r#trait::{SnapshotStore, StorageError, StorageResult};

/// In-memory snapshot document.
///
/// Intended for tests/dev. Can be told to fail writes to exercise rollback.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    contents: RwLock<Option<String>>,
    quarantined: RwLock<Vec<String>>,
    fail_writes: AtomicBool,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing snapshot document.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: RwLock::new(Some(contents.into())),
            ..Self::default()
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.read().ok().and_then(|c| c.clone())
    }

    /// Documents moved aside by `quarantine`, oldest first.
    pub fn quarantined(&self) -> Vec<String> {
        self.quarantined
            .read()
            .map(|q| q.clone())
            .unwrap_or_default()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

fn poisoned() -> StorageError {
    StorageError::io(
        "memory",
        std::io::Error::other("snapshot lock poisoned"),
    )
}

impl SnapshotStore for InMemorySnapshotStore {
    fn read(&self) -> StorageResult<Option<String>> {
        let contents = self.contents.read().map_err(|_| poisoned())?;
        Ok(contents.clone())
    }

    fn write(&self, contents: &str) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::io(
                "memory",
                std::io::Error::new(std::io::ErrorKind::StorageFull, "write rejected"),
            ));
        }
        let mut slot = self.contents.write().map_err(|_| poisoned())?;
        *slot = Some(contents.to_string());
        Ok(())
    }

    fn quarantine(&self) -> StorageResult<Option<String>> {
        let mut slot = self.contents.write().map_err(|_| poisoned())?;
        let Some(doc) = slot.take() else {
            return Ok(None);
        };
        let mut quarantined = self.quarantined.write().map_err(|_| poisoned())?;
        quarantined.push(doc);
        Ok(Some(format!("memory#{}", quarantined.len())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_reads_none() {
        let store = InMemorySnapshotStore::new();
        assert_eq!(store.read().unwrap(), None);
        assert_eq!(store.quarantine().unwrap(), None);
    }

    #[test]
    fn write_replaces_contents() {
        let store = InMemorySnapshotStore::with_contents("{\"a\": 1}");
        store.write("{}").unwrap();
        assert_eq!(store.read().unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn failing_writes_leave_contents_alone() {
        let store = InMemorySnapshotStore::with_contents("{}");
        store.set_fail_writes(true);
        assert!(store.write("{\"x\": 1}").is_err());
        assert_eq!(store.contents().as_deref(), Some("{}"));
    }

    #[test]
    fn quarantine_moves_document_aside() {
        let store = InMemorySnapshotStore::with_contents("not json");
        assert_eq!(store.quarantine().unwrap().as_deref(), Some("memory#1"));
        assert_eq!(store.read().unwrap(), None);
        assert_eq!(store.quarantined(), ["not json"]);
    }
}
