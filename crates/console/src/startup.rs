//! Startup: populate the identity map before the first prompt.

use hbnb_core::ModelRegistry;
use hbnb_infra::{ReloadOutcome, SnapshotStore, Storage, StorageError, StorageResult};

/// What happened to the snapshot at startup.
#[derive(Debug)]
pub enum Startup {
    /// No snapshot yet; the store starts empty.
    Fresh,
    /// The snapshot was loaded.
    Loaded(usize),
    /// The snapshot was unusable and moved aside; the store starts empty.
    Quarantined {
        reason: StorageError,
        moved_to: Option<String>,
    },
}

/// Reload the snapshot. An integrity failure quarantines the file and
/// starts empty; an I/O failure is returned.
pub fn load<S: SnapshotStore>(
    storage: &mut Storage<S>,
    registry: &ModelRegistry,
) -> StorageResult<Startup> {
    match storage.reload(registry) {
        Ok(ReloadOutcome::NoSnapshot) => Ok(Startup::Fresh),
        Ok(ReloadOutcome::Loaded(count)) => Ok(Startup::Loaded(count)),
        Err(reason) if reason.is_integrity() => {
            let moved_to = storage.snapshot_store().quarantine()?;
            tracing::warn!(
                error = %reason,
                moved_to = moved_to.as_deref().unwrap_or("-"),
                "snapshot unusable; quarantined and starting empty"
            );
            Ok(Startup::Quarantined { reason, moved_to })
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use hbnb_core::models;
    use hbnb_infra::InMemorySnapshotStore;

    #[test]
    fn missing_snapshot_is_fresh() {
        let mut storage = Storage::new(InMemorySnapshotStore::new());
        assert!(matches!(load(&mut storage, &models::registry()), Ok(Startup::Fresh)));
    }

    #[test]
    fn corrupt_snapshot_is_quarantined() {
        let snapshot = Arc::new(InMemorySnapshotStore::with_contents("not json"));
        let mut storage = Storage::new(snapshot.clone());

        let startup = load(&mut storage, &models::registry()).unwrap();
        match startup {
            Startup::Quarantined { reason, moved_to } => {
                assert!(matches!(reason, StorageError::CorruptSnapshot(_)));
                assert_eq!(moved_to.as_deref(), Some("memory#1"));
            }
            other => panic!("expected quarantine, got {other:?}"),
        }
        assert!(storage.all().is_empty());
        assert_eq!(snapshot.contents(), None);
        assert_eq!(snapshot.quarantined(), ["not json"]);
    }

    #[test]
    fn unknown_type_is_quarantined() {
        let doc = r#"{"Flight.1": {"id": "1", "__class__": "Flight"}}"#;
        let mut storage = Storage::new(InMemorySnapshotStore::with_contents(doc));
        assert!(matches!(
            load(&mut storage, &models::registry()),
            Ok(Startup::Quarantined { reason: StorageError::UnknownType(_), .. })
        ));
    }
}
