//! Storage engine: the identity map of live entities plus whole-snapshot
//! persistence.
//!
//! ## Lifecycle
//!
//! ```text
//! startup
//!   ↓
//! reload()   snapshot → parse → hydrate each record → identity map
//!   ↓
//! commands   mutate the map, then save()  (map → serialize → replace snapshot)
//! ```
//!
//! The map is keyed by `<TypeName>.<id>`. Saves always rewrite the whole
//! snapshot; there are no delta writes. A reload builds a complete new map
//! before swapping it in, so a failed reload never leaves a half-populated
//! store.

use indexmap::IndexMap;
use serde_json::{Map, Value as JsonValue};

use hbnb_core::entity::CLASS_KEY;
use hbnb_core::{Entity, EntityStore, ModelRegistry};

use crate::snapshot::{SnapshotStore, StorageError, StorageResult};

/// Identity map: `<TypeName>.<id>` → live entity, in insertion order.
pub type IdentityMap = IndexMap<String, Entity>;

/// Outcome of [`Storage::reload`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// No snapshot exists; the map was left as it was.
    NoSnapshot,
    /// The map was replaced by this many hydrated entities.
    Loaded(usize),
}

/// Authoritative in-memory store backed by a [`SnapshotStore`].
#[derive(Debug)]
pub struct Storage<S> {
    objects: IdentityMap,
    snapshot: S,
}

impl<S> Storage<S> {
    pub fn new(snapshot: S) -> Self {
        Self {
            objects: IdentityMap::new(),
            snapshot,
        }
    }

    /// The live identity map.
    pub fn all(&self) -> &IdentityMap {
        &self.objects
    }

    /// Mutable access to the live identity map.
    pub fn all_mut(&mut self) -> &mut IdentityMap {
        &mut self.objects
    }

    pub fn get(&self, key: &str) -> Option<&Entity> {
        self.objects.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Entity> {
        self.objects.get_mut(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.contains_key(key)
    }

    /// Insert an entity under its own key. A colliding key is an
    /// internal-consistency error and leaves the map unchanged.
    pub fn register(&mut self, entity: Entity) -> StorageResult<()> {
        let key = entity.key();
        if self.objects.contains_key(&key) {
            return Err(StorageError::DuplicateKey(key));
        }
        self.objects.insert(key, entity);
        Ok(())
    }

    /// Remove an entity, keeping the order of the rest.
    pub fn remove(&mut self, key: &str) -> Option<Entity> {
        self.objects.shift_remove(key)
    }

    /// Entities whose discriminator is `type_name`, in insertion order.
    pub fn of_type<'a>(&'a self, type_name: &'a str) -> impl Iterator<Item = &'a Entity> + 'a {
        self.objects
            .values()
            .filter(move |e| e.type_name() == type_name)
    }

    pub fn count(&self, type_name: &str) -> usize {
        self.of_type(type_name).count()
    }

    pub fn snapshot_store(&self) -> &S {
        &self.snapshot
    }
}

impl<S: SnapshotStore> Storage<S> {
    /// Serialize every entity and replace the snapshot with the result.
    pub fn save(&self) -> StorageResult<()> {
        let document: Map<String, JsonValue> = self
            .objects
            .iter()
            .map(|(key, entity)| (key.clone(), JsonValue::Object(entity.serialize())))
            .collect();
        let contents = serde_json::to_string_pretty(&document)
            .map_err(|e| StorageError::Serialize(e.to_string()))?;
        self.snapshot.write(&contents)?;
        tracing::debug!(entities = self.objects.len(), "snapshot saved");
        Ok(())
    }

    /// Rebuild the identity map from the snapshot.
    ///
    /// A missing snapshot is not an error. A snapshot that cannot be parsed,
    /// names an unregistered type, or yields colliding keys fails with an
    /// integrity error and leaves the current map untouched.
    pub fn reload(&mut self, registry: &ModelRegistry) -> StorageResult<ReloadOutcome> {
        let Some(raw) = self.snapshot.read()? else {
            tracing::debug!("no snapshot present; starting empty");
            return Ok(ReloadOutcome::NoSnapshot);
        };

        let document: Map<String, JsonValue> = serde_json::from_str(&raw)
            .map_err(|e| StorageError::CorruptSnapshot(format!("not a JSON object: {e}")))?;

        let mut objects = IdentityMap::with_capacity(document.len());
        for (stored_key, record) in document {
            let JsonValue::Object(record) = record else {
                return Err(StorageError::CorruptSnapshot(format!(
                    "{stored_key}: record is not an object"
                )));
            };
            let type_name = record
                .get(CLASS_KEY)
                .and_then(JsonValue::as_str)
                .ok_or_else(|| {
                    StorageError::CorruptSnapshot(format!("{stored_key}: missing {CLASS_KEY}"))
                })?
                .to_string();
            let schema = registry
                .get(&type_name)
                .ok_or_else(|| StorageError::UnknownType(type_name.clone()))?;
            let entity = Entity::hydrate(schema, record)
                .map_err(|e| StorageError::CorruptSnapshot(format!("{stored_key}: {e}")))?;

            let key = entity.key();
            if key != stored_key {
                tracing::warn!(
                    stored_key = %stored_key,
                    key = %key,
                    "snapshot key does not match record; using record identity"
                );
            }
            if objects.contains_key(&key) {
                return Err(StorageError::DuplicateKey(key));
            }
            objects.insert(key, entity);
        }

        let loaded = objects.len();
        self.objects = objects;
        tracing::info!(entities = loaded, "snapshot reloaded");
        Ok(ReloadOutcome::Loaded(loaded))
    }

    /// Refresh an entity's `updated_at` and save the full snapshot.
    ///
    /// Returns `Ok(false)` without saving when `key` is not in the map.
    pub fn touch_and_persist(&mut self, key: &str) -> StorageResult<bool> {
        let Some(entity) = self.objects.get_mut(key) else {
            return Ok(false);
        };
        entity.touch();
        self.save()?;
        Ok(true)
    }

    /// Run a mutation; if it fails, restore the identity map to its state
    /// before the call.
    ///
    /// Mutations end with a `save()`, so a failed save rolls the map back and
    /// the map and snapshot stay in agreement.
    pub fn atomically<T, E>(
        &mut self,
        apply: impl FnOnce(&mut Self) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: core::fmt::Display,
    {
        let before = self.objects.clone();
        let result = apply(self);
        if let Err(err) = &result {
            tracing::warn!(error = %err, "mutation failed; identity map restored");
            self.objects = before;
        }
        result
    }
}

impl<S> EntityStore for Storage<S> {
    type Error = StorageError;

    fn register(&mut self, entity: Entity) -> Result<(), StorageError> {
        Storage::register(self, entity)
    }
}
