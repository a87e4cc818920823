//! Entity identifiers and the composite identity-map key.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier of an entity.
///
/// Fresh identifiers are UUIDs, but hydrated records may carry any string the
/// snapshot holds, so the newtype wraps a `String` rather than a `Uuid`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Create a new identifier.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer `EntityId::from` in tests for
    /// determinism.
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for EntityId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Identity-map key: `<TypeName>.<id>`.
pub fn entity_key(type_name: &str, id: &str) -> String {
    format!("{type_name}.{id}")
}
