//! Entity base: identity, timestamps, and the open attribute bag shared by
//! every model type.

use chrono::{NaiveDateTime, SubsecRound, Utc};
use indexmap::IndexMap;
use serde_json::{Map, Value as JsonValue};

use crate::error::{DomainError, DomainResult};
use crate::id::{EntityId, entity_key};
use crate::schema::ModelSchema;
use crate::value::AttrValue;

/// Reserved key carrying the type discriminator in a serialized record.
pub const CLASS_KEY: &str = "__class__";

/// Serialized timestamp format (ISO 8601, microsecond precision).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Fields owned by the entity base; never writable as attributes.
pub const RESERVED_FIELDS: [&str; 4] = ["id", "created_at", "updated_at", CLASS_KEY];

/// Destination for freshly created entities.
///
/// Implemented by the storage engine; keeps this crate free of storage
/// concerns while letting `create_new` register in one step.
pub trait EntityStore {
    type Error;

    fn register(&mut self, entity: Entity) -> Result<(), Self::Error>;
}

/// One domain record.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    id: EntityId,
    type_name: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
    attributes: IndexMap<String, AttrValue>,
}

impl Entity {
    /// Build a fresh entity: new id, both timestamps set to the same instant.
    ///
    /// The entity is not registered anywhere; see [`Entity::create_new`].
    pub fn new(type_name: impl Into<String>) -> Self {
        let now = now();
        Self {
            id: EntityId::new(),
            type_name: type_name.into(),
            created_at: now,
            updated_at: now,
            attributes: IndexMap::new(),
        }
    }

    /// Create a fresh entity of `schema`'s type and register it with `store`.
    pub fn create_new<S: EntityStore>(
        schema: &ModelSchema,
        store: &mut S,
    ) -> Result<EntityId, S::Error> {
        let entity = schema.instantiate();
        let id = entity.id.clone();
        store.register(entity)?;
        Ok(id)
    }

    /// Rebuild an entity from a serialized attribute mapping.
    ///
    /// Timestamps are parsed from their string form; everything else is copied
    /// verbatim. Missing identity fields fall back to fresh values. The
    /// entity is returned unregistered; the caller owns registration.
    pub fn hydrate(schema: &ModelSchema, mut record: Map<String, JsonValue>) -> DomainResult<Self> {
        if let Some(class) = record.shift_remove(CLASS_KEY) {
            if class.as_str() != Some(schema.name()) {
                return Err(DomainError::malformed(format!(
                    "discriminator {class} does not match type {}",
                    schema.name()
                )));
            }
        }

        let mut entity = Entity::new(schema.name());
        if let Some(id) = record.shift_remove("id") {
            match id {
                JsonValue::String(s) => entity.id = EntityId::from(s),
                other => {
                    return Err(DomainError::malformed(format!(
                        "id must be a string, got {other}"
                    )));
                }
            }
        }
        if let Some(raw) = record.shift_remove("created_at") {
            entity.created_at = parse_timestamp("created_at", &raw)?;
        }
        if let Some(raw) = record.shift_remove("updated_at") {
            entity.updated_at = parse_timestamp("updated_at", &raw)?;
        }

        for (name, raw) in record {
            let value: AttrValue = serde_json::from_value(raw.clone()).map_err(|_| {
                DomainError::malformed(format!("unsupported value for {name}: {raw}"))
            })?;
            entity.attributes.insert(name, value);
        }

        Ok(entity)
    }

    /// Serialized attribute mapping, timestamps as ISO 8601 strings and the
    /// type discriminator under [`CLASS_KEY`].
    pub fn serialize(&self) -> Map<String, JsonValue> {
        let mut out = Map::new();
        out.insert("id".into(), JsonValue::String(self.id.to_string()));
        out.insert("created_at".into(), JsonValue::String(format_timestamp(&self.created_at)));
        out.insert("updated_at".into(), JsonValue::String(format_timestamp(&self.updated_at)));
        for (name, value) in &self.attributes {
            out.insert(
                name.clone(),
                serde_json::to_value(value).unwrap_or(JsonValue::Null),
            );
        }
        out.insert(CLASS_KEY.into(), JsonValue::String(self.type_name.clone()));
        out
    }

    /// Refresh `updated_at`. Never moves it backwards.
    pub fn touch(&mut self) {
        self.updated_at = now().max(self.updated_at);
    }

    /// Set one attribute. Reserved identity/timestamp fields are rejected.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: AttrValue) -> DomainResult<()> {
        let name = name.into();
        if is_reserved(&name) {
            return Err(DomainError::ReadOnlyAttribute(name));
        }
        self.attributes.insert(name, value);
        Ok(())
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Identity-map key of this entity.
    pub fn key(&self) -> String {
        entity_key(&self.type_name, self.id.as_str())
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }

    pub fn attributes(&self) -> &IndexMap<String, AttrValue> {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }
}

impl core::fmt::Display for Entity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "[{}] ({}) {{\"id\": {}, \"created_at\": \"{}\", \"updated_at\": \"{}\"",
            self.type_name,
            self.id,
            AttrValue::Str(self.id.to_string()).render(),
            format_timestamp(&self.created_at),
            format_timestamp(&self.updated_at),
        )?;
        for (name, value) in &self.attributes {
            write!(f, ", {}: {}", AttrValue::Str(name.clone()).render(), value.render())?;
        }
        f.write_str("}")
    }
}

/// True for fields owned by the entity base.
pub fn is_reserved(name: &str) -> bool {
    RESERVED_FIELDS.contains(&name)
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a serialized timestamp; the fractional part is optional.
pub fn parse_timestamp(field: &str, raw: &JsonValue) -> DomainResult<NaiveDateTime> {
    let invalid = || DomainError::InvalidTimestamp {
        field: field.to_string(),
        value: raw.to_string(),
    };
    let text = raw.as_str().ok_or_else(invalid)?;
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f").map_err(|_| invalid())
}

/// Current UTC time truncated to the serialized precision, so a save/reload
/// cycle reproduces timestamps exactly.
fn now() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(6)
}
