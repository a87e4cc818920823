//! Per-type schema registry and attribute coercion.
//!
//! A schema lists the attributes a model type *declares* together with their
//! primitive type. It is consulted only when a value is written through the
//! console: declared attributes are coerced, undeclared ones are stored as
//! given. Schemas never enforce completeness.

use indexmap::IndexMap;

use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::value::AttrValue;

/// Declared primitive type of an attribute.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AttrType {
    Str,
    Int,
    Float,
    List,
}

impl core::fmt::Display for AttrType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            AttrType::Str => "string",
            AttrType::Int => "integer",
            AttrType::Float => "float",
            AttrType::List => "list",
        })
    }
}

/// Schema of one model type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSchema {
    name: &'static str,
    attributes: &'static [(&'static str, AttrType)],
}

impl ModelSchema {
    pub const fn new(name: &'static str, attributes: &'static [(&'static str, AttrType)]) -> Self {
        Self { name, attributes }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared type of `attribute`, if any.
    pub fn declared(&self, attribute: &str) -> Option<AttrType> {
        self.attributes
            .iter()
            .find(|(name, _)| *name == attribute)
            .map(|(_, ty)| *ty)
    }

    /// Construct a fresh, unregistered entity of this type.
    pub fn instantiate(&self) -> Entity {
        Entity::new(self.name)
    }

    /// Coerce an incoming value for `attribute` to its declared type.
    ///
    /// Undeclared attributes and list-typed ones pass through unchanged.
    pub fn coerce(&self, attribute: &str, value: AttrValue) -> DomainResult<AttrValue> {
        match self.declared(attribute) {
            None | Some(AttrType::List) => Ok(value),
            Some(ty) => coerce_scalar(attribute, ty, value),
        }
    }
}

fn coerce_scalar(attribute: &str, ty: AttrType, value: AttrValue) -> DomainResult<AttrValue> {
    let fail = || DomainError::coercion(attribute, ty);
    match ty {
        AttrType::Str => Ok(match value {
            AttrValue::Str(s) => AttrValue::Str(s),
            other => AttrValue::Str(other.to_text()),
        }),
        AttrType::Int => match value {
            AttrValue::Int(i) => Ok(AttrValue::Int(i)),
            AttrValue::Bool(b) => Ok(AttrValue::Int(i64::from(b))),
            AttrValue::Float(f) => {
                let t = f.trunc();
                if t.is_finite() && t >= i64::MIN as f64 && t <= i64::MAX as f64 {
                    Ok(AttrValue::Int(t as i64))
                } else {
                    Err(fail())
                }
            }
            AttrValue::Str(s) => s.trim().parse::<i64>().map(AttrValue::Int).map_err(|_| fail()),
            AttrValue::List(_) => Err(fail()),
        },
        AttrType::Float => match value {
            AttrValue::Float(f) => Ok(AttrValue::Float(f)),
            AttrValue::Int(i) => Ok(AttrValue::Float(i as f64)),
            AttrValue::Bool(b) => Ok(AttrValue::Float(if b { 1.0 } else { 0.0 })),
            AttrValue::Str(s) => match s.trim().parse::<f64>() {
                Ok(f) if f.is_finite() => Ok(AttrValue::Float(f)),
                _ => Err(fail()),
            },
            AttrValue::List(_) => Err(fail()),
        },
        AttrType::List => Ok(value),
    }
}

/// Registry of known model types, keyed by type name.
///
/// Populated once at startup; replaces any lookup of types by arbitrary name.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: IndexMap<&'static str, ModelSchema>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema; a later registration under the same name replaces it.
    pub fn register(&mut self, schema: ModelSchema) -> &mut Self {
        self.models.insert(schema.name(), schema);
        self
    }

    pub fn with(mut self, schema: ModelSchema) -> Self {
        self.register(schema);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ModelSchema> {
        self.models.get(name)
    }

    /// Like [`get`](Self::get) but reports unknown names as a domain error.
    pub fn require(&self, name: &str) -> DomainResult<&ModelSchema> {
        self.get(name).ok_or_else(|| DomainError::unknown_type(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.models.keys().copied()
    }
}
