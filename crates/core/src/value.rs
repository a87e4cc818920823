//! Attribute values carried in an entity's open-ended attribute bag.

use serde::{Deserialize, Serialize};

/// A typed attribute value.
///
/// Serialized untagged, so the snapshot holds plain JSON scalars and arrays.
/// Variant order matters for deserialization: an integral JSON number becomes
/// `Int`, any other number `Float`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<AttrValue>),
}

impl AttrValue {
    /// Plain-text form used when a value is coerced into a string attribute.
    pub fn to_text(&self) -> String {
        match self {
            AttrValue::Bool(true) => "True".to_string(),
            AttrValue::Bool(false) => "False".to_string(),
            AttrValue::Int(i) => i.to_string(),
            AttrValue::Float(f) => format!("{f:?}"),
            AttrValue::Str(s) => s.clone(),
            AttrValue::List(_) => self.render(),
        }
    }

    /// Rendering used by `show`/`all` (strings quoted, lists bracketed).
    pub fn render(&self) -> String {
        match self {
            AttrValue::Str(s) => {
                serde_json::to_string(s).unwrap_or_else(|_| format!("\"{s}\""))
            }
            AttrValue::Float(f) => format!("{f:?}"),
            AttrValue::List(items) => {
                let inner: Vec<String> = items.iter().map(AttrValue::render).collect();
                format!("[{}]", inner.join(", "))
            }
            other => other.to_text(),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}
