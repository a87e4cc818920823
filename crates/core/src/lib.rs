//! `hbnb-core`: entity base and model schemas.
//!
//! This crate contains the **pure domain** side of the console: entities,
//! attribute values, the restricted literal parser and per-type schemas.
//! Persistence lives in `hbnb-infra`.

pub mod entity;
pub mod error;
pub mod id;
pub mod literal;
pub mod models;
pub mod schema;
pub mod value;

pub use entity::{CLASS_KEY, Entity, EntityStore, TIMESTAMP_FORMAT};
pub use error::{DomainError, DomainResult};
pub use id::{EntityId, entity_key};
pub use literal::{Literal, parse_dict, parse_literal};
pub use schema::{AttrType, ModelRegistry, ModelSchema};
pub use value::AttrValue;
