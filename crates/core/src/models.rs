//! The console's model types.

use crate::schema::{AttrType, ModelRegistry, ModelSchema};

pub const BASE_MODEL: ModelSchema = ModelSchema::new("BaseModel", &[]);

pub const USER: ModelSchema = ModelSchema::new(
    "User",
    &[
        ("email", AttrType::Str),
        ("password", AttrType::Str),
        ("first_name", AttrType::Str),
        ("last_name", AttrType::Str),
    ],
);

pub const STATE: ModelSchema = ModelSchema::new("State", &[("name", AttrType::Str)]);

pub const CITY: ModelSchema = ModelSchema::new(
    "City",
    &[("state_id", AttrType::Str), ("name", AttrType::Str)],
);

pub const AMENITY: ModelSchema = ModelSchema::new("Amenity", &[("name", AttrType::Str)]);

pub const PLACE: ModelSchema = ModelSchema::new(
    "Place",
    &[
        ("city_id", AttrType::Str),
        ("user_id", AttrType::Str),
        ("name", AttrType::Str),
        ("description", AttrType::Str),
        ("number_rooms", AttrType::Int),
        ("number_bathrooms", AttrType::Int),
        ("max_guest", AttrType::Int),
        ("price_by_night", AttrType::Int),
        ("latitude", AttrType::Float),
        ("longitude", AttrType::Float),
        ("amenity_ids", AttrType::List),
    ],
);

pub const REVIEW: ModelSchema = ModelSchema::new(
    "Review",
    &[
        ("place_id", AttrType::Str),
        ("user_id", AttrType::Str),
        ("text", AttrType::Str),
    ],
);

/// Registry holding every model type the console knows.
pub fn registry() -> ModelRegistry {
    ModelRegistry::new()
        .with(BASE_MODEL)
        .with(USER)
        .with(STATE)
        .with(CITY)
        .with(AMENITY)
        .with(PLACE)
        .with(REVIEW)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_has_all_seven_types() {
        let names: Vec<_> = registry().names().collect();
        assert_eq!(
            names,
            ["BaseModel", "User", "State", "City", "Amenity", "Place", "Review"]
        );
    }

    #[test]
    fn place_declares_numeric_defaults() {
        assert_eq!(PLACE.declared("number_rooms"), Some(AttrType::Int));
        assert_eq!(PLACE.declared("latitude"), Some(AttrType::Float));
        assert_eq!(USER.declared("number_rooms"), None);
    }
}
