//! Base identity shared by every object in a world.
//!
//! Items, fixtures, problems, rooms and the player all embed a [`NamedEntity`]
//! and expose it through the [`Entity`] trait. Capabilities that only some
//! kinds have (weight, value) are separate small traits.

use serde::{Deserialize, Serialize};

/// Id used for entities that were never given one by the world file.
pub const UNASSIGNED_ID: i64 = -1;

/// Identity record embedded in every game object.
///
/// Equality compares `(id, name, description)` only; the picture reference is
/// presentation data and does not take part in identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedEntity {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub picture: Option<String>,
}

impl NamedEntity {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            id: UNASSIGNED_ID,
            name: name.to_string(),
            description: description.to_string(),
            picture: None,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn with_picture(mut self, picture: Option<String>) -> Self {
        self.picture = picture.filter(|p| !p.trim().is_empty());
        self
    }
}

impl PartialEq for NamedEntity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name && self.description == other.description
    }
}

impl Eq for NamedEntity {}

/// Anything addressable by name inside a world.
pub trait Entity {
    fn entity(&self) -> &NamedEntity;

    fn id(&self) -> i64 {
        self.entity().id
    }

    fn name(&self) -> &str {
        &self.entity().name
    }

    fn description(&self) -> &str {
        &self.entity().description
    }

    fn picture(&self) -> Option<&str> {
        self.entity().picture.as_deref()
    }
}

impl Entity for NamedEntity {
    fn entity(&self) -> &NamedEntity {
        self
    }
}

/// Objects with a carrying weight.
pub trait Weighted {
    fn weight(&self) -> i32;
}

/// Objects worth points or money.
pub trait Valuable {
    fn value(&self) -> i32;
}

/// Normalize a name for comparison
///
/// - Convert to lowercase
/// - Trim whitespace
/// - Collapse multiple spaces to single space
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Case- and whitespace-insensitive name comparison used by command lookup.
pub fn names_match(query: &str, name: &str) -> bool {
    normalize_name(query) == normalize_name(name)
}
