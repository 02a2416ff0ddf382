//! Name-keyed entity holder shared by room contents and the player inventory.

use std::collections::BTreeMap;

use super::entity::{normalize_name, Entity};

/// Owns a set of entities keyed by (normalized) name.
///
/// Entities move between containers by value: remove from the source, then
/// add to the destination. A container never hands out shared ownership.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityContainer<T: Entity> {
    entities: BTreeMap<String, T>,
}

impl<T: Entity> Default for EntityContainer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> EntityContainer<T> {
    pub fn new() -> Self {
        Self {
            entities: BTreeMap::new(),
        }
    }

    /// Insert an entity. On a name collision the entity is handed back
    /// untouched and the container is unchanged.
    pub fn add_entity(&mut self, entity: T) -> Result<(), T> {
        let key = normalize_name(entity.name());
        if self.entities.contains_key(&key) {
            return Err(entity);
        }
        self.entities.insert(key, entity);
        Ok(())
    }

    /// Remove an entity by name, returning it if it was present.
    pub fn remove_entity(&mut self, name: &str) -> Option<T> {
        self.entities.remove(&normalize_name(name))
    }

    pub fn has_entity(&self, name: &str) -> bool {
        self.entities.contains_key(&normalize_name(name))
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.entities.get(&normalize_name(name))
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.entities.get_mut(&normalize_name(name))
    }

    /// The live mapping, keyed by normalized name.
    pub fn entities(&self) -> &BTreeMap<String, T> {
        &self.entities
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entities.values()
    }

    /// Filter contained entities down to one concrete kind.
    pub fn entities_by_kind<'a, U: 'a>(
        &'a self,
        pick: impl Fn(&'a T) -> Option<&'a U>,
    ) -> Vec<&'a U> {
        self.entities.values().filter_map(pick).collect()
    }

    /// Display names in stable (alphabetical) order.
    pub fn names(&self) -> Vec<&str> {
        self.entities.values().map(|e| e.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adventure::entity::NamedEntity;

    #[test]
    fn add_rejects_duplicate_names() {
        let mut c = EntityContainer::new();
        assert!(c.add_entity(NamedEntity::new("Lamp", "first")).is_ok());

        let rejected = c.add_entity(NamedEntity::new("lamp", "second"));
        assert_eq!(rejected.unwrap_err().description, "second");
        assert_eq!(c.len(), 1);
        assert_eq!(c.get("LAMP").map(|e| e.description()), Some("first"));
    }

    #[test]
    fn remove_returns_owned_entity() {
        let mut c = EntityContainer::new();
        c.add_entity(NamedEntity::new("Key", "brass")).unwrap();

        assert!(c.has_entity("key"));
        let key = c.remove_entity("Key").expect("present");
        assert_eq!(key.name, "Key");
        assert!(!c.has_entity("key"));
        assert!(c.remove_entity("Key").is_none());
    }

    #[test]
    fn entities_by_kind_filters() {
        let mut c = EntityContainer::new();
        c.add_entity(NamedEntity::new("A", "keep")).unwrap();
        c.add_entity(NamedEntity::new("B", "drop")).unwrap();

        let kept = c.entities_by_kind(|e| (e.description == "keep").then_some(e));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "A");
    }
}
