//! Portable, consumable objects.

use super::entity::{Entity, NamedEntity, Valuable, Weighted};
use super::errors::AdventureError;

/// A takeable object with a bounded number of uses.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    entity: NamedEntity,
    max_uses: i32,
    remaining_uses: i32,
    value: i32,
    weight: i32,
    when_used: String,
}

impl Item {
    /// Build an item, rejecting negative weights or use counts and a remaining
    /// count above the maximum.
    pub fn new(
        entity: NamedEntity,
        max_uses: i32,
        remaining_uses: i32,
        value: i32,
        weight: i32,
        when_used: &str,
    ) -> Result<Self, AdventureError> {
        let invalid = |reason: String| AdventureError::InvalidItem {
            name: entity.name.clone(),
            reason,
        };
        if max_uses < 0 {
            return Err(invalid(format!("max uses {} is negative", max_uses)));
        }
        if remaining_uses < 0 {
            return Err(invalid(format!(
                "remaining uses {} is negative",
                remaining_uses
            )));
        }
        if remaining_uses > max_uses {
            return Err(invalid(format!(
                "remaining uses {} exceeds max uses {}",
                remaining_uses, max_uses
            )));
        }
        if weight < 0 {
            return Err(invalid(format!("weight {} is negative", weight)));
        }

        Ok(Self {
            entity,
            max_uses,
            remaining_uses,
            value,
            weight,
            when_used: when_used.to_string(),
        })
    }

    /// Consume one use. Returns false and leaves the item untouched when it
    /// is already spent; applying `when_used` effects is the caller's job.
    pub fn use_item(&mut self) -> bool {
        if self.remaining_uses == 0 {
            return false;
        }
        self.remaining_uses -= 1;
        true
    }

    pub fn max_uses(&self) -> i32 {
        self.max_uses
    }

    pub fn remaining_uses(&self) -> i32 {
        self.remaining_uses
    }

    pub fn is_spent(&self) -> bool {
        self.remaining_uses == 0
    }

    pub fn when_used(&self) -> &str {
        &self.when_used
    }
}

impl Entity for Item {
    fn entity(&self) -> &NamedEntity {
        &self.entity
    }
}

impl Weighted for Item {
    fn weight(&self) -> i32 {
        self.weight
    }
}

impl Valuable for Item {
    fn value(&self) -> i32 {
        self.value
    }
}
