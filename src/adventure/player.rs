//! The player: an inventory with health, score, a weight budget and a location.

use super::container::EntityContainer;
use super::entity::{Entity, NamedEntity, Weighted};
use super::item::Item;

/// Upper bound for player health.
pub const MAX_HEALTH: i32 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    entity: NamedEntity,
    inventory: EntityContainer<Item>,
    health: i32,
    max_weight: i32,
    current_weight: i32,
    room_number: i32,
    score: i32,
}

impl Player {
    pub fn new(name: &str, max_weight: i32, room_number: i32) -> Self {
        Self {
            entity: NamedEntity::new(name, "That's you."),
            inventory: EntityContainer::new(),
            health: MAX_HEALTH,
            max_weight,
            current_weight: 0,
            room_number,
            score: 0,
        }
    }

    pub fn with_health(mut self, health: i32) -> Self {
        self.set_health(health);
        self
    }

    pub fn with_score(mut self, score: i32) -> Self {
        self.score = score;
        self
    }

    /// Add an item if it fits within the weight budget and its name is free.
    /// A rejected item is handed back so the caller can return it to where
    /// it came from.
    pub fn add_item(&mut self, item: Item) -> Result<(), Item> {
        if !self.can_carry(&item) {
            return Err(item);
        }
        self.inventory.add_entity(item)?;
        self.recompute_weight();
        Ok(())
    }

    /// Insert an item without checking the weight budget. Used when
    /// rebuilding a saved inventory, where the saved state is authoritative.
    pub(crate) fn restore_item(&mut self, item: Item) -> Result<(), Item> {
        self.inventory.add_entity(item)?;
        self.recompute_weight();
        Ok(())
    }

    pub fn remove_item(&mut self, name: &str) -> Option<Item> {
        let removed = self.inventory.remove_entity(name);
        if removed.is_some() {
            self.recompute_weight();
        }
        removed
    }

    /// Whether `item` would fit in the remaining weight budget.
    pub fn can_carry(&self, item: &Item) -> bool {
        self.current_weight.saturating_add(item.weight()) <= self.max_weight
    }

    pub fn has_item(&self, name: &str) -> bool {
        self.inventory.has_entity(name)
    }

    pub fn item(&self, name: &str) -> Option<&Item> {
        self.inventory.get(name)
    }

    pub fn item_mut(&mut self, name: &str) -> Option<&mut Item> {
        self.inventory.get_mut(name)
    }

    pub fn inventory(&self) -> &EntityContainer<Item> {
        &self.inventory
    }

    fn recompute_weight(&mut self) {
        self.current_weight = self.inventory.iter().map(|item| item.weight()).sum();
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.set_health(self.health.saturating_sub(amount.saturating_abs()));
    }

    pub fn set_health(&mut self, health: i32) {
        self.health = health.clamp(0, MAX_HEALTH);
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn add_score(&mut self, points: i32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn move_to(&mut self, room_number: i32) {
        self.room_number = room_number;
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_weight(&self) -> i32 {
        self.max_weight
    }

    pub fn current_weight(&self) -> i32 {
        self.current_weight
    }

    pub fn room_number(&self) -> i32 {
        self.room_number
    }

    pub fn score(&self) -> i32 {
        self.score
    }
}

impl Entity for Player {
    fn entity(&self) -> &NamedEntity {
        &self.entity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, weight: i32) -> Item {
        Item::new(NamedEntity::new(name, "thing"), 1, 1, 0, weight, "").unwrap()
    }

    #[test]
    fn weight_tracks_inventory() {
        let mut player = Player::new("Hero", 10, 1);
        player.add_item(item("Rope", 3)).unwrap();
        player.add_item(item("Lamp", 2)).unwrap();
        assert_eq!(player.current_weight(), 5);

        player.remove_item("rope").expect("held");
        assert_eq!(player.current_weight(), 2);
        assert!(player.remove_item("rope").is_none());
        assert_eq!(player.current_weight(), 2);
    }

    #[test]
    fn over_budget_item_is_handed_back() {
        let mut player = Player::new("Hero", 10, 1);
        player.add_item(item("Anvil", 8)).unwrap();

        let rejected = player.add_item(item("Boulder", 5)).unwrap_err();
        assert_eq!(rejected.name(), "Boulder");
        assert_eq!(player.current_weight(), 8);
        assert_eq!(player.inventory().len(), 1);
    }

    #[test]
    fn exact_budget_fits() {
        let mut player = Player::new("Hero", 10, 1);
        player.add_item(item("Anvil", 8)).unwrap();
        assert!(player.add_item(item("Pebble", 2)).is_ok());
        assert_eq!(player.current_weight(), 10);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut player = Player::new("Hero", 10, 1);
        player.add_item(item("Coin", 1)).unwrap();
        assert!(player.add_item(item("coin", 1)).is_err());
        assert_eq!(player.current_weight(), 1);
    }

    #[test]
    fn health_is_clamped() {
        let mut player = Player::new("Hero", 10, 1).with_health(250);
        assert_eq!(player.health(), MAX_HEALTH);
        player.take_damage(-30);
        assert_eq!(player.health(), 70);
        player.take_damage(500);
        assert_eq!(player.health(), 0);
        assert!(!player.is_alive());
    }
}
