//! The full room graph of one game session.

use std::collections::BTreeMap;

use super::container::EntityContainer;
use super::entity::Entity;
use super::fixture::Fixture;
use super::item::Item;
use super::problem::Problem;
use super::room::{Direction, ExitState, Room};

/// Result of trying to walk out of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// No passage in that direction.
    NoExit,
    /// A locked passage to the given room.
    Blocked(i32),
    /// The player now stands in the given room.
    Moved(i32),
}

/// Rooms addressed by number. Item, fixture and problem listings are
/// derived from room contents on demand rather than stored separately.
///
/// Spare items are registry items that start outside every room; a restored
/// inventory may claim them.
#[derive(Debug, Clone, PartialEq)]
pub struct GameWorld {
    name: String,
    version: String,
    rooms: BTreeMap<i32, Room>,
    spare_items: EntityContainer<Item>,
}

impl GameWorld {
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            rooms: BTreeMap::new(),
            spare_items: EntityContainer::new(),
        }
    }

    /// Insert a room, replacing any room with the same number.
    pub fn add_room(&mut self, room: Room) -> Option<Room> {
        self.rooms.insert(room.number(), room)
    }

    pub fn with_room(mut self, room: Room) -> Self {
        self.add_room(room);
        self
    }

    pub fn add_spare_item(&mut self, item: Item) -> Result<(), Item> {
        self.spare_items.add_entity(item)
    }

    /// Hand a spare item over to its new owner.
    pub fn take_spare_item(&mut self, name: &str) -> Option<Item> {
        self.spare_items.remove_entity(name)
    }

    pub fn spare_items(&self) -> &EntityContainer<Item> {
        &self.spare_items
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn room(&self, number: i32) -> Option<&Room> {
        self.rooms.get(&number)
    }

    pub fn room_mut(&mut self, number: i32) -> Option<&mut Room> {
        self.rooms.get_mut(&number)
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// New players start in the lowest-numbered room.
    pub fn starting_room(&self) -> Option<i32> {
        self.rooms.keys().next().copied()
    }

    /// Resolve a move from `from` towards `direction`. Pure: the caller
    /// updates the player on [`MoveOutcome::Moved`].
    pub fn destination(&self, from: i32, direction: Direction) -> MoveOutcome {
        let Some(room) = self.rooms.get(&from) else {
            return MoveOutcome::NoExit;
        };
        match room.exit(direction) {
            ExitState::None => MoveOutcome::NoExit,
            ExitState::Blocked(to) => MoveOutcome::Blocked(to),
            ExitState::Open(to) if self.rooms.contains_key(&to) => MoveOutcome::Moved(to),
            ExitState::Open(_) => MoveOutcome::NoExit,
        }
    }

    /// Every item lying in a room.
    pub fn items(&self) -> Vec<&Item> {
        self.rooms.values().flat_map(|room| room.items()).collect()
    }

    pub fn fixtures(&self) -> Vec<&Fixture> {
        self.rooms.values().flat_map(|room| room.fixtures()).collect()
    }

    /// Problems placed in rooms, one entry per distinct name.
    pub fn problems(&self) -> Vec<&Problem> {
        let mut seen = BTreeMap::new();
        for problem in self.rooms.values().filter_map(Room::problem) {
            seen.entry(problem.name().to_string()).or_insert(problem);
        }
        seen.into_values().collect()
    }

    pub fn puzzles(&self) -> Vec<&Problem> {
        self.problems().into_iter().filter(|p| !p.is_monster()).collect()
    }

    pub fn monsters(&self) -> Vec<&Problem> {
        self.problems().into_iter().filter(|p| p.is_monster()).collect()
    }

    /// Find a room by the target string used on problems (`"N:Name"`),
    /// falling back to a plain room name.
    pub fn resolve_target(&self, target: &str) -> Option<i32> {
        let (number, name) = match target.split_once(':') {
            Some((number, name)) => (number.trim().parse::<i32>().ok(), name.trim()),
            None => (target.trim().parse::<i32>().ok(), target.trim()),
        };
        if let Some(n) = number.filter(|n| self.rooms.contains_key(n)) {
            return Some(n);
        }
        self.rooms
            .values()
            .find(|room| !name.is_empty() && super::entity::names_match(name, room.name()))
            .map(Room::number)
    }
}
