//! Rooms: nodes of the world graph.
//!
//! Exit values follow a sign convention:
//! - `0` no passage
//! - positive: open passage to that room number
//! - negative: locked passage to `abs(value)`; [`Room::unlock_exit`] flips it

use std::fmt;

use super::container::EntityContainer;
use super::entity::{Entity, NamedEntity, Weighted};
use super::fixture::Fixture;
use super::item::Item;
use super::problem::Problem;

/// The four compass directions a room can have exits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Parse a direction word or letter, case-insensitively.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_uppercase().as_str() {
            "N" | "NORTH" => Some(Direction::North),
            "S" | "SOUTH" => Some(Direction::South),
            "E" | "EAST" => Some(Direction::East),
            "W" | "WEST" => Some(Direction::West),
            _ => None,
        }
    }

    /// Single-letter key used by world files.
    pub fn letter(self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::South => "S",
            Direction::East => "E",
            Direction::West => "W",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        };
        f.write_str(word)
    }
}

/// Raw exit values in each direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exits {
    pub north: i32,
    pub south: i32,
    pub east: i32,
    pub west: i32,
}

impl Exits {
    pub fn new(north: i32, south: i32, east: i32, west: i32) -> Self {
        Self {
            north,
            south,
            east,
            west,
        }
    }

    pub fn get(&self, direction: Direction) -> i32 {
        match direction {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
        }
    }

    fn slot_mut(&mut self, direction: Direction) -> &mut i32 {
        match direction {
            Direction::North => &mut self.north,
            Direction::South => &mut self.south,
            Direction::East => &mut self.east,
            Direction::West => &mut self.west,
        }
    }
}

/// What lies in a given direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitState {
    None,
    Blocked(i32),
    Open(i32),
}

/// Anything that can sit on a room's floor.
#[derive(Debug, Clone, PartialEq)]
pub enum RoomEntity {
    Item(Item),
    Fixture(Fixture),
}

impl RoomEntity {
    pub fn as_item(&self) -> Option<&Item> {
        match self {
            RoomEntity::Item(item) => Some(item),
            RoomEntity::Fixture(_) => None,
        }
    }

    pub fn as_fixture(&self) -> Option<&Fixture> {
        match self {
            RoomEntity::Fixture(fixture) => Some(fixture),
            RoomEntity::Item(_) => None,
        }
    }
}

impl Entity for RoomEntity {
    fn entity(&self) -> &NamedEntity {
        match self {
            RoomEntity::Item(item) => item.entity(),
            RoomEntity::Fixture(fixture) => fixture.entity(),
        }
    }
}

impl Weighted for RoomEntity {
    fn weight(&self) -> i32 {
        match self {
            RoomEntity::Item(item) => item.weight(),
            RoomEntity::Fixture(fixture) => fixture.weight(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    entity: NamedEntity,
    number: i32,
    exits: Exits,
    contents: EntityContainer<RoomEntity>,
    problem: Option<Problem>,
}

impl Room {
    pub fn new(number: i32, name: &str, description: &str) -> Self {
        Self {
            entity: NamedEntity::new(name, description).with_id(i64::from(number)),
            number,
            exits: Exits::default(),
            contents: EntityContainer::new(),
            problem: None,
        }
    }

    pub fn with_exits(mut self, exits: Exits) -> Self {
        self.exits = exits;
        self
    }

    pub fn with_picture(mut self, picture: Option<String>) -> Self {
        self.entity = self.entity.with_picture(picture);
        self
    }

    pub fn with_problem(mut self, problem: Option<Problem>) -> Self {
        self.problem = problem;
        self
    }

    pub fn number(&self) -> i32 {
        self.number
    }

    pub fn exits(&self) -> &Exits {
        &self.exits
    }

    pub fn exit(&self, direction: Direction) -> ExitState {
        match self.exits.get(direction) {
            0 => ExitState::None,
            n if n < 0 => ExitState::Blocked(n.saturating_abs()),
            n => ExitState::Open(n),
        }
    }

    /// Flip a locked exit open. Returns false when the exit was not locked.
    pub fn unlock_exit(&mut self, direction: Direction) -> bool {
        let slot = self.exits.slot_mut(direction);
        if *slot < 0 {
            *slot = slot.saturating_abs();
            true
        } else {
            false
        }
    }

    pub fn blocked_directions(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| matches!(self.exit(*d), ExitState::Blocked(_)))
            .collect()
    }

    /// Directions with any passage, open or locked.
    pub fn exit_directions(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| self.exit(*d) != ExitState::None)
            .collect()
    }

    pub fn problem(&self) -> Option<&Problem> {
        self.problem.as_ref()
    }

    pub fn problem_mut(&mut self) -> Option<&mut Problem> {
        self.problem.as_mut()
    }

    /// The problem, but only while it is still active.
    pub fn active_problem(&self) -> Option<&Problem> {
        self.problem.as_ref().filter(|p| p.is_active())
    }

    pub fn contents(&self) -> &EntityContainer<RoomEntity> {
        &self.contents
    }

    pub fn add_item(&mut self, item: Item) -> Result<(), Item> {
        if self.contents.has_entity(item.name()) {
            return Err(item);
        }
        let _ = self.contents.add_entity(RoomEntity::Item(item));
        Ok(())
    }

    pub fn add_fixture(&mut self, fixture: Fixture) -> Result<(), Fixture> {
        if self.contents.has_entity(fixture.name()) {
            return Err(fixture);
        }
        let _ = self.contents.add_entity(RoomEntity::Fixture(fixture));
        Ok(())
    }

    /// Remove an item by name. Fixtures are left in place.
    pub fn take_item(&mut self, name: &str) -> Option<Item> {
        if !matches!(self.contents.get(name), Some(RoomEntity::Item(_))) {
            return None;
        }
        match self.contents.remove_entity(name) {
            Some(RoomEntity::Item(item)) => Some(item),
            _ => None,
        }
    }

    pub fn entity_named(&self, name: &str) -> Option<&RoomEntity> {
        self.contents.get(name)
    }

    pub fn items(&self) -> Vec<&Item> {
        self.contents.entities_by_kind(RoomEntity::as_item)
    }

    pub fn fixtures(&self) -> Vec<&Fixture> {
        self.contents.entities_by_kind(RoomEntity::as_fixture)
    }
}

impl Entity for Room {
    fn entity(&self) -> &NamedEntity {
        &self.entity
    }
}
