use super::entity::{Entity, NamedEntity, Weighted};

/// Fixtures without a recorded state use this marker.
pub const UNSET_STATE: i32 = -1;

/// Static scenery. Fixtures are never placed in the player's inventory.
#[derive(Debug, Clone, PartialEq)]
pub struct Fixture {
    entity: NamedEntity,
    weight: i32,
    /// Name of the puzzle this fixture is tied to, if any.
    puzzle: Option<String>,
    states: i32,
}

impl Fixture {
    pub fn new(entity: NamedEntity, weight: i32) -> Self {
        Self {
            entity,
            weight,
            puzzle: None,
            states: UNSET_STATE,
        }
    }

    pub fn with_puzzle(mut self, puzzle: Option<String>) -> Self {
        self.puzzle = puzzle.filter(|p| !p.trim().is_empty());
        self
    }

    pub fn with_states(mut self, states: i32) -> Self {
        self.states = states;
        self
    }

    pub fn puzzle(&self) -> Option<&str> {
        self.puzzle.as_deref()
    }

    pub fn states(&self) -> i32 {
        self.states
    }
}

impl Entity for Fixture {
    fn entity(&self) -> &NamedEntity {
        &self.entity
    }
}

impl Weighted for Fixture {
    fn weight(&self) -> i32 {
        self.weight
    }
}
