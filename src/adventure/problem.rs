//! Puzzles and monsters: challenges that block progress until solved.
//!
//! A problem starts **active** and becomes **solved** exactly once. Solving is
//! split in two steps so the controller can apply every side effect in one
//! place:
//!
//! 1. [`Problem::solve`] checks a submission and reports a [`SolveOutcome`]
//!    without mutating anything.
//! 2. On [`SolveOutcome::Solved`] the controller calls [`Problem::mark_solved`],
//!    awards the score and unlocks exits.
//!
//! Solutions are either free text or the name of an item. Text solutions are
//! written in world files wrapped in single quotes (`'echo'`); anything else
//! names an item.

use super::entity::{Entity, NamedEntity, Valuable};
use super::item::Item;
use super::player::Player;

/// What a problem accepts as its answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Solution {
    /// A free-form answer typed by the player.
    Text(String),
    /// The name of an item that must be used while it still has uses left.
    Consumable(String),
}

impl Solution {
    /// Parse the world-file convention: `'text'` is a text answer, anything
    /// else is an item name.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.len() >= 2 && trimmed.starts_with('\'') && trimmed.ends_with('\'') {
            Solution::Text(trimmed[1..trimmed.len() - 1].to_string())
        } else {
            Solution::Consumable(trimmed.to_string())
        }
    }

    /// Inverse of [`Solution::parse`].
    pub fn to_wire(&self) -> String {
        match self {
            Solution::Text(text) => format!("'{}'", text),
            Solution::Consumable(name) => name.clone(),
        }
    }

    /// Check a submission using the validator that matches both sides.
    /// A text answer never satisfies an item solution and vice versa.
    pub fn accepts(&self, submission: Submission<'_>) -> bool {
        match (self, submission) {
            (Solution::Text(stored), Submission::Text(text)) => {
                ExactText.validate(stored.as_str(), text)
            }
            (Solution::Consumable(stored), Submission::Item(item)) => {
                UsableItem.validate(stored.as_str(), item)
            }
            _ => false,
        }
    }
}

/// A player's attempt at a solution.
#[derive(Debug, Clone, Copy)]
pub enum Submission<'a> {
    Text(&'a str),
    Item(&'a Item),
}

/// Compares a stored solution against a submitted one.
pub trait SolutionValidator<Stored: ?Sized, Submitted: ?Sized> {
    fn validate(&self, stored: &Stored, submitted: &Submitted) -> bool;
}

/// Exact string equality (after trimming surrounding whitespace).
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactText;

impl SolutionValidator<str, str> for ExactText {
    fn validate(&self, stored: &str, submitted: &str) -> bool {
        stored.trim() == submitted.trim()
    }
}

/// The submitted item must be the named item and still have uses left.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsableItem;

impl SolutionValidator<str, Item> for UsableItem {
    fn validate(&self, stored: &str, submitted: &Item) -> bool {
        super::entity::names_match(stored, submitted.name()) && submitted.remaining_uses() > 0
    }
}

/// Result of [`Problem::solve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveOutcome {
    /// The problem is already solved; nothing happens.
    Inert,
    /// The submission matches.
    Solved,
    /// The submission does not match; the problem stays active.
    Rejected,
}

/// Monster-only attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonsterTraits {
    pub damage: i32,
    pub attack: String,
    pub can_attack: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemKind {
    Puzzle,
    Monster(MonsterTraits),
}

/// A puzzle or monster placed in a room.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    entity: NamedEntity,
    active: bool,
    affects_target: bool,
    affects_player: bool,
    solution: Solution,
    value: i32,
    effects: String,
    /// `"roomNumber:roomName"`, the room whose exits open when solved.
    target: String,
    kind: ProblemKind,
}

impl Problem {
    pub fn puzzle(entity: NamedEntity, solution: Solution) -> Self {
        Self {
            entity,
            active: true,
            affects_target: false,
            affects_player: false,
            solution,
            value: 0,
            effects: String::new(),
            target: String::new(),
            kind: ProblemKind::Puzzle,
        }
    }

    pub fn monster(entity: NamedEntity, solution: Solution, traits: MonsterTraits) -> Self {
        Self {
            kind: ProblemKind::Monster(traits),
            affects_player: true,
            ..Self::puzzle(entity, solution)
        }
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_affects(mut self, affects_target: bool, affects_player: bool) -> Self {
        self.affects_target = affects_target;
        self.affects_player = affects_player;
        self
    }

    pub fn with_value(mut self, value: i32) -> Self {
        self.value = value;
        self
    }

    pub fn with_effects(mut self, effects: &str) -> Self {
        self.effects = effects.to_string();
        self
    }

    pub fn with_target(mut self, target: &str) -> Self {
        self.target = target.to_string();
        self
    }

    /// Check a submission. Never mutates the problem or the submitted item.
    pub fn solve(&self, submission: Submission<'_>) -> SolveOutcome {
        if !self.active {
            return SolveOutcome::Inert;
        }
        if self.solution.accepts(submission) {
            SolveOutcome::Solved
        } else {
            SolveOutcome::Rejected
        }
    }

    /// Terminal transition. Solved problems are never reactivated.
    pub fn mark_solved(&mut self) {
        self.active = false;
    }

    /// Apply this monster's attack to the player and return the damage dealt.
    ///
    /// Puzzles, solved monsters and monsters that do not affect the player
    /// deal nothing. Damage is always a loss regardless of its sign.
    pub fn attack(&self, player: &mut Player) -> Option<i32> {
        let ProblemKind::Monster(traits) = &self.kind else {
            return None;
        };
        if !self.active || !self.affects_player {
            return None;
        }
        let damage = traits.damage.saturating_abs();
        player.take_damage(damage);
        Some(damage)
    }

    /// True for an active monster that is currently able to attack.
    pub fn is_hostile(&self) -> bool {
        match &self.kind {
            ProblemKind::Monster(traits) => self.active && traits.can_attack,
            ProblemKind::Puzzle => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn affects_target(&self) -> bool {
        self.affects_target
    }

    pub fn affects_player(&self) -> bool {
        self.affects_player
    }

    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    pub fn effects(&self) -> &str {
        &self.effects
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn kind(&self) -> &ProblemKind {
        &self.kind
    }

    pub fn monster_traits(&self) -> Option<&MonsterTraits> {
        match &self.kind {
            ProblemKind::Monster(traits) => Some(traits),
            ProblemKind::Puzzle => None,
        }
    }

    pub fn is_monster(&self) -> bool {
        matches!(self.kind, ProblemKind::Monster(_))
    }
}

impl Entity for Problem {
    fn entity(&self) -> &NamedEntity {
        &self.entity
    }
}

impl Valuable for Problem {
    fn value(&self) -> i32 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lamp(remaining: i32) -> Item {
        Item::new(NamedEntity::new("Lamp", "Brass"), 3, remaining, 0, 2, "Light!").unwrap()
    }

    fn troll() -> Problem {
        Problem::monster(
            NamedEntity::new("Troll", "A hungry troll"),
            Solution::parse("Lamp"),
            MonsterTraits {
                damage: -15,
                attack: "The troll swings.".to_string(),
                can_attack: true,
            },
        )
        .with_value(20)
    }

    #[test]
    fn parse_solution_convention() {
        assert_eq!(Solution::parse("'echo'"), Solution::Text("echo".to_string()));
        assert_eq!(Solution::parse("Hair Clippers"), Solution::Consumable("Hair Clippers".to_string()));
        assert_eq!(Solution::parse("'"), Solution::Consumable("'".to_string()));
        assert_eq!(Solution::Text("echo".into()).to_wire(), "'echo'");
    }

    #[test]
    fn text_and_item_submissions_do_not_cross() {
        let riddle = Problem::puzzle(NamedEntity::new("Riddle", "?"), Solution::parse("'Lamp'"));
        assert_eq!(riddle.solve(Submission::Item(&lamp(3))), SolveOutcome::Rejected);
        assert_eq!(riddle.solve(Submission::Text("Lamp")), SolveOutcome::Solved);
    }

    #[test]
    fn spent_item_is_rejected() {
        let monster = troll();
        assert_eq!(monster.solve(Submission::Item(&lamp(0))), SolveOutcome::Rejected);
        assert_eq!(monster.solve(Submission::Item(&lamp(1))), SolveOutcome::Solved);
    }

    #[test]
    fn solved_problems_stay_inert() {
        let mut monster = troll();
        monster.mark_solved();
        for _ in 0..3 {
            assert_eq!(monster.solve(Submission::Item(&lamp(3))), SolveOutcome::Inert);
        }
        assert!(!monster.is_active());
        assert!(!monster.is_hostile());
    }

    #[test]
    fn attack_applies_absolute_damage() {
        let monster = troll();
        let mut player = Player::new("Hero", 10, 1);
        assert_eq!(monster.attack(&mut player), Some(15));
        assert_eq!(player.health(), 85);
    }

    #[test]
    fn puzzles_and_passive_monsters_do_not_attack() {
        let mut player = Player::new("Hero", 10, 1);
        let puzzle = Problem::puzzle(NamedEntity::new("Riddle", "?"), Solution::parse("'a'"));
        assert_eq!(puzzle.attack(&mut player), None);

        let passive = troll().with_affects(false, false);
        assert_eq!(passive.attack(&mut player), None);
        assert_eq!(player.health(), 100);
    }
}
