//! World and player JSON schema plus conversion to and from the live model.
//!
//! World files describe rooms and four registries (items, fixtures, monsters,
//! puzzles). Rooms refer to registry entries by name with comma separated
//! lists. Numbers may be written as JSON numbers or numeric strings, booleans
//! as JSON booleans or `"true"`/`"false"`; output always uses native types.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::adventure::entity::{normalize_name, Entity, NamedEntity, Valuable, Weighted};
use crate::adventure::errors::AdventureError;
use crate::adventure::fixture::Fixture;
use crate::adventure::item::Item;
use crate::adventure::player::Player;
use crate::adventure::problem::{MonsterTraits, Problem, ProblemKind, Solution};
use crate::adventure::room::{Exits, Room};
use crate::adventure::world::GameWorld;

// ============================================================================
// Wire structures
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorldSeed {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub version: String,
    #[serde(default)]
    pub rooms: Vec<RoomSeed>,
    #[serde(default)]
    pub items: Vec<ItemSeed>,
    #[serde(default)]
    pub fixtures: Vec<FixtureSeed>,
    #[serde(default)]
    pub monsters: Vec<MonsterSeed>,
    #[serde(default)]
    pub puzzles: Vec<PuzzleSeed>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomSeed {
    pub room_name: String,
    #[serde(deserialize_with = "lenient::int")]
    pub room_number: i32,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(rename = "N", default, deserialize_with = "lenient::int")]
    pub north: i32,
    #[serde(rename = "S", default, deserialize_with = "lenient::int")]
    pub south: i32,
    #[serde(rename = "E", default, deserialize_with = "lenient::int")]
    pub east: i32,
    #[serde(rename = "W", default, deserialize_with = "lenient::int")]
    pub west: i32,
    #[serde(default)]
    pub puzzle: Option<String>,
    #[serde(default)]
    pub monster: Option<String>,
    #[serde(default)]
    pub items: Option<String>,
    #[serde(default)]
    pub fixtures: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub picture: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemSeed {
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::int")]
    pub weight: i32,
    #[serde(default, deserialize_with = "lenient::int")]
    pub max_uses: i32,
    #[serde(default, deserialize_with = "lenient::int")]
    pub uses_remaining: i32,
    #[serde(default, deserialize_with = "lenient::int")]
    pub value: i32,
    #[serde(default, deserialize_with = "lenient::text")]
    pub when_used: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub picture: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FixtureSeed {
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::int")]
    pub weight: i32,
    #[serde(default)]
    pub puzzle: Option<String>,
    #[serde(default = "unset_states", deserialize_with = "lenient::state")]
    pub states: i32,
    #[serde(default, deserialize_with = "lenient::text")]
    pub picture: String,
}

fn unset_states() -> i32 {
    crate::adventure::fixture::UNSET_STATE
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonsterSeed {
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(default = "yes", deserialize_with = "lenient::flag")]
    pub active: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub affects_target: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub affects_player: bool,
    pub solution: String,
    #[serde(default, deserialize_with = "lenient::int")]
    pub value: i32,
    #[serde(default, deserialize_with = "lenient::text")]
    pub effects: String,
    #[serde(default, deserialize_with = "lenient::int")]
    pub damage: i32,
    #[serde(default, deserialize_with = "lenient::text")]
    pub target: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub can_attack: bool,
    #[serde(default, deserialize_with = "lenient::text")]
    pub attack: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub picture: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PuzzleSeed {
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(default = "yes", deserialize_with = "lenient::flag")]
    pub active: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub affects_target: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub affects_player: bool,
    pub solution: String,
    #[serde(default, deserialize_with = "lenient::int")]
    pub value: i32,
    #[serde(default, deserialize_with = "lenient::text")]
    pub effects: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub target: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub picture: String,
}

fn yes() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerSeed {
    pub name: String,
    #[serde(default = "full_health", deserialize_with = "lenient::int")]
    pub health: i32,
    #[serde(default, deserialize_with = "lenient::text")]
    pub inventory: String,
    #[serde(deserialize_with = "lenient::int")]
    pub max_weight: i32,
    #[serde(default, deserialize_with = "lenient::int")]
    pub current_weight: i32,
    #[serde(deserialize_with = "lenient::int")]
    pub room_number: i32,
    #[serde(default, deserialize_with = "lenient::int")]
    pub score: i32,
    #[serde(default)]
    pub items: Vec<ItemSeed>,
}

fn full_health() -> i32 {
    crate::adventure::player::MAX_HEALTH
}

/// Deserializers that accept the loosely typed values older world files use.
mod lenient {
    use serde::de::{self, Deserializer};
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Int(i64),
        Float(f64),
        Text(String),
    }

    pub fn int<'de, D: Deserializer<'de>>(d: D) -> Result<i32, D::Error> {
        to_int(Option::<Raw>::deserialize(d)?)
    }

    fn to_int<E: de::Error>(raw: Option<Raw>) -> Result<i32, E> {
        match raw {
            None => Ok(0),
            Some(Raw::Int(n)) => i32::try_from(n).map_err(E::custom),
            Some(Raw::Float(f)) if f.fract() == 0.0 => Ok(f as i32),
            Some(Raw::Text(s)) if s.trim().is_empty() => Ok(0),
            Some(Raw::Text(s)) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("expected an integer, got '{}'", s))),
            Some(_) => Err(E::custom("expected an integer")),
        }
    }

    /// Like [`int`], but a null means "no recorded state".
    pub fn state<'de, D: Deserializer<'de>>(d: D) -> Result<i32, D::Error> {
        match Option::<Raw>::deserialize(d)? {
            None => Ok(crate::adventure::fixture::UNSET_STATE),
            raw => to_int(raw),
        }
    }

    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        match Option::<Raw>::deserialize(d)? {
            None => Ok(false),
            Some(Raw::Bool(b)) => Ok(b),
            Some(Raw::Int(n)) => Ok(n != 0),
            Some(Raw::Text(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(true),
                "false" | "no" | "0" | "" => Ok(false),
                _ => Err(de::Error::custom(format!("expected a boolean, got '{}'", s))),
            },
            Some(Raw::Float(_)) => Err(de::Error::custom("expected a boolean")),
        }
    }

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Read and parse a world file.
pub fn load_world_from_json<P: AsRef<Path>>(path: P) -> Result<GameWorld, AdventureError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let seed: WorldSeed = serde_json::from_str(&contents)?;
    debug!(
        "Parsed world seed {} ({} rooms)",
        path.display(),
        seed.rooms.len()
    );
    build_world(seed)
}

/// Split a `"A, B, C"` name list. Empty entries are skipped.
pub fn split_names(list: Option<&str>) -> Vec<String> {
    list.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn join_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let joined = names.into_iter().collect::<Vec<_>>().join(", ");
    (!joined.is_empty()).then_some(joined)
}

fn entity_from(name: &str, description: &str, picture: &str) -> NamedEntity {
    NamedEntity::new(name.trim(), description).with_picture(Some(picture.to_string()))
}

pub fn item_from_seed(seed: &ItemSeed) -> Result<Item, AdventureError> {
    Item::new(
        entity_from(&seed.name, &seed.description, &seed.picture),
        seed.max_uses,
        seed.uses_remaining,
        seed.value,
        seed.weight,
        &seed.when_used,
    )
}

fn fixture_from_seed(seed: &FixtureSeed) -> Fixture {
    Fixture::new(
        entity_from(&seed.name, &seed.description, &seed.picture),
        seed.weight,
    )
    .with_puzzle(seed.puzzle.clone())
    .with_states(seed.states)
}

fn monster_from_seed(seed: &MonsterSeed) -> Problem {
    Problem::monster(
        entity_from(&seed.name, &seed.description, &seed.picture),
        Solution::parse(&seed.solution),
        MonsterTraits {
            damage: seed.damage,
            attack: seed.attack.clone(),
            can_attack: seed.can_attack,
        },
    )
    .with_active(seed.active)
    .with_affects(seed.affects_target, seed.affects_player)
    .with_value(seed.value)
    .with_effects(&seed.effects)
    .with_target(&seed.target)
}

fn puzzle_from_seed(seed: &PuzzleSeed) -> Problem {
    Problem::puzzle(
        entity_from(&seed.name, &seed.description, &seed.picture),
        Solution::parse(&seed.solution),
    )
    .with_active(seed.active)
    .with_affects(seed.affects_target, seed.affects_player)
    .with_value(seed.value)
    .with_effects(&seed.effects)
    .with_target(&seed.target)
}

fn lookup<'a, T>(
    registry: &'a BTreeMap<String, T>,
    kind: &'static str,
    name: &str,
) -> Result<&'a T, AdventureError> {
    registry
        .get(&normalize_name(name))
        .ok_or_else(|| AdventureError::UnknownReference {
            kind,
            name: name.to_string(),
        })
}

/// Convert a parsed world seed into a live world.
///
/// Items, puzzles and monsters carry state, so each may be placed in at most
/// one room; naming one twice is `InvalidData`. Fixtures may be repeated.
/// Items that no room names are kept by the world as spares so a saved
/// inventory can still claim them.
pub fn build_world(seed: WorldSeed) -> Result<GameWorld, AdventureError> {
    let mut items = BTreeMap::new();
    for item_seed in &seed.items {
        let item = item_from_seed(item_seed)?;
        items.insert(normalize_name(item.name()), item);
    }
    let fixtures: BTreeMap<String, Fixture> = seed
        .fixtures
        .iter()
        .map(|f| (normalize_name(&f.name), fixture_from_seed(f)))
        .collect();
    let puzzles: BTreeMap<String, Problem> = seed
        .puzzles
        .iter()
        .map(|p| (normalize_name(&p.name), puzzle_from_seed(p)))
        .collect();
    let monsters: BTreeMap<String, Problem> = seed
        .monsters
        .iter()
        .map(|m| (normalize_name(&m.name), monster_from_seed(m)))
        .collect();

    for fixture in fixtures.values() {
        if let Some(puzzle) = fixture.puzzle() {
            if !puzzles.contains_key(&normalize_name(puzzle)) {
                warn!(
                    "Fixture '{}' refers to unknown puzzle '{}'",
                    fixture.name(),
                    puzzle
                );
            }
        }
    }

    let mut world = GameWorld::new(&seed.name, &seed.version);
    let mut placed: BTreeMap<String, i32> = BTreeMap::new();
    let mut place = |kind: &str, name: &str, room: i32| match placed
        .insert(format!("{}:{}", kind, normalize_name(name)), room)
    {
        Some(first) => Err(AdventureError::InvalidData(format!(
            "{} '{}' is placed in room {} and room {}",
            kind, name, first, room
        ))),
        None => Ok(()),
    };

    for room_seed in &seed.rooms {
        let number = room_seed.room_number;
        let problem = match (blank_to_none(&room_seed.puzzle), blank_to_none(&room_seed.monster)) {
            (Some(_), Some(_)) => {
                return Err(AdventureError::InvalidData(format!(
                    "room {} has both a puzzle and a monster",
                    number
                )))
            }
            (Some(name), None) => {
                let puzzle = lookup(&puzzles, "puzzle", name)?.clone();
                place("puzzle", name, number)?;
                Some(puzzle)
            }
            (None, Some(name)) => {
                let monster = lookup(&monsters, "monster", name)?.clone();
                place("monster", name, number)?;
                Some(monster)
            }
            (None, None) => None,
        };

        let mut room = Room::new(
            room_seed.room_number,
            room_seed.room_name.trim(),
            &room_seed.description,
        )
        .with_exits(Exits::new(
            room_seed.north,
            room_seed.south,
            room_seed.east,
            room_seed.west,
        ))
        .with_picture(Some(room_seed.picture.clone()))
        .with_problem(problem);

        for name in split_names(room_seed.items.as_deref()) {
            let item = lookup(&items, "item", &name)?.clone();
            place("item", &name, number)?;
            let _ = room.add_item(item);
        }
        for name in split_names(room_seed.fixtures.as_deref()) {
            let fixture = lookup(&fixtures, "fixture", &name)?.clone();
            if room.add_fixture(fixture).is_err() {
                warn!(
                    "Room {} lists fixture '{}' twice",
                    room_seed.room_number, name
                );
            }
        }

        if world.add_room(room).is_some() {
            return Err(AdventureError::InvalidData(format!(
                "duplicate room number {}",
                room_seed.room_number
            )));
        }
    }

    for (key, item) in items {
        if !placed.contains_key(&format!("item:{}", key)) {
            let _ = world.add_spare_item(item);
        }
    }

    Ok(world)
}

fn blank_to_none(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Rebuild a player from its saved form.
///
/// Inventory names are claimed first from the player's embedded items, then
/// from the world's spare items. Names that resolve to neither are dropped.
pub fn build_player(seed: PlayerSeed, world: &mut GameWorld) -> Result<Player, AdventureError> {
    if world.room(seed.room_number).is_none() {
        return Err(AdventureError::InvalidData(format!(
            "player is in room {} which the world does not define",
            seed.room_number
        )));
    }

    let mut embedded = BTreeMap::new();
    for item_seed in &seed.items {
        let item = item_from_seed(item_seed)?;
        embedded.insert(normalize_name(item.name()), item);
    }

    let mut player = Player::new(&seed.name, seed.max_weight, seed.room_number)
        .with_health(seed.health)
        .with_score(seed.score);

    for name in split_names(Some(seed.inventory.as_str())) {
        let item = embedded
            .remove(&normalize_name(&name))
            .or_else(|| world.take_spare_item(&name));
        match item {
            Some(item) => {
                if let Err(rejected) = player.restore_item(item) {
                    warn!("Dropping duplicate inventory item '{}'", rejected.name());
                }
            }
            None => warn!("Dropping unknown inventory item '{}'", name),
        }
    }

    if player.current_weight() != seed.current_weight {
        debug!(
            "Saved weight {} differs from recomputed {}; using recomputed",
            seed.current_weight,
            player.current_weight()
        );
    }

    Ok(player)
}

// ============================================================================
// Saving
// ============================================================================

fn picture_of(entity: &impl Entity) -> String {
    entity.picture().unwrap_or_default().to_string()
}

pub fn item_to_seed(item: &Item) -> ItemSeed {
    ItemSeed {
        name: item.name().to_string(),
        description: item.description().to_string(),
        weight: item.weight(),
        max_uses: item.max_uses(),
        uses_remaining: item.remaining_uses(),
        value: item.value(),
        when_used: item.when_used().to_string(),
        picture: picture_of(item),
    }
}

fn fixture_to_seed(fixture: &Fixture) -> FixtureSeed {
    FixtureSeed {
        name: fixture.name().to_string(),
        description: fixture.description().to_string(),
        weight: fixture.weight(),
        puzzle: fixture.puzzle().map(str::to_string),
        states: fixture.states(),
        picture: picture_of(fixture),
    }
}

fn problem_to_seed(problem: &Problem) -> ProblemSeed {
    match problem.kind() {
        ProblemKind::Monster(traits) => ProblemSeed::Monster(MonsterSeed {
            name: problem.name().to_string(),
            description: problem.description().to_string(),
            active: problem.is_active(),
            affects_target: problem.affects_target(),
            affects_player: problem.affects_player(),
            solution: problem.solution().to_wire(),
            value: problem.value(),
            effects: problem.effects().to_string(),
            damage: traits.damage,
            target: problem.target().to_string(),
            can_attack: traits.can_attack,
            attack: traits.attack.clone(),
            picture: picture_of(problem),
        }),
        ProblemKind::Puzzle => ProblemSeed::Puzzle(PuzzleSeed {
            name: problem.name().to_string(),
            description: problem.description().to_string(),
            active: problem.is_active(),
            affects_target: problem.affects_target(),
            affects_player: problem.affects_player(),
            solution: problem.solution().to_wire(),
            value: problem.value(),
            effects: problem.effects().to_string(),
            target: problem.target().to_string(),
            picture: picture_of(problem),
        }),
    }
}

enum ProblemSeed {
    Monster(MonsterSeed),
    Puzzle(PuzzleSeed),
}

/// Snapshot a live world into its wire form.
pub fn world_to_seed(world: &GameWorld) -> WorldSeed {
    let rooms = world
        .rooms()
        .map(|room| {
            let problem = room.problem();
            RoomSeed {
                room_name: room.name().to_string(),
                room_number: room.number(),
                description: room.description().to_string(),
                north: room.exits().north,
                south: room.exits().south,
                east: room.exits().east,
                west: room.exits().west,
                puzzle: problem
                    .filter(|p| !p.is_monster())
                    .map(|p| p.name().to_string()),
                monster: problem
                    .filter(|p| p.is_monster())
                    .map(|p| p.name().to_string()),
                items: join_names(room.items().into_iter().map(|i| i.name())),
                fixtures: join_names(room.fixtures().into_iter().map(|f| f.name())),
                picture: picture_of(room),
            }
        })
        .collect();

    let mut items: Vec<ItemSeed> = world.items().into_iter().map(item_to_seed).collect();
    items.extend(world.spare_items().iter().map(item_to_seed));
    items.sort_by_key(|item| normalize_name(&item.name));

    let mut fixtures: BTreeMap<String, FixtureSeed> = BTreeMap::new();
    for fixture in world.fixtures() {
        fixtures
            .entry(normalize_name(fixture.name()))
            .or_insert_with(|| fixture_to_seed(fixture));
    }

    let mut monsters = Vec::new();
    let mut puzzles = Vec::new();
    for problem in world.problems() {
        match problem_to_seed(problem) {
            ProblemSeed::Monster(m) => monsters.push(m),
            ProblemSeed::Puzzle(p) => puzzles.push(p),
        }
    }

    WorldSeed {
        name: world.name().to_string(),
        version: world.version().to_string(),
        rooms,
        items,
        fixtures: fixtures.into_values().collect(),
        monsters,
        puzzles,
    }
}

pub fn player_to_seed(player: &Player) -> PlayerSeed {
    let held: Vec<&Item> = player.inventory().iter().collect();
    PlayerSeed {
        name: player.name().to_string(),
        health: player.health(),
        inventory: join_names(held.iter().map(|i| i.name())).unwrap_or_default(),
        max_weight: player.max_weight(),
        current_weight: player.current_weight(),
        room_number: player.room_number(),
        score: player.score(),
        items: held.into_iter().map(item_to_seed).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD: &str = r#"{
        "name": "Tiny", "version": "1.0",
        "rooms": [
          {"room_name": "Hall", "room_number": "1", "description": "A hall",
           "N": "2", "S": 0, "E": -2, "W": 0,
           "puzzle": null, "monster": "Troll", "items": "Lamp, Rope", "fixtures": "Desk",
           "picture": "hall.png"},
          {"room_name": "Attic", "room_number": 2, "description": "Dusty",
           "N": 0, "S": 1, "E": 0, "W": 0,
           "puzzle": "Riddle", "monster": null, "items": null, "fixtures": null,
           "picture": ""}
        ],
        "items": [
          {"name": "Lamp", "description": "Brass", "weight": 2, "max_uses": 3,
           "uses_remaining": 3, "value": 10, "when_used": "Light!", "picture": null},
          {"name": "Rope", "description": "Long", "weight": "3", "max_uses": "1",
           "uses_remaining": "1", "value": "0", "when_used": "", "picture": ""},
          {"name": "Coin", "description": "Gold", "weight": 1, "max_uses": 1,
           "uses_remaining": 1, "value": 5, "when_used": "Shiny", "picture": ""}
        ],
        "fixtures": [
          {"name": "Desk", "description": "Oak", "weight": 200, "puzzle": null,
           "states": null, "picture": ""}
        ],
        "monsters": [
          {"name": "Troll", "description": "Big", "active": "true",
           "affects_target": true, "affects_player": true, "solution": "Lamp",
           "value": 20, "effects": "It flees", "damage": -10, "target": "1:Hall",
           "can_attack": true, "attack": "Bonk", "picture": ""}
        ],
        "puzzles": [
          {"name": "Riddle", "description": "What echoes?", "active": true,
           "affects_target": false, "affects_player": false, "solution": "'echo'",
           "value": 5, "effects": "Solved", "target": "2:Attic", "picture": ""}
        ]
    }"#;

    fn tiny_world() -> GameWorld {
        build_world(serde_json::from_str(WORLD).expect("parse")).expect("build")
    }

    #[test]
    fn builds_rooms_and_registries() {
        let world = tiny_world();
        assert_eq!(world.room_count(), 2);
        let hall = world.room(1).unwrap();
        assert_eq!(hall.exits().east, -2);
        assert_eq!(hall.items().len(), 2);
        assert_eq!(hall.fixtures().len(), 1);
        assert!(hall.problem().unwrap().is_monster());
        assert_eq!(hall.picture(), Some("hall.png"));
        assert_eq!(world.room(2).unwrap().picture(), None);
        assert_eq!(world.spare_items().names(), vec!["Coin"]);
    }

    #[test]
    fn unknown_room_reference_fails() {
        let mut seed: WorldSeed = serde_json::from_str(WORLD).unwrap();
        seed.rooms[1].items = Some("Sword".to_string());
        let err = build_world(seed).unwrap_err();
        assert!(matches!(err, AdventureError::UnknownReference { kind: "item", .. }));
    }

    #[test]
    fn bad_numbers_are_rejected() {
        let broken = WORLD.replace(r#""weight": "3""#, r#""weight": "heavy""#);
        assert!(serde_json::from_str::<WorldSeed>(&broken).is_err());
    }

    #[test]
    fn world_seed_round_trips() {
        let world = tiny_world();
        let seed = world_to_seed(&world);
        let rebuilt = build_world(seed.clone()).expect("rebuild");
        assert_eq!(rebuilt, world);
        assert_eq!(world_to_seed(&rebuilt), seed);
    }

    #[test]
    fn player_inventory_resolution() {
        let mut world = tiny_world();
        let seed = PlayerSeed {
            name: "Hero".to_string(),
            health: 80,
            inventory: "Coin, Ghost, Map".to_string(),
            max_weight: 10,
            current_weight: 99,
            room_number: 2,
            score: 7,
            items: vec![ItemSeed {
                name: "Map".to_string(),
                description: "Torn".to_string(),
                weight: 1,
                max_uses: 1,
                uses_remaining: 0,
                value: 0,
                when_used: String::new(),
                picture: String::new(),
            }],
        };

        let player = build_player(seed, &mut world).expect("player");
        assert_eq!(player.inventory().names(), vec!["Coin", "Map"]);
        assert_eq!(player.current_weight(), 2);
        assert_eq!(player.health(), 80);
        assert_eq!(player.score(), 7);
        // the spare coin now belongs to the player
        assert!(world.spare_items().is_empty());
    }

    #[test]
    fn player_in_missing_room_fails() {
        let mut world = tiny_world();
        let seed = PlayerSeed {
            name: "Hero".to_string(),
            health: 100,
            inventory: String::new(),
            max_weight: 10,
            current_weight: 0,
            room_number: 9,
            score: 0,
            items: Vec::new(),
        };
        assert!(matches!(
            build_player(seed, &mut world),
            Err(AdventureError::InvalidData(_))
        ));
    }

    #[test]
    fn split_names_skips_blanks() {
        assert_eq!(split_names(Some(" A, ,B ,")), vec!["A", "B"]);
        assert!(split_names(None).is_empty());
    }
}
