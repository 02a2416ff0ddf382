mod common;

use std::fs;

use tempfile::TempDir;
use textquest::adventure::seed_loader::WorldSeed;
use textquest::adventure::{
    build_world, world_to_seed, AdventureError, BufferedOutput, Direction, Entity, ExitState,
    GameController, GameStore, GameWorld, Player, SaveSnapshot,
};

use common::{controller, lighthouse, run};

fn fresh_game(tmp: &TempDir) -> GameController<BufferedOutput> {
    controller(lighthouse(), Player::new("Ada", 13, 1), tmp.path())
}

#[test]
fn restore_brings_back_saved_state() {
    let tmp = TempDir::new().unwrap();
    let mut game = fresh_game(&tmp);

    run(&mut game, "take lamp");
    run(&mut game, "use lamp");
    run(&mut game, "n");
    run(&mut game, "answer tide");
    let text = run(&mut game, "save");
    assert!(text.contains("Game saved"));

    let saved_player = game.player().clone();
    let saved_world = game.world().clone();

    // wander off and change things after saving
    run(&mut game, "take rope");
    run(&mut game, "e");
    assert_eq!(game.player().room_number(), 4);

    let text = run(&mut game, "restore");
    assert!(text.contains("Game restored."));
    assert_eq!(game.player(), &saved_player);
    assert_eq!(game.world(), &saved_world);

    assert_eq!(game.player().room_number(), 2);
    assert_eq!(game.player().score(), 10);
    assert_eq!(game.player().item("lamp").unwrap().remaining_uses(), 2);
    let path = game.world().room(2).unwrap();
    assert_eq!(path.exit(Direction::North), ExitState::Open(3));
    assert!(!path.problem().unwrap().is_active());
    assert!(path.entity_named("Rope").is_some());
}

#[test]
fn restore_without_save_keeps_current_game() {
    let tmp = TempDir::new().unwrap();
    let mut game = fresh_game(&tmp);
    run(&mut game, "n");

    let text = run(&mut game, "restore");
    assert!(text.contains("Restore failed"));
    assert_eq!(game.player().room_number(), 2);
}

#[test]
fn corrupt_save_is_reported_and_ignored() {
    let tmp = TempDir::new().unwrap();
    let mut game = fresh_game(&tmp);
    fs::write(tmp.path().join("save.json"), "{\"saved_at\": 12").unwrap();
    run(&mut game, "take lamp");

    let text = run(&mut game, "restore");
    assert!(text.contains("Restore failed"));
    assert!(game.player().has_item("Lamp"));
}

#[test]
fn snapshot_round_trip_keeps_observable_state() {
    let tmp = TempDir::new().unwrap();
    let mut game = fresh_game(&tmp);
    for line in ["take lamp", "n", "answer tide", "e", "take fish", "take iron key"] {
        run(&mut game, line);
    }

    let snapshot = SaveSnapshot::capture(game.world(), game.player());
    let json = serde_json::to_string(&snapshot).unwrap();
    let parsed: SaveSnapshot = serde_json::from_str(&json).unwrap();
    let (world, player) = parsed.restore().unwrap();

    assert_eq!(&world, game.world());
    assert_eq!(&player, game.player());
    assert_eq!(player.inventory().names(), vec!["Fish", "Iron Key", "Lamp"]);
    assert_eq!(player.current_weight(), 6);
}

#[test]
fn world_seed_is_stable() {
    let world = lighthouse();
    let seed = world_to_seed(&world);
    let rebuilt = build_world(seed.clone()).unwrap();
    assert_eq!(world_to_seed(&rebuilt), seed);
    assert_eq!(rebuilt.room(3).unwrap().problem().unwrap().name(), "Giant Crab");
}

#[test]
fn store_writes_readable_json() {
    let tmp = TempDir::new().unwrap();
    let store = GameStore::new(tmp.path().join("nested").join("slot.json"));
    let world = lighthouse();
    store.save(&world, &Player::new("Ada", 13, 1)).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(raw["player"]["name"], "Ada");
    assert_eq!(raw["world"]["rooms"][1]["N"], -3);
    assert_eq!(raw["world"]["puzzles"][0]["active"], true);
    assert!(raw["saved_at"].is_string());
}

/// Three rooms in a column. Room 1 holds the lamp, room 2 is gated north by
/// a riddle, and both lower rooms share a pillar fixture.
const TOWERS: &str = r#"{
    "name": "Towers", "version": "1",
    "rooms": [
      {"room_name": "Yard", "room_number": 1, "description": "A yard.",
       "N": 2, "S": 0, "E": 0, "W": 0, "puzzle": null, "monster": null,
       "items": "Lamp", "fixtures": "Pillar", "picture": ""},
      {"room_name": "Hall", "room_number": 2, "description": "A hall.",
       "N": -3, "S": 1, "E": 0, "W": 0, "puzzle": "Gate", "monster": null,
       "items": ROOM2_ITEMS, "fixtures": "Pillar", "picture": ""},
      {"room_name": "Tower", "room_number": 3, "description": "A tower.",
       "N": 0, "S": 2, "E": 0, "W": 0, "puzzle": ROOM3_PUZZLE, "monster": null,
       "items": null, "fixtures": null, "picture": ""}
    ],
    "items": [
      {"name": "Lamp", "description": "Brass", "weight": 2, "max_uses": 3,
       "uses_remaining": 3, "value": 1, "when_used": "It glows.", "picture": ""}
    ],
    "fixtures": [
      {"name": "Pillar", "description": "Stone", "weight": 500, "puzzle": null,
       "states": null, "picture": ""}
    ],
    "monsters": [],
    "puzzles": [
      {"name": "Gate", "description": "A gate asks for a word.", "active": true,
       "affects_target": true, "affects_player": false, "solution": "'open'",
       "value": 10, "effects": "The gate swings wide.", "target": "2:Hall",
       "picture": ""}
    ]
}"#;

fn towers(room2_items: &str, room3_puzzle: &str) -> Result<GameWorld, AdventureError> {
    let json = TOWERS
        .replace("ROOM2_ITEMS", room2_items)
        .replace("ROOM3_PUZZLE", room3_puzzle);
    let seed: WorldSeed = serde_json::from_str(&json).expect("towers parse");
    build_world(seed)
}

#[test]
fn puzzle_placed_in_two_rooms_is_rejected() {
    let err = towers("null", "\"Gate\"").unwrap_err();
    assert!(matches!(err, AdventureError::InvalidData(ref msg) if msg.contains("Gate")));
}

#[test]
fn item_placed_in_two_rooms_is_rejected() {
    let err = towers("\"Lamp\"", "null").unwrap_err();
    assert!(matches!(err, AdventureError::InvalidData(ref msg) if msg.contains("Lamp")));
}

#[test]
fn moved_item_and_solved_puzzle_survive_round_trip() {
    let tmp = TempDir::new().unwrap();
    let world = towers("null", "null").expect("towers build");
    let mut game = controller(world, Player::new("Ada", 13, 1), tmp.path());

    for line in ["take lamp", "use lamp", "n", "answer open", "n", "drop lamp"] {
        run(&mut game, line);
    }
    assert_eq!(game.player().room_number(), 3);

    let snapshot = SaveSnapshot::capture(game.world(), game.player());
    let json = serde_json::to_string(&snapshot).unwrap();
    let (world, player) = serde_json::from_str::<SaveSnapshot>(&json)
        .unwrap()
        .restore()
        .unwrap();

    assert_eq!(&world, game.world());
    assert_eq!(&player, game.player());
    let lamp = world.room(3).unwrap().items();
    assert_eq!(lamp.len(), 1);
    assert_eq!(lamp[0].remaining_uses(), 2);
    assert!(world.room(1).unwrap().items().is_empty());
    assert!(!world.room(2).unwrap().problem().unwrap().is_active());
    assert_eq!(world.room(2).unwrap().exit(Direction::North), ExitState::Open(3));
    assert_eq!(world.room(1).unwrap().fixtures().len(), 1);
    assert_eq!(world.room(2).unwrap().fixtures().len(), 1);
}
