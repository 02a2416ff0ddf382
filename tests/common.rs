//! Shared helpers for integration tests.

use std::path::{Path, PathBuf};

use textquest::adventure::{
    load_world_from_json, BufferedOutput, Exits, GameController, GameStore, GameWorld, Item,
    NamedEntity, Player, Room,
};

/// Path to a world shipped under `data/worlds`.
#[allow(dead_code)]
pub fn world_path(file: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join("worlds")
        .join(file)
}

#[allow(dead_code)]
pub fn lighthouse() -> GameWorld {
    load_world_from_json(world_path("lighthouse.json")).expect("lighthouse world loads")
}

#[allow(dead_code)]
pub fn item(name: &str, weight: i32, uses: i32) -> Item {
    Item::new(
        NamedEntity::new(name, &format!("A {}", name.to_lowercase())),
        uses,
        uses,
        1,
        weight,
        &format!("You use the {}.", name.to_lowercase()),
    )
    .expect("valid item")
}

/// Two rooms joined north/south.
#[allow(dead_code)]
pub fn corridor() -> GameWorld {
    GameWorld::new("Corridor", "1.0")
        .with_room(Room::new(1, "South End", "The south end.").with_exits(Exits::new(2, 0, 0, 0)))
        .with_room(Room::new(2, "North End", "The north end.").with_exits(Exits::new(0, 1, 0, 0)))
}

/// A controller with buffered output whose save slot lives in `dir`.
#[allow(dead_code)]
pub fn controller(world: GameWorld, player: Player, dir: &Path) -> GameController<BufferedOutput> {
    GameController::new(
        world,
        player,
        GameStore::new(dir.join("save.json")),
        BufferedOutput::new(),
    )
}

/// Run a command and return only the text it produced.
#[allow(dead_code)]
pub fn run(game: &mut GameController<BufferedOutput>, line: &str) -> String {
    game.output_mut().drain();
    game.process(line);
    game.output_mut().drain().join("\n")
}
