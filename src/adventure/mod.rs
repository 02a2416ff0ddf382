//! The adventure engine: entity model, world graph, JSON persistence and the
//! command controller.

pub mod commands;
pub mod container;
pub mod entity;
pub mod errors;
pub mod fixture;
pub mod item;
pub mod output;
pub mod player;
pub mod problem;
pub mod room;
pub mod seed_loader;
pub mod storage;
pub mod world;

pub use commands::{parse_command, CommandOutcome, GameCommand, GameController};
pub use container::EntityContainer;
pub use entity::{names_match, normalize_name, Entity, NamedEntity, Valuable, Weighted};
pub use errors::AdventureError;
pub use fixture::Fixture;
pub use item::Item;
pub use output::{BufferedOutput, ConsoleOutput, OutputSink};
pub use player::{Player, MAX_HEALTH};
pub use problem::{
    ExactText, MonsterTraits, Problem, ProblemKind, Solution, SolutionValidator, SolveOutcome,
    Submission, UsableItem,
};
pub use room::{Direction, ExitState, Exits, Room, RoomEntity};
pub use seed_loader::{build_player, build_world, load_world_from_json, world_to_seed};
pub use storage::{GameStore, SaveSnapshot};
pub use world::{GameWorld, MoveOutcome};
