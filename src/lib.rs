//! # Textquest - a room-and-puzzle text adventure engine
//!
//! Textquest loads a world of numbered rooms from JSON, places a player in
//! it and runs typed commands (`N`, `TAKE LAMP`, `ANSWER echo`, ...) against
//! that world one turn at a time.
//!
//! ## Features
//!
//! - **World files**: rooms, items, fixtures, puzzles and monsters described in
//!   one JSON document, with locked exits encoded as negative room numbers.
//! - **Puzzles and monsters**: solved by typing an answer or using an item;
//!   solving awards points and can unlock exits. Monsters strike back.
//! - **Save/Restore**: the whole world and player snapshotted to one JSON file,
//!   written atomically under a file lock.
//! - **Compact commands**: single-letter aliases for every common verb.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use textquest::adventure::{load_world_from_json, BufferedOutput, GameController, GameStore};
//!
//! fn main() -> anyhow::Result<()> {
//!     let world = load_world_from_json("data/worlds/lighthouse.json")?;
//!     let store = GameStore::new("data/saves/quicksave.json");
//!     let mut game = GameController::new_game(world, "Ada", 13, 100, store, BufferedOutput::new())?;
//!
//!     game.process("look");
//!     game.process("take lamp");
//!     println!("{}", game.output().text());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`adventure`] - entity model, world graph, persistence and the controller
//! - [`config`] - TOML configuration
//! - [`validation`] - input sanitizing and player name checks
//! - [`logutil`] - single-line escaping for log records
//! - [`metrics`] - process-wide gameplay counters

pub mod adventure;
pub mod config;
pub mod logutil;
pub mod metrics;
pub mod validation;
