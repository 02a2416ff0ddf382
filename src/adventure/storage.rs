//! Save slots.
//!
//! A save file holds the whole world next to the player so a restore brings
//! back solved problems, unlocked exits and moved items:
//!
//! ```json
//! { "saved_at": "2026-01-01T12:00:00Z", "world": { ... }, "player": { ... } }
//! ```
//!
//! Writes take an exclusive lock on the destination, write a sibling temp
//! file and rename it into place, so a crash never leaves a half-written save.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::adventure::entity::Entity;
use crate::adventure::errors::AdventureError;
use crate::adventure::player::Player;
use crate::adventure::seed_loader::{
    build_player, build_world, player_to_seed, world_to_seed, PlayerSeed, WorldSeed,
};
use crate::adventure::world::GameWorld;
use crate::logutil::escape_log;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaveSnapshot {
    pub saved_at: DateTime<Utc>,
    pub world: WorldSeed,
    pub player: PlayerSeed,
}

impl SaveSnapshot {
    pub fn capture(world: &GameWorld, player: &Player) -> Self {
        Self {
            saved_at: Utc::now(),
            world: world_to_seed(world),
            player: player_to_seed(player),
        }
    }

    /// Rebuild the live world and player. The player claims inventory items
    /// from the rebuilt world, so the world is built first.
    pub fn restore(self) -> Result<(GameWorld, Player), AdventureError> {
        let mut world = build_world(self.world)?;
        let player = build_player(self.player, &mut world)?;
        Ok((world, player))
    }
}

/// A single save slot on disk.
#[derive(Debug, Clone)]
pub struct GameStore {
    path: PathBuf,
}

impl GameStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Persist the current game, replacing any previous save.
    pub fn save(&self, world: &GameWorld, player: &Player) -> Result<DateTime<Utc>, AdventureError> {
        let snapshot = SaveSnapshot::capture(world, player);
        let json = serde_json::to_string_pretty(&snapshot)?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        write_file_locked(&self.path, &json)?;
        info!(
            "Saved game for {} to {} ({} bytes)",
            player_name(player),
            self.path.display(),
            json.len()
        );
        Ok(snapshot.saved_at)
    }

    pub fn read_snapshot(&self) -> Result<SaveSnapshot, AdventureError> {
        let contents = fs::read_to_string(&self.path)?;
        let snapshot: SaveSnapshot = serde_json::from_str(&contents)?;
        debug!(
            "Read snapshot from {} saved at {}",
            self.path.display(),
            snapshot.saved_at
        );
        Ok(snapshot)
    }

    /// Load the slot. Nothing in memory changes if this fails.
    pub fn load(&self) -> Result<(GameWorld, Player), AdventureError> {
        if !self.exists() {
            return Err(AdventureError::NotFound(format!(
                "no saved game at {}",
                self.path.display()
            )));
        }
        self.read_snapshot()?.restore()
    }
}

fn player_name(player: &Player) -> String {
    escape_log(player.name())
}

/// Replace `path` with `content` under an exclusive lock on `path` itself.
/// A slot created here is removed again if the write fails, so a failed
/// first save leaves nothing behind.
fn write_file_locked(path: &Path, content: &str) -> Result<(), AdventureError> {
    let existed = path.exists();
    let lock_file = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .truncate(false)
        .open(path)?;

    let result = lock_file
        .lock_exclusive()
        .map_err(AdventureError::from)
        .and_then(|()| replace_via_temp(path, content));
    let _ = lock_file.unlock();

    if result.is_err() && !existed {
        let _ = fs::remove_file(path);
    }
    result
}

fn replace_via_temp(path: &Path, content: &str) -> Result<(), AdventureError> {
    let dir = path
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let base = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("save.json");
    let mut counter = 0u32;
    let tmp_path = loop {
        let candidate = dir.join(format!(".{}.tmp-{}-{}", base, std::process::id(), counter));
        match OpenOptions::new().write(true).create_new(true).open(&candidate) {
            Ok(mut tmp) => {
                let written = tmp.write_all(content.as_bytes()).and_then(|()| tmp.flush());
                if let Err(e) = written {
                    let _ = fs::remove_file(&candidate);
                    return Err(e.into());
                }
                let _ = tmp.sync_all();
                break candidate;
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                counter = counter.saturating_add(1);
            }
            Err(e) => return Err(e.into()),
        }
    };

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    if let Ok(dir_file) = File::open(dir) {
        let _ = dir_file.sync_all();
    }
    Ok(())
}
