//! Process-wide gameplay counters.
//!
//! Counters are plain atomics so the controller can bump them without
//! threading a handle through every call. [`snapshot`] reads them all.
use std::sync::atomic::{AtomicU64, Ordering};

static COMMANDS_PROCESSED: AtomicU64 = AtomicU64::new(0);
static COMMANDS_REJECTED: AtomicU64 = AtomicU64::new(0);
static PROBLEMS_SOLVED: AtomicU64 = AtomicU64::new(0);
static MONSTER_ATTACKS: AtomicU64 = AtomicU64::new(0);
static GAMES_SAVED: AtomicU64 = AtomicU64::new(0);
static GAMES_RESTORED: AtomicU64 = AtomicU64::new(0);

pub fn inc_commands_processed() {
    COMMANDS_PROCESSED.fetch_add(1, Ordering::Relaxed);
}

/// Unknown verbs, missing arguments and sanitizer rejections.
pub fn inc_commands_rejected() {
    COMMANDS_REJECTED.fetch_add(1, Ordering::Relaxed);
}

pub fn inc_problems_solved() {
    PROBLEMS_SOLVED.fetch_add(1, Ordering::Relaxed);
}

pub fn inc_monster_attacks() {
    MONSTER_ATTACKS.fetch_add(1, Ordering::Relaxed);
}

pub fn inc_games_saved() {
    GAMES_SAVED.fetch_add(1, Ordering::Relaxed);
}

pub fn inc_games_restored() {
    GAMES_RESTORED.fetch_add(1, Ordering::Relaxed);
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub commands_processed: u64,
    pub commands_rejected: u64,
    pub problems_solved: u64,
    pub monster_attacks: u64,
    pub games_saved: u64,
    pub games_restored: u64,
}

pub fn snapshot() -> Snapshot {
    Snapshot {
        commands_processed: COMMANDS_PROCESSED.load(Ordering::Relaxed),
        commands_rejected: COMMANDS_REJECTED.load(Ordering::Relaxed),
        problems_solved: PROBLEMS_SOLVED.load(Ordering::Relaxed),
        monster_attacks: MONSTER_ATTACKS.load(Ordering::Relaxed),
        games_saved: GAMES_SAVED.load(Ordering::Relaxed),
        games_restored: GAMES_RESTORED.load(Ordering::Relaxed),
    }
}
