//! wrestler_core - Wrestler stat and move model
//!
//! Provides the `Wrestler` record shared by the roster store and the battle
//! engine, the level-scaled factory, and the leveling rules.

mod types;
mod wrestler;

pub use types::{DamageRange, Move, MoveKey, MoveType};
pub use wrestler::{default_moves, Wrestler, WrestlerId};
pub use wrestler::{
    BASE_CHARISMA, BASE_MAX_HP, BASE_POWER, BASE_SPEED, CHARISMA_PER_LEVEL, MAX_HP_PER_LEVEL,
    MAX_LEVEL, MOVE_WIDEN_PER_LEVEL, POWER_PER_LEVEL, SPEED_PER_LEVEL,
};

use thiserror::Error;

/// Error looking up part of a wrestler
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WrestlerError {
    #[error("Unknown move: {0}")]
    UnknownMove(MoveKey),
}

/// Build a wrestler at the given level with the standard stat curve
///
/// Equivalent to [`Wrestler::new`]; levels are clamped into `[1, MAX_LEVEL]`.
pub fn create_wrestler(name: impl Into<String>, level: u32) -> Wrestler {
    Wrestler::new(name, level)
}
