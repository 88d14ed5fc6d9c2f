//! battle_core - Turn-based wrestling battle engine
//!
//! This library provides:
//! - Damage formula: base roll, power bonus, speed reduction and variance
//! - BattleSession: player/opponent turn state machine with a delayed opponent reply
//! - Victory settlement into a roster store (admission, experience, defeated encounters)
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use battle_core::prelude::*;
//! use roster_core::{MemoryStorage, RosterConfig, RosterStore};
//!
//! let mut store = RosterStore::open(MemoryStorage::new(), RosterConfig::default());
//! let opponent = store.generate_opponent(&mut rng);
//! let handoff = BattleHandoff::new(store.active_wrestler().clone(), opponent, "npc-3");
//!
//! let mut battle = BattleSession::begin(handoff, BattleConstants::default())?;
//! if let MoveResult::Scheduled { handle, .. } =
//!     battle.select_move(MoveKey::Signature, &mut store, Instant::now(), &mut rng)
//! {
//!     std::thread::sleep(handle.remaining(Instant::now()));
//!     battle.advance(Instant::now(), &mut rng);
//! }
//! ```

pub mod combat;
pub mod config;
pub mod damage;
pub mod prelude;

use thiserror::Error;

// Core API - what most users need
pub use combat::{
    AdvanceResult, BattleHandoff, BattleOutcome, BattleSession, BattleState, HandoffSlot,
    MoveResult, OpponentTurnHandle,
};
pub use damage::{calculate_damage, DamageFormula};

// Configuration
pub use config::{BattleConstants, ExperiencePolicy, RetryPolicy};

/// Error starting a battle
#[derive(Debug, Error)]
pub enum BattleError {
    #[error("No battle is staged")]
    MissingHandoff,
    #[error("{0} has no HP left and cannot fight")]
    DefeatedCombatant(String),
}
