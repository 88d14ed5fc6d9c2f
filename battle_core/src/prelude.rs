//! Prelude module for convenient imports
//!
//! ```rust
//! use battle_core::prelude::*;
//! ```

// Battle flow
pub use crate::combat::{
    AdvanceResult, BattleHandoff, BattleOutcome, BattleSession, BattleState, HandoffSlot,
    IgnoredReason, MoveReport, MoveResult, OpponentTurnHandle, Side, Turn, VictoryReport,
};
pub use crate::BattleError;

// Damage
pub use crate::damage::{calculate_damage, DamageFormula};

// Config
pub use crate::config::{BattleConstants, ExperiencePolicy, RetryPolicy};

// Re-exports from wrestler_core
pub use wrestler_core::{MoveKey, Wrestler};
