//! Battle reports and outcomes

use roster_core::RosterError;
use std::fmt;
use std::time::Duration;
use wrestler_core::MoveKey;

use super::schedule::OpponentTurnHandle;

/// Which corner a wrestler fights from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn other(&self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Opponent => write!(f, "opponent"),
        }
    }
}

/// One resolved move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub actor: Side,
    pub actor_name: String,
    pub move_key: MoveKey,
    pub move_name: String,
    pub damage: u32,
    pub target_hp_after: u32,
}

/// Settlement of a won battle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VictoryReport {
    pub opponent_name: String,
    /// Whether the beaten opponent joined the roster, and why not if it didn't
    pub admitted: Result<(), RosterError>,
    pub experience_gained: u32,
    /// Set when the experience award crossed the level-up threshold
    pub leveled_up: bool,
    pub npc_id: String,
}

/// Terminal result of a battle session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleOutcome {
    Victory(VictoryReport),
    Defeat,
    Aborted,
}

/// Why a move selection was not acted on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    NotStarted,
    NotPlayerTurn,
    Inactive,
    UnknownMove(MoveKey),
}

/// Result of the player choosing a move
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveResult {
    /// Rejected as a no-op; nothing changed
    Ignored(IgnoredReason),
    /// The move landed and the opponent's reply is scheduled
    Scheduled {
        report: MoveReport,
        handle: OpponentTurnHandle,
    },
    /// The move knocked the opponent out
    Victory {
        report: MoveReport,
        victory: VictoryReport,
    },
}

/// Result of driving the opponent's pending turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceResult {
    /// No live opponent turn to run (none scheduled, stale handle, or battle over)
    Idle,
    /// The opponent turn is scheduled but not yet due
    NotYetDue { remaining: Duration },
    /// The opponent had no moves and passed the turn back
    Forfeited,
    /// The opponent moved and it is the player's turn again
    PlayerTurn(MoveReport),
    /// The opponent's move knocked the player out
    Defeat(MoveReport),
}
