//! Battle sessions: turn flow, opponent scheduling and victory settlement

mod handoff;
mod result;
mod schedule;
mod session;

pub use handoff::{BattleHandoff, HandoffSlot};
pub use result::{
    AdvanceResult, BattleOutcome, IgnoredReason, MoveReport, MoveResult, Side, VictoryReport,
};
pub use schedule::OpponentTurnHandle;
pub use session::{BattleSession, BattleState, Turn};
