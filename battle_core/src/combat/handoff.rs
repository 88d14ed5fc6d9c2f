//! One-shot transfer of battle parameters from the world map to a battle

use serde::{Deserialize, Serialize};
use wrestler_core::Wrestler;

/// Everything a battle needs to begin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleHandoff {
    pub opponent: Wrestler,
    pub player_wrestler: Wrestler,
    /// Opaque id of the encounter source, echoed back on victory
    pub npc_id: String,
}

impl BattleHandoff {
    pub fn new(player_wrestler: Wrestler, opponent: Wrestler, npc_id: impl Into<String>) -> Self {
        BattleHandoff {
            opponent,
            player_wrestler,
            npc_id: npc_id.into(),
        }
    }
}

/// Holds at most one staged handoff until a battle consumes it
#[derive(Debug, Clone, Default)]
pub struct HandoffSlot {
    staged: Option<BattleHandoff>,
}

impl HandoffSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a handoff, returning any previous one it displaced
    pub fn stage(&mut self, handoff: BattleHandoff) -> Option<BattleHandoff> {
        self.staged.replace(handoff)
    }

    /// Consume the staged handoff, leaving the slot empty
    pub fn take(&mut self) -> Option<BattleHandoff> {
        self.staged.take()
    }

    pub fn peek(&self) -> Option<&BattleHandoff> {
        self.staged.as_ref()
    }

    pub fn is_staged(&self) -> bool {
        self.staged.is_some()
    }

    pub fn clear(&mut self) {
        self.staged = None;
    }
}
