//! Battle session - one encounter from first move to settlement
//!
//! State flow: `NotStarted -> PlayerTurn <-> OpponentTurn -> Victory | Defeat`,
//! with `Aborted` reachable from any non-terminal state. The player move
//! resolves synchronously; the opponent reply is scheduled behind a delay and
//! only runs when driven through [`BattleSession::advance`] or
//! [`BattleSession::resolve_opponent_turn`].

use super::handoff::{BattleHandoff, HandoffSlot};
use super::result::{
    AdvanceResult, BattleOutcome, IgnoredReason, MoveReport, MoveResult, Side, VictoryReport,
};
use super::schedule::{OpponentTurnHandle, PendingOpponentTurn};
use crate::config::{BattleConstants, ExperiencePolicy, RetryPolicy};
use crate::damage::{roll_move_damage, DamageFormula};
use crate::BattleError;
use rand::seq::SliceRandom;
use rand::Rng;
use roster_core::{RosterStore, Storage};
use std::time::Instant;
use tracing::{debug, info};
use wrestler_core::{MoveKey, Wrestler};

/// Where a battle session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleState {
    NotStarted,
    PlayerTurn,
    OpponentTurn,
    Victory,
    Defeat,
    Aborted,
}

impl BattleState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BattleState::Victory | BattleState::Defeat | BattleState::Aborted
        )
    }
}

/// Whose move it is while the battle is live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    PlayerTurn,
    OpponentTurn,
}

/// A single encounter between the player's wrestler and an opponent
///
/// The session works on its own copies of both wrestlers. Nothing durable
/// changes until a victory is settled into the roster store.
#[derive(Debug, Clone)]
pub struct BattleSession {
    handoff: BattleHandoff,
    player: Wrestler,
    opponent: Wrestler,
    state: BattleState,
    constants: BattleConstants,
    pending: Option<PendingOpponentTurn>,
    next_ticket: u64,
    log: Vec<String>,
    outcome: Option<BattleOutcome>,
}

impl BattleSession {
    /// Create a session from battle parameters. The session is not started yet.
    pub fn new(handoff: BattleHandoff, constants: BattleConstants) -> Result<Self, BattleError> {
        for wrestler in [&handoff.player_wrestler, &handoff.opponent] {
            if wrestler.is_defeated() {
                return Err(BattleError::DefeatedCombatant(wrestler.name.clone()));
            }
        }
        Ok(Self::from_parts(handoff, constants))
    }

    /// Consume the staged handoff and create a session from it
    pub fn from_slot(
        slot: &mut HandoffSlot,
        constants: BattleConstants,
    ) -> Result<Self, BattleError> {
        let handoff = slot.take().ok_or(BattleError::MissingHandoff)?;
        Self::new(handoff, constants)
    }

    /// Create and start a session in one step
    pub fn begin(handoff: BattleHandoff, constants: BattleConstants) -> Result<Self, BattleError> {
        let mut session = Self::new(handoff, constants)?;
        session.start();
        Ok(session)
    }

    fn from_parts(handoff: BattleHandoff, constants: BattleConstants) -> Self {
        BattleSession {
            player: handoff.player_wrestler.clone(),
            opponent: handoff.opponent.clone(),
            handoff,
            state: BattleState::NotStarted,
            constants,
            pending: None,
            next_ticket: 1,
            log: Vec::new(),
            outcome: None,
        }
    }

    /// Open the battle with the player to move. Returns false if already started.
    pub fn start(&mut self) -> bool {
        if self.state != BattleState::NotStarted {
            return false;
        }
        self.state = BattleState::PlayerTurn;
        info!(
            player = %self.player.name,
            opponent = %self.opponent.name,
            npc_id = %self.handoff.npc_id,
            "battle started"
        );
        self.log.push(format!(
            "Battle started! {} challenges you!",
            self.opponent.name
        ));
        self.log.push("Select your move!".to_string());
        true
    }

    pub fn player(&self) -> &Wrestler {
        &self.player
    }

    pub fn opponent(&self) -> &Wrestler {
        &self.opponent
    }

    pub fn npc_id(&self) -> &str {
        &self.handoff.npc_id
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn turn(&self) -> Option<Turn> {
        match self.state {
            BattleState::PlayerTurn => Some(Turn::PlayerTurn),
            BattleState::OpponentTurn => Some(Turn::OpponentTurn),
            _ => None,
        }
    }

    /// Live battles accept moves; terminal and unstarted ones do not
    pub fn is_active(&self) -> bool {
        self.turn().is_some()
    }

    pub fn constants(&self) -> &BattleConstants {
        &self.constants
    }

    /// Human-readable battle log, oldest first
    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn outcome(&self) -> Option<&BattleOutcome> {
        self.outcome.as_ref()
    }

    /// Handle of the live scheduled opponent turn, if any
    pub fn pending_turn(&self) -> Option<OpponentTurnHandle> {
        self.pending.map(|p| p.handle())
    }

    /// Resolve the player's chosen move
    ///
    /// Out-of-turn or unknown moves are ignored without touching any state.
    /// A knockout settles the victory into `store` immediately and the
    /// opponent gets no reply; otherwise the opponent turn is scheduled
    /// `opponent_turn_delay` after `now`.
    pub fn select_move<S: Storage, R: Rng>(
        &mut self,
        key: MoveKey,
        store: &mut RosterStore<S>,
        now: Instant,
        rng: &mut R,
    ) -> MoveResult {
        match self.state {
            BattleState::PlayerTurn => {}
            BattleState::NotStarted => return MoveResult::Ignored(IgnoredReason::NotStarted),
            BattleState::OpponentTurn => {
                return MoveResult::Ignored(IgnoredReason::NotPlayerTurn)
            }
            BattleState::Victory | BattleState::Defeat | BattleState::Aborted => {
                return MoveResult::Ignored(IgnoredReason::Inactive)
            }
        }

        let formula = self.constants.damage_formula();
        let report = match strike(
            Side::Player,
            &self.player,
            &mut self.opponent,
            key,
            &formula,
            rng,
        ) {
            Ok(report) => report,
            Err(reason) => {
                debug!(?reason, "player move ignored");
                return MoveResult::Ignored(reason);
            }
        };
        self.record(&report);

        if self.opponent.is_defeated() {
            let victory = self.settle_victory(store);
            return MoveResult::Victory { report, victory };
        }

        self.state = BattleState::OpponentTurn;
        let pending =
            PendingOpponentTurn::new(self.next_ticket, now, self.constants.opponent_turn_delay());
        self.next_ticket += 1;
        self.pending = Some(pending);

        MoveResult::Scheduled {
            report,
            handle: pending.handle(),
        }
    }

    /// Run the scheduled opponent turn if it is due at `now`
    pub fn advance<R: Rng>(&mut self, now: Instant, rng: &mut R) -> AdvanceResult {
        let pending = match self.pending {
            Some(pending) if self.state == BattleState::OpponentTurn => pending,
            _ => return AdvanceResult::Idle,
        };

        if !pending.is_due(now) {
            return AdvanceResult::NotYetDue {
                remaining: pending.remaining(now),
            };
        }
        self.run_opponent_turn(rng)
    }

    /// Run the opponent turn behind `handle` now, regardless of its due time
    ///
    /// Stale handles (already fired, or from an aborted battle) do nothing.
    pub fn resolve_opponent_turn<R: Rng>(
        &mut self,
        handle: &OpponentTurnHandle,
        rng: &mut R,
    ) -> AdvanceResult {
        match self.pending {
            Some(pending) if pending.matches(handle) && self.state == BattleState::OpponentTurn => {
                self.run_opponent_turn(rng)
            }
            _ => AdvanceResult::Idle,
        }
    }

    fn run_opponent_turn<R: Rng>(&mut self, rng: &mut R) -> AdvanceResult {
        self.pending = None;

        let keys = self.opponent.move_keys();
        let Some(&key) = keys.choose(rng) else {
            debug!(opponent = %self.opponent.name, "opponent has no moves, passing turn");
            self.log
                .push(format!("{} hesitates!", self.opponent.name));
            self.back_to_player();
            return AdvanceResult::Forfeited;
        };

        let formula = self.constants.damage_formula();
        let report = match strike(
            Side::Opponent,
            &self.opponent,
            &mut self.player,
            key,
            &formula,
            rng,
        ) {
            Ok(report) => report,
            Err(_) => {
                self.back_to_player();
                return AdvanceResult::Forfeited;
            }
        };
        self.record(&report);

        if self.player.is_defeated() {
            self.enter_defeat();
            return AdvanceResult::Defeat(report);
        }

        self.back_to_player();
        AdvanceResult::PlayerTurn(report)
    }

    fn back_to_player(&mut self) {
        self.state = BattleState::PlayerTurn;
        self.log.push("Select your move!".to_string());
    }

    fn record(&mut self, report: &MoveReport) {
        let target = match report.actor {
            Side::Player => &self.opponent.name,
            Side::Opponent => &self.player.name,
        };
        debug!(
            actor = %report.actor_name,
            mv = %report.move_name,
            damage = report.damage,
            target_hp = report.target_hp_after,
            "move resolved"
        );
        self.log
            .push(format!("{} used {}!", report.actor_name, report.move_name));
        self.log
            .push(format!("Dealt {} damage to {}!", report.damage, target));
    }

    fn settle_victory<S: Storage>(&mut self, store: &mut RosterStore<S>) -> VictoryReport {
        self.state = BattleState::Victory;
        self.pending = None;
        self.log
            .push(format!("{} wins the match!", self.player.name));

        let admitted = store.add(self.opponent.clone());

        let experience = self.constants.experience_reward(self.opponent.level);
        let leveled_up = match self.constants.experience_policy {
            ExperiencePolicy::Award => {
                let due = self
                    .player
                    .gain_experience(experience, self.constants.experience_per_level);
                if due {
                    self.player.level_up();
                }
                due
            }
            ExperiencePolicy::ReportOnly => false,
        };

        store.save_player_wrestler(self.player.clone());
        store.mark_defeated(&self.handoff.npc_id);

        self.log
            .push(format!("You defeated {}!", self.opponent.name));
        match &admitted {
            Ok(()) => self
                .log
                .push(format!("{} joined your roster!", self.opponent.name)),
            Err(reason) => self.log.push(reason.to_string()),
        }
        self.log
            .push(format!("Experience gained: {}", experience));
        if leveled_up {
            self.log.push(format!(
                "{} leveled up to {}!",
                self.player.name, self.player.level
            ));
        }

        info!(
            opponent = %self.opponent.name,
            admitted = admitted.is_ok(),
            experience,
            leveled_up,
            "battle won"
        );

        let report = VictoryReport {
            opponent_name: self.opponent.name.clone(),
            admitted,
            experience_gained: experience,
            leveled_up,
            npc_id: self.handoff.npc_id.clone(),
        };
        self.outcome = Some(BattleOutcome::Victory(report.clone()));
        report
    }

    fn enter_defeat(&mut self) {
        self.state = BattleState::Defeat;
        self.pending = None;
        self.log
            .push(format!("{} was defeated!", self.player.name));
        info!(player = %self.player.name, opponent = %self.opponent.name, "battle lost");
        self.outcome = Some(BattleOutcome::Defeat);
    }

    /// Abandon a live battle. Damage already dealt stands; nothing else resolves.
    ///
    /// Returns false if the battle had already ended.
    pub fn abort(&mut self) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        self.state = BattleState::Aborted;
        self.pending = None;
        self.outcome = Some(BattleOutcome::Aborted);
        info!(npc_id = %self.handoff.npc_id, "battle aborted");
        true
    }

    /// Fresh session for the same encounter after a defeat
    ///
    /// Both wrestlers return to their staged state; under
    /// [`RetryPolicy::FullHeal`] the player also starts at full HP.
    pub fn retry(&self) -> Option<BattleSession> {
        if self.state != BattleState::Defeat {
            return None;
        }

        let mut handoff = self.handoff.clone();
        if self.constants.retry_policy == RetryPolicy::FullHeal {
            handoff.player_wrestler.heal_full();
        }

        let mut session = Self::from_parts(handoff, self.constants.clone());
        session.start();
        Some(session)
    }

    /// Discard the session, aborting it first if it was still live
    pub fn abandon(mut self) -> BattleOutcome {
        self.abort();
        self.outcome.unwrap_or(BattleOutcome::Aborted)
    }
}

/// Resolve one move from `attacker` against `defender`
fn strike<R: Rng>(
    actor: Side,
    attacker: &Wrestler,
    defender: &mut Wrestler,
    key: MoveKey,
    formula: &DamageFormula,
    rng: &mut R,
) -> Result<MoveReport, IgnoredReason> {
    if defender.is_defeated() {
        return Err(IgnoredReason::Inactive);
    }
    let mv = attacker
        .get_move(key)
        .map_err(|_| IgnoredReason::UnknownMove(key))?;

    let damage = roll_move_damage(formula, mv, attacker.power, defender.speed, rng);
    defender.take_damage(damage);

    Ok(MoveReport {
        actor,
        actor_name: attacker.name.clone(),
        move_key: key,
        move_name: mv.name.clone(),
        damage,
        target_hp_after: defender.hp,
    })
}
