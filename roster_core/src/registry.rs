use crate::config::RosterConfig;
use crate::opponents::generate_opponent;
use crate::storage::{Storage, DEFEATED_NPCS_KEY, PLAYER_KEY, ROSTER_KEY};
use crate::RosterError;
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use wrestler_core::{Wrestler, WrestlerId};

/// Aggregate view of the captured roster (the active player is not counted)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterSummary {
    pub count: usize,
    pub average_level: u32,
    pub highest_level: u32,
}

/// The durable roster, active player slot and defeated-encounter set
///
/// Constructed once per game session and passed by reference to whatever
/// needs it. Every mutation is written through to the storage backend;
/// a failed write is logged and the in-memory state stays authoritative.
#[derive(Debug)]
pub struct RosterStore<S: Storage> {
    storage: S,
    config: RosterConfig,
    roster: Vec<Wrestler>,
    player: Wrestler,
    defeated: Vec<String>,
}

impl<S: Storage> RosterStore<S> {
    /// Load the roster, player and defeated set from storage
    ///
    /// Missing or unreadable records fall back to defaults. A missing player
    /// is created from the configured default stats and saved immediately.
    pub fn open(storage: S, config: RosterConfig) -> Self {
        let mut roster: Vec<Wrestler> =
            load_or_default(&storage, ROSTER_KEY).unwrap_or_default();
        for wrestler in &mut roster {
            wrestler.clamp_hp();
        }
        let defeated: Vec<String> =
            load_or_default(&storage, DEFEATED_NPCS_KEY).unwrap_or_default();
        let loaded_player: Option<Wrestler> = load_or_default(&storage, PLAYER_KEY);

        let needs_player = loaded_player.is_none();
        let mut player = loaded_player.unwrap_or_else(|| config.default_player.build());
        player.clamp_hp();

        let mut store = RosterStore {
            storage,
            config,
            roster,
            player,
            defeated,
        };

        if needs_player {
            info!(name = %store.player.name, "created default player wrestler");
            store.persist_player();
        }

        debug!(
            roster = store.roster.len(),
            defeated = store.defeated.len(),
            "opened roster store"
        );
        store
    }

    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Give back the storage backend, dropping the store
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Captured wrestlers in admission order
    pub fn roster(&self) -> &[Wrestler] {
        &self.roster
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    pub fn is_full(&self) -> bool {
        self.roster.len() >= self.config.capacity
    }

    pub fn get(&self, id: &WrestlerId) -> Option<&Wrestler> {
        self.roster.iter().find(|w| &w.id == id)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.roster.iter().any(|w| w.name == name)
    }

    /// Admit a wrestler. Never replaces an existing entry.
    pub fn add(&mut self, wrestler: Wrestler) -> Result<(), RosterError> {
        if self.is_full() {
            info!(name = %wrestler.name, "roster full, wrestler not admitted");
            return Err(RosterError::Full {
                capacity: self.config.capacity,
            });
        }

        if self.contains_name(&wrestler.name) {
            info!(name = %wrestler.name, "duplicate name, wrestler not admitted");
            return Err(RosterError::DuplicateName(wrestler.name));
        }

        info!(name = %wrestler.name, level = wrestler.level, "wrestler joined the roster");
        self.roster.push(wrestler);
        self.persist_roster();
        Ok(())
    }

    /// Release a wrestler from the roster, returning it
    pub fn remove(&mut self, id: &WrestlerId) -> Result<Wrestler, RosterError> {
        let index = self
            .roster
            .iter()
            .position(|w| &w.id == id)
            .ok_or_else(|| RosterError::NotFound(id.clone()))?;

        let removed = self.roster.remove(index);
        info!(name = %removed.name, "wrestler left the roster");
        self.persist_roster();
        Ok(removed)
    }

    /// Apply an arbitrary edit to one roster entry, then re-clamp HP and persist
    pub fn update<F>(&mut self, id: &WrestlerId, f: F) -> Result<(), RosterError>
    where
        F: FnOnce(&mut Wrestler),
    {
        let wrestler = self.get_mut(id)?;
        f(wrestler);
        wrestler.clamp_hp();
        self.persist_roster();
        Ok(())
    }

    /// Heal a roster entry, capped at its max HP. Returns the HP restored.
    pub fn heal(&mut self, id: &WrestlerId, amount: u32) -> Result<u32, RosterError> {
        let restored = self.get_mut(id)?.heal(amount);
        self.persist_roster();
        Ok(restored)
    }

    /// Raise a roster entry one level. Returns the new level.
    pub fn level_up(&mut self, id: &WrestlerId) -> Result<u32, RosterError> {
        let wrestler = self.get_mut(id)?;
        wrestler.level_up();
        let level = wrestler.level;
        info!(name = %wrestler.name, level, "wrestler leveled up");
        self.persist_roster();
        Ok(level)
    }

    /// The wrestler the player fights with
    pub fn active_wrestler(&self) -> &Wrestler {
        &self.player
    }

    /// Overwrite the active player slot and persist it
    pub fn save_player_wrestler(&mut self, wrestler: Wrestler) {
        debug!(name = %wrestler.name, hp = wrestler.hp, "saving player wrestler");
        self.player = wrestler;
        self.persist_player();
    }

    pub fn summary(&self) -> RosterSummary {
        if self.roster.is_empty() {
            return RosterSummary {
                count: 0,
                average_level: 0,
                highest_level: 0,
            };
        }

        let count = self.roster.len();
        let total: u64 = self.roster.iter().map(|w| w.level as u64).sum();
        let average = (total as f64 / count as f64).round() as u32;
        let highest = self.roster.iter().map(|w| w.level).max().unwrap_or(0);

        RosterSummary {
            count,
            average_level: average,
            highest_level: highest,
        }
    }

    /// Record an encounter as defeated. Returns false if it already was.
    pub fn mark_defeated(&mut self, npc_id: &str) -> bool {
        if self.is_defeated(npc_id) {
            return false;
        }
        self.defeated.push(npc_id.to_string());
        debug!(npc_id, "marked encounter defeated");
        self.persist_defeated();
        true
    }

    pub fn is_defeated(&self, npc_id: &str) -> bool {
        self.defeated.iter().any(|id| id == npc_id)
    }

    pub fn defeated_npcs(&self) -> &[String] {
        &self.defeated
    }

    /// Roll a fresh opponent from the configured name pool and level range
    pub fn generate_opponent<R: Rng>(&self, rng: &mut R) -> Wrestler {
        generate_opponent(&self.config, rng)
    }

    fn get_mut(&mut self, id: &WrestlerId) -> Result<&mut Wrestler, RosterError> {
        self.roster
            .iter_mut()
            .find(|w| &w.id == id)
            .ok_or_else(|| RosterError::NotFound(id.clone()))
    }

    fn persist_roster(&mut self) {
        if let Err(e) = self.storage.save_json(ROSTER_KEY, &self.roster) {
            warn!(error = %e, "failed to save roster");
        }
    }

    fn persist_player(&mut self) {
        if let Err(e) = self.storage.save_json(PLAYER_KEY, &self.player) {
            warn!(error = %e, "failed to save player wrestler");
        }
    }

    fn persist_defeated(&mut self) {
        if let Err(e) = self.storage.save_json(DEFEATED_NPCS_KEY, &self.defeated) {
            warn!(error = %e, "failed to save defeated encounters");
        }
    }
}

/// Load a record, treating unreadable data as absent
fn load_or_default<S: Storage, T: DeserializeOwned>(storage: &S, key: &str) -> Option<T> {
    match storage.load_json(key) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "discarding unreadable saved data");
            None
        }
    }
}
