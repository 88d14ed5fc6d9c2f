use crate::types::{Move, MoveKey, MoveType};
use crate::WrestlerError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Base max HP of a level 1 wrestler
pub const BASE_MAX_HP: u32 = 100;
/// Base power of a level 1 wrestler
pub const BASE_POWER: u32 = 10;
/// Base speed of a level 1 wrestler
pub const BASE_SPEED: u32 = 8;
/// Base charisma of a level 1 wrestler
pub const BASE_CHARISMA: u32 = 7;

/// Max HP gained per level
pub const MAX_HP_PER_LEVEL: u32 = 20;
/// Power gained per level
pub const POWER_PER_LEVEL: u32 = 2;
/// Speed gained per level
pub const SPEED_PER_LEVEL: u32 = 1;
/// Charisma gained per level
pub const CHARISMA_PER_LEVEL: u32 = 1;
/// How far each move's damage range widens per level, as `(min, max)`
pub const MOVE_WIDEN_PER_LEVEL: (u32, u32) = (2, 3);
/// Highest level the factory builds; requests above it are clamped
pub const MAX_LEVEL: u32 = 1000;

/// Unique identifier of a wrestler, stable for its lifetime
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WrestlerId(String);

impl WrestlerId {
    /// Mint a fresh random identifier
    pub fn new() -> Self {
        WrestlerId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for WrestlerId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for WrestlerId {
    fn from(value: &str) -> Self {
        WrestlerId(value.to_string())
    }
}

impl From<String> for WrestlerId {
    fn from(value: String) -> Self {
        WrestlerId(value)
    }
}

impl fmt::Display for WrestlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A wrestler with stats, moves and progression state
///
/// Serialized with the camelCase field names of the saved game records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wrestler {
    pub id: WrestlerId,
    pub name: String,
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub power: u32,
    pub speed: u32,
    pub charisma: u32,
    #[serde(default)]
    pub experience: u32,
    pub moves: BTreeMap<MoveKey, Move>,
}

impl Wrestler {
    /// Build a wrestler at `level` with the standard stat curve
    ///
    /// Levels are clamped into `[1, MAX_LEVEL]`.
    pub fn new(name: impl Into<String>, level: u32) -> Self {
        let level = level.clamp(1, MAX_LEVEL);
        let gained = level - 1;
        let max_hp = BASE_MAX_HP + gained * MAX_HP_PER_LEVEL;

        Wrestler {
            id: WrestlerId::new(),
            name: name.into(),
            level,
            hp: max_hp,
            max_hp,
            power: BASE_POWER + gained * POWER_PER_LEVEL,
            speed: BASE_SPEED + gained * SPEED_PER_LEVEL,
            charisma: BASE_CHARISMA + gained * CHARISMA_PER_LEVEL,
            experience: 0,
            moves: default_moves(),
        }
    }

    /// Look up one of this wrestler's moves
    pub fn get_move(&self, key: MoveKey) -> Result<&Move, WrestlerError> {
        self.moves.get(&key).ok_or(WrestlerError::UnknownMove(key))
    }

    /// Move keys this wrestler can choose from, in slot order
    pub fn move_keys(&self) -> Vec<MoveKey> {
        self.moves.keys().copied().collect()
    }

    /// A wrestler at zero HP is out of the match
    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    /// Subtract damage, flooring HP at zero. Returns the HP actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Restore HP up to max. Returns the HP actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }

    pub fn heal_full(&mut self) {
        self.hp = self.max_hp;
    }

    /// Pull HP back into `[0, max_hp]` after an arbitrary edit
    pub fn clamp_hp(&mut self) {
        self.hp = self.hp.min(self.max_hp);
    }

    /// Raise the wrestler one level: stats grow, moves widen, HP fully restored
    pub fn level_up(&mut self) {
        self.level = self.level.saturating_add(1);
        self.max_hp = self.max_hp.saturating_add(MAX_HP_PER_LEVEL);
        self.hp = self.max_hp;
        self.power = self.power.saturating_add(POWER_PER_LEVEL);
        self.speed = self.speed.saturating_add(SPEED_PER_LEVEL);
        self.charisma = self.charisma.saturating_add(CHARISMA_PER_LEVEL);

        let (min_step, max_step) = MOVE_WIDEN_PER_LEVEL;
        for mv in self.moves.values_mut() {
            mv.damage_range.widen(min_step, max_step);
        }
    }

    /// Experience required to reach the next level
    pub fn experience_to_next_level(&self, experience_per_level: u32) -> u32 {
        self.level.saturating_mul(experience_per_level)
    }

    /// Add experience and report whether a level-up threshold was crossed
    ///
    /// When the threshold (`level * experience_per_level`) is met it is
    /// subtracted from the accumulator. The level itself is not raised here;
    /// callers decide whether to follow up with [`Wrestler::level_up`].
    pub fn gain_experience(&mut self, amount: u32, experience_per_level: u32) -> bool {
        self.experience = self.experience.saturating_add(amount);
        let needed = self.experience_to_next_level(experience_per_level);
        if self.experience >= needed {
            self.experience -= needed;
            true
        } else {
            false
        }
    }
}

/// The four standard moves every freshly created wrestler knows
pub fn default_moves() -> BTreeMap<MoveKey, Move> {
    BTreeMap::from([
        (
            MoveKey::BigMove,
            Move::new("Big Move", 15, 25, MoveType::Power),
        ),
        (
            MoveKey::Signature,
            Move::new("Signature", 20, 30, MoveType::Signature),
        ),
        (MoveKey::Taunt, Move::new("Taunt", 5, 10, MoveType::Charisma)),
        (
            MoveKey::Finisher,
            Move::new("Finisher", 30, 40, MoveType::Finisher),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DamageRange;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_level_one_template() {
        let w = Wrestler::new("Sting", 1);
        assert_eq!(w.level, 1);
        assert_eq!(w.hp, 100);
        assert_eq!(w.max_hp, 100);
        assert_eq!(w.power, 10);
        assert_eq!(w.speed, 8);
        assert_eq!(w.charisma, 7);
        assert_eq!(w.experience, 0);
        assert_eq!(w.moves.len(), 4);
        assert_eq!(
            w.moves[&MoveKey::Finisher].damage_range,
            DamageRange { min: 30, max: 40 }
        );
    }

    #[test]
    fn test_level_zero_clamped() {
        let w = Wrestler::new("Rookie", 0);
        assert_eq!(w.level, 1);
        assert_eq!(w.max_hp, 100);
    }

    #[test]
    fn test_level_above_max_clamped() {
        let w = Wrestler::new("Giant", u32::MAX);
        assert_eq!(w.level, MAX_LEVEL);
        assert_eq!(w.max_hp, 100 + (MAX_LEVEL - 1) * 20);
        assert_eq!(w.power, 10 + (MAX_LEVEL - 1) * 2);
    }

    #[test]
    fn test_level_up_saturates() {
        let mut w = Wrestler::new("Giant", 1);
        w.level = u32::MAX;
        w.max_hp = u32::MAX - 5;
        w.power = u32::MAX;
        w.level_up();
        assert_eq!(w.level, u32::MAX);
        assert_eq!(w.max_hp, u32::MAX);
        assert_eq!(w.hp, u32::MAX);
        assert_eq!(w.power, u32::MAX);
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<WrestlerId> = (0..500).map(|_| Wrestler::new("Clone", 1).id).collect();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = WrestlerId::new();
        let value = serde_json::to_value(&id).unwrap();
        assert_eq!(value.as_str(), Some(id.as_str()));
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn test_take_damage_floors_at_zero() {
        let mut w = Wrestler::new("Edge", 1);
        assert_eq!(w.take_damage(30), 30);
        assert_eq!(w.hp, 70);
        assert_eq!(w.take_damage(500), 70);
        assert_eq!(w.hp, 0);
        assert!(w.is_defeated());
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut w = Wrestler::new("Christian", 1);
        w.hp = 90;
        assert_eq!(w.heal(50), 10);
        assert_eq!(w.hp, w.max_hp);
    }

    #[test]
    fn test_level_up_widens_moves() {
        let mut w = Wrestler::new("Kane", 2);
        w.hp = 1;
        w.level_up();
        assert_eq!(w.level, 3);
        assert_eq!(w.max_hp, 140);
        assert_eq!(w.hp, 140);
        assert_eq!(w.power, 14);
        assert_eq!(w.speed, 10);
        assert_eq!(w.charisma, 9);
        assert_eq!(
            w.moves[&MoveKey::BigMove].damage_range,
            DamageRange { min: 17, max: 28 }
        );
        assert_eq!(
            w.moves[&MoveKey::Taunt].damage_range,
            DamageRange { min: 7, max: 13 }
        );
    }

    #[test]
    fn test_gain_experience_threshold() {
        let mut w = Wrestler::new("Christian", 2);
        // Level 2 needs 200 at 100 per level
        assert!(!w.gain_experience(150, 100));
        assert_eq!(w.experience, 150);
        assert!(w.gain_experience(100, 100));
        assert_eq!(w.experience, 50);
        assert_eq!(w.level, 2);
    }

    #[test]
    fn test_json_round_trip_uses_camel_case() {
        let w = Wrestler::new("The Rock", 3);
        let value = serde_json::to_value(&w).unwrap();
        assert_eq!(value["maxHp"], 140);
        assert!(value["moves"]["bigMove"].is_object());

        let back: Wrestler = serde_json::from_value(value).unwrap();
        assert_eq!(back, w);
    }

    #[test]
    fn test_unknown_move() {
        let mut w = Wrestler::new("Goldberg", 1);
        w.moves.remove(&MoveKey::Taunt);
        assert!(matches!(
            w.get_move(MoveKey::Taunt),
            Err(WrestlerError::UnknownMove(MoveKey::Taunt))
        ));
    }

    proptest! {
        #[test]
        fn prop_template_formula(level in 1u32..200) {
            let w = Wrestler::new("Prop", level);
            prop_assert_eq!(w.max_hp, 100 + (level - 1) * 20);
            prop_assert_eq!(w.hp, w.max_hp);
            prop_assert_eq!(w.power, 10 + (level - 1) * 2);
            prop_assert_eq!(w.speed, 8 + (level - 1));
            prop_assert_eq!(w.charisma, 7 + (level - 1));
        }

        #[test]
        fn prop_level_up_is_monotonic(level in 1u32..100, hp in 0u32..100) {
            let mut w = Wrestler::new("Prop", level);
            w.hp = hp.min(w.max_hp);
            let before = w.clone();
            w.level_up();
            prop_assert!(w.level > before.level);
            prop_assert!(w.max_hp > before.max_hp);
            prop_assert!(w.power > before.power);
            prop_assert!(w.speed > before.speed);
            prop_assert!(w.charisma > before.charisma);
            prop_assert_eq!(w.hp, w.max_hp);
            for (key, mv) in &w.moves {
                let old = &before.moves[key].damage_range;
                prop_assert!(mv.damage_range.min > old.min);
                prop_assert!(mv.damage_range.max > old.max);
            }
        }
    }
}
