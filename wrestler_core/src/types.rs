use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of move slots every wrestler carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MoveKey {
    BigMove,
    Signature,
    Taunt,
    Finisher,
}

impl MoveKey {
    /// Get all move keys in slot order
    pub fn all() -> &'static [MoveKey] {
        &[
            MoveKey::BigMove,
            MoveKey::Signature,
            MoveKey::Taunt,
            MoveKey::Finisher,
        ]
    }

    /// Wire name used in saved records (`bigMove`, `signature`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveKey::BigMove => "bigMove",
            MoveKey::Signature => "signature",
            MoveKey::Taunt => "taunt",
            MoveKey::Finisher => "finisher",
        }
    }

    /// Parse a move key from its wire name or a loose user spelling
    pub fn parse(input: &str) -> Option<MoveKey> {
        let normalized: String = input
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "bigmove" | "big" => Some(MoveKey::BigMove),
            "signature" | "sig" => Some(MoveKey::Signature),
            "taunt" => Some(MoveKey::Taunt),
            "finisher" | "fin" => Some(MoveKey::Finisher),
            _ => None,
        }
    }
}

impl fmt::Display for MoveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Flavor category of a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveType {
    Power,
    Signature,
    Charisma,
    Finisher,
}

impl fmt::Display for MoveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveType::Power => write!(f, "Power"),
            MoveType::Signature => write!(f, "Signature"),
            MoveType::Charisma => write!(f, "Charisma"),
            MoveType::Finisher => write!(f, "Finisher"),
        }
    }
}

/// Inclusive damage range of a move, stored as `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct DamageRange {
    pub min: u32,
    pub max: u32,
}

impl DamageRange {
    /// Build a range, swapping the bounds if given out of order and keeping both above zero
    pub fn new(min: u32, max: u32) -> Self {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        DamageRange {
            min: lo.max(1),
            max: hi.max(1),
        }
    }

    /// Widen both bounds, as happens on level-up
    pub fn widen(&mut self, min_step: u32, max_step: u32) {
        self.min = self.min.saturating_add(min_step);
        self.max = self.max.saturating_add(max_step);
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

impl From<[u32; 2]> for DamageRange {
    fn from([min, max]: [u32; 2]) -> Self {
        DamageRange::new(min, max)
    }
}

impl From<DamageRange> for [u32; 2] {
    fn from(range: DamageRange) -> Self {
        [range.min, range.max]
    }
}

impl fmt::Display for DamageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// A single move a wrestler can perform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub name: String,
    #[serde(rename = "damage", alias = "damageRange")]
    pub damage_range: DamageRange,
    #[serde(rename = "type")]
    pub move_type: MoveType,
}

impl Move {
    pub fn new(name: impl Into<String>, min: u32, max: u32, move_type: MoveType) -> Self {
        Move {
            name: name.into(),
            damage_range: DamageRange::new(min, max),
            move_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_key_wire_names() {
        let json = serde_json::to_string(&MoveKey::BigMove).unwrap();
        assert_eq!(json, "\"bigMove\"");
        let key: MoveKey = serde_json::from_str("\"finisher\"").unwrap();
        assert_eq!(key, MoveKey::Finisher);
    }

    #[test]
    fn test_move_key_parse_loose() {
        assert_eq!(MoveKey::parse("Big Move"), Some(MoveKey::BigMove));
        assert_eq!(MoveKey::parse("big_move"), Some(MoveKey::BigMove));
        assert_eq!(MoveKey::parse("SIG"), Some(MoveKey::Signature));
        assert_eq!(MoveKey::parse("dropkick"), None);
    }

    #[test]
    fn test_damage_range_normalizes() {
        let range = DamageRange::new(30, 20);
        assert_eq!(range, DamageRange { min: 20, max: 30 });

        let range = DamageRange::new(0, 0);
        assert_eq!(range, DamageRange { min: 1, max: 1 });
    }

    #[test]
    fn test_move_json_shape() {
        let mv = Move::new("Signature", 20, 30, MoveType::Signature);
        let value = serde_json::to_value(&mv).unwrap();
        assert_eq!(value["damage"], serde_json::json!([20, 30]));
        assert_eq!(value["type"], "signature");

        let parsed: Move = serde_json::from_str(
            r#"{"name":"Taunt","damageRange":[5,10],"type":"charisma"}"#,
        )
        .unwrap();
        assert_eq!(parsed.damage_range, DamageRange { min: 5, max: 10 });
    }
}
