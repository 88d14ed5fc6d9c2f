//! Damage calculation
//!
//! Two random draws per hit:
//! 1. base damage, uniform over the move's `[min, max]`
//! 2. final damage, uniform over `[round(raw * 0.8), round(raw * 1.2)]`
//!    where `raw = max(1, base + power - speed * 0.1)`
//!
//! The result is never below 1.

use super::DamageFormula;
use rand::Rng;
use wrestler_core::{DamageRange, Move};

/// Draw a base damage value from a move's range
pub fn roll_base_damage(range: DamageRange, rng: &mut impl Rng) -> u32 {
    if range.min >= range.max {
        range.max
    } else {
        rng.gen_range(range.min..=range.max)
    }
}

/// Damage before variance: `max(1, base + power - speed * factor)`
pub fn raw_damage(
    formula: &DamageFormula,
    attacker_power: u32,
    defender_speed: u32,
    base_damage: u32,
) -> f64 {
    let speed_reduction = defender_speed as f64 * formula.speed_reduction_factor;
    (base_damage as f64 + attacker_power as f64 - speed_reduction).max(1.0)
}

/// Inclusive bounds the final damage is drawn from
pub fn damage_bounds(
    formula: &DamageFormula,
    attacker_power: u32,
    defender_speed: u32,
    base_damage: u32,
) -> (u32, u32) {
    let raw = raw_damage(formula, attacker_power, defender_speed, base_damage);
    let low = ((raw * (1.0 - formula.variance)).round() as u32).max(1);
    let high = ((raw * (1.0 + formula.variance)).round() as u32).max(low);
    (low, high)
}

/// Damage dealt for an already-rolled base damage, with the default formula
pub fn calculate_damage(
    attacker_power: u32,
    defender_speed: u32,
    base_damage: u32,
    rng: &mut impl Rng,
) -> u32 {
    calculate_damage_with(
        &DamageFormula::default(),
        attacker_power,
        defender_speed,
        base_damage,
        rng,
    )
}

/// Damage dealt for an already-rolled base damage
pub fn calculate_damage_with(
    formula: &DamageFormula,
    attacker_power: u32,
    defender_speed: u32,
    base_damage: u32,
    rng: &mut impl Rng,
) -> u32 {
    let (low, high) = damage_bounds(formula, attacker_power, defender_speed, base_damage);
    rng.gen_range(low..=high).max(1)
}

/// Both draws for one use of a move: base roll, then variance
pub fn roll_move_damage(
    formula: &DamageFormula,
    mv: &Move,
    attacker_power: u32,
    defender_speed: u32,
    rng: &mut impl Rng,
) -> u32 {
    let base = roll_base_damage(mv.damage_range, rng);
    calculate_damage_with(formula, attacker_power, defender_speed, base, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use wrestler_core::MoveType;

    fn make_test_rng() -> StdRng {
        StdRng::seed_from_u64(12345)
    }

    #[test]
    fn test_raw_damage() {
        let formula = DamageFormula::default();
        // 20 + 25 - 8 * 0.1 = 44.2
        let raw = raw_damage(&formula, 25, 8, 20);
        assert!((raw - 44.2).abs() < 1e-9);
    }

    #[test]
    fn test_raw_damage_floor() {
        let formula = DamageFormula::default();
        // 0 + 0 - 500 * 0.1 would be negative
        assert!((raw_damage(&formula, 0, 500, 0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bounds() {
        let formula = DamageFormula::default();
        // raw = 44.2 -> [35.36, 53.04] -> [35, 53]
        assert_eq!(damage_bounds(&formula, 25, 8, 20), (35, 53));
        // raw = 1 -> [0.8, 1.2] -> [1, 1]
        assert_eq!(damage_bounds(&formula, 0, 100, 0), (1, 1));
    }

    #[test]
    fn test_roll_base_damage_in_range() {
        let mut rng = make_test_rng();
        let range = DamageRange::new(20, 30);
        for _ in 0..1000 {
            assert!(range.contains(roll_base_damage(range, &mut rng)));
        }
        assert_eq!(roll_base_damage(DamageRange::new(7, 7), &mut rng), 7);
    }

    #[test]
    fn test_signature_move_envelope() {
        // Player {power 25, speed 20} vs opponent {speed 8} using a [20, 30] move
        let formula = DamageFormula::default();
        let signature = Move::new("Signature", 20, 30, MoveType::Signature);
        let (low, _) = damage_bounds(&formula, 25, 8, 20);
        let (_, high) = damage_bounds(&formula, 25, 8, 30);

        let mut rng = make_test_rng();
        for _ in 0..5000 {
            let damage = roll_move_damage(&formula, &signature, 25, 8, &mut rng);
            assert!(
                (low..=high).contains(&damage),
                "damage {} outside [{}, {}]",
                damage,
                low,
                high
            );
        }
    }

    #[test]
    fn test_fixed_base_envelope() {
        let mut rng = make_test_rng();
        let mut seen_low = false;
        let mut seen_high = false;
        for _ in 0..5000 {
            let damage = calculate_damage(25, 8, 20, &mut rng);
            assert!((35..=53).contains(&damage));
            seen_low |= damage == 35;
            seen_high |= damage == 53;
        }
        assert!(seen_low && seen_high);
    }

    #[test]
    fn test_zero_variance_is_deterministic() {
        let formula = DamageFormula {
            speed_reduction_factor: 0.1,
            variance: 0.0,
        };
        let mut rng = make_test_rng();
        // 10 + 10 - 10 * 0.1 = 19
        for _ in 0..100 {
            assert_eq!(calculate_damage_with(&formula, 10, 10, 10, &mut rng), 19);
        }
    }

    proptest! {
        #[test]
        fn prop_damage_at_least_one(
            power in 0u32..10_000,
            speed in 0u32..100_000,
            base in 0u32..10_000,
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let damage = calculate_damage(power, speed, base, &mut rng);
            prop_assert!(damage >= 1);

            let (low, high) = damage_bounds(&DamageFormula::default(), power, speed, base);
            prop_assert!(low <= damage && damage <= high);
        }
    }
}
