//! Damage engine - turning a move and two stat lines into HP lost

mod calculation;

pub use calculation::{
    calculate_damage, calculate_damage_with, damage_bounds, raw_damage, roll_base_damage,
    roll_move_damage,
};

/// Coefficients of the damage formula
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageFormula {
    /// Defender speed is multiplied by this and subtracted from raw damage
    pub speed_reduction_factor: f64,
    /// Final damage is drawn from `[raw * (1 - variance), raw * (1 + variance)]`
    pub variance: f64,
}

impl Default for DamageFormula {
    fn default() -> Self {
        DamageFormula {
            speed_reduction_factor: 0.1,
            variance: 0.2,
        }
    }
}
