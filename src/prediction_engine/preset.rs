//! Model presets: every tunable constant of the prediction formulas.
//!
//! The two calculator variants share most constants and differ only in the
//! physiological ceiling, the live-weight-loss floor, the methane offset and
//! what drives milk fat percentage. Both are exposed as named presets; the
//! configuration file can override individual constants on top of either.

use serde::{Deserialize, Serialize};

use crate::types::ModelVariant;

/// What drives the linear adjustment to milk fat percentage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FatDriver {
    /// Average ration cost (NZD per kg DM), a proxy for energy density
    RationCost,
    /// Average dietary fat (g per kg DM)
    DietaryFat,
}

/// Constants for one prediction model configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ModelPreset {
    pub variant: ModelVariant,

    // --- Protein ---
    /// MP supplied per g of crude protein intake
    pub mp_per_g_cp: f64,
    /// MP (microbial) supplied per MJ of ME intake
    pub mp_per_mj_me: f64,

    // --- Energy ---
    /// Maintenance ME per kg of metabolic body weight (MJ)
    pub maintenance_mj_per_kg_mbw: f64,
    /// Allometric exponent for metabolic body weight
    pub metabolic_weight_exponent: f64,
    /// Fixed non-maintenance energy offset (MJ/day)
    pub energy_offset_mj: f64,

    // --- Milk ---
    /// ME cost of one kg of milk (MJ)
    pub mj_per_kg_milk: f64,
    /// MP cost of one kg of milk (g)
    pub mp_g_per_kg_milk: f64,
    /// Max yield as a multiple of current yield
    pub milk_ceiling_multiplier: f64,

    // --- Milk composition ---
    pub fat_driver: FatDriver,
    pub fat_base_pct: f64,
    pub fat_slope: f64,
    pub fat_offset_pct: f64,
    pub protein_base_pct: f64,
    /// Protein % per g of MP supplied per kg of milk
    pub protein_slope: f64,

    // --- Live weight ---
    /// ME per kg of live-weight change (MJ)
    pub mj_per_kg_lwg: f64,
    /// Most negative LWG allowed (kg/day)
    pub lwg_floor_kg: f64,

    // --- Methane ---
    pub methane_g_per_kg_dmi: f64,
    pub methane_offset_g: f64,
}

impl ModelPreset {
    /// 7-feed calculator: 1.18 ceiling, cost-driven fat, methane +180 g.
    pub const STANDARD: ModelPreset = ModelPreset {
        variant: ModelVariant::Standard,
        mp_per_g_cp: 0.64,
        mp_per_mj_me: 2.5,
        maintenance_mj_per_kg_mbw: 0.08,
        metabolic_weight_exponent: 0.75,
        energy_offset_mj: 10.0,
        mj_per_kg_milk: 5.0,
        mp_g_per_kg_milk: 95.0,
        milk_ceiling_multiplier: 1.18,
        fat_driver: FatDriver::RationCost,
        fat_base_pct: 4.1,
        fat_slope: 0.04,
        fat_offset_pct: 0.0,
        protein_base_pct: 3.3,
        protein_slope: 0.008,
        mj_per_kg_lwg: 28.0,
        lwg_floor_kg: -1.2,
        methane_g_per_kg_dmi: 21.0,
        methane_offset_g: 180.0,
    };

    /// 6-feed composition calculator: 1.15 ceiling, fat-driven fat % with a
    /// flat -0.1, methane +200 g.
    pub const COMPOSITION: ModelPreset = ModelPreset {
        variant: ModelVariant::Composition,
        milk_ceiling_multiplier: 1.15,
        fat_driver: FatDriver::DietaryFat,
        fat_slope: 0.01,
        fat_offset_pct: -0.1,
        lwg_floor_kg: -1.0,
        methane_offset_g: 200.0,
        ..Self::STANDARD
    };

    pub fn for_variant(variant: ModelVariant) -> Self {
        match variant {
            ModelVariant::Standard => Self::STANDARD,
            ModelVariant::Composition => Self::COMPOSITION,
        }
    }
}

impl Default for ModelPreset {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variants_differ_only_where_expected() {
        let a = ModelPreset::STANDARD;
        let b = ModelPreset::COMPOSITION;
        assert_eq!(a.milk_ceiling_multiplier, 1.18);
        assert_eq!(b.milk_ceiling_multiplier, 1.15);
        assert_eq!(a.methane_offset_g, 180.0);
        assert_eq!(b.methane_offset_g, 200.0);
        assert_eq!(a.lwg_floor_kg, -1.2);
        assert_eq!(b.lwg_floor_kg, -1.0);
        assert_eq!(a.fat_driver, FatDriver::RationCost);
        assert_eq!(b.fat_driver, FatDriver::DietaryFat);

        assert_eq!(a.mp_per_g_cp, b.mp_per_g_cp);
        assert_eq!(a.mp_g_per_kg_milk, b.mp_g_per_kg_milk);
        assert_eq!(a.mj_per_kg_lwg, b.mj_per_kg_lwg);
    }

    #[test]
    fn test_for_variant() {
        assert_eq!(ModelPreset::for_variant(ModelVariant::Composition), ModelPreset::COMPOSITION);
        assert_eq!(ModelPreset::default().variant, ModelVariant::Standard);
    }
}
