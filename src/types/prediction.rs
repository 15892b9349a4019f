//! Prediction outputs: full-precision detail and the rounded display summary

use serde::{Deserialize, Serialize};

/// Which of the three milk-yield ceilings was binding.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LimitingFactor {
    /// Metabolizable energy after maintenance
    Energy,
    /// Metabolizable protein supply
    Protein,
    /// Maximum step-up over current yield
    Physiological,
}

impl std::fmt::Display for LimitingFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LimitingFactor::Energy => write!(f, "Energy"),
            LimitingFactor::Protein => write!(f, "Protein"),
            LimitingFactor::Physiological => write!(f, "Physiological ceiling"),
        }
    }
}

/// Full-precision result of one prediction call.
///
/// Produced fresh per call; nothing is rounded here.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Prediction {
    /// Dry-matter intake (kg DM/day)
    pub dmi_kg: f64,
    /// Metabolizable energy intake (MJ/day)
    pub me_intake_mj: f64,
    /// Crude protein intake (g/day)
    pub cp_intake_g: f64,
    /// Metabolizable protein supply (g/day)
    pub mp_supply_g: f64,
    /// Maintenance energy requirement (MJ/day)
    pub maintenance_mj: f64,

    // Milk yield ceilings (kg/day)
    pub milk_from_energy_kg: f64,
    pub milk_from_protein_kg: f64,
    pub milk_ceiling_kg: f64,
    pub milk_yield_kg: f64,
    pub limiting_factor: LimitingFactor,

    pub fat_pct: f64,
    pub protein_pct: f64,
    /// Fat + protein (kg/day)
    pub milk_solids_kg: f64,

    /// ME intake minus all requirements (MJ/day)
    pub energy_balance_mj: f64,
    /// Live-weight gain (kg/day), floored at the preset's loss limit
    pub lwg_kg: f64,

    /// Feed cost (NZD/cow/day)
    pub feed_cost: f64,
    /// Enteric methane (g/cow/day)
    pub methane_g: f64,
}

/// Rounded metrics for display, one per headline figure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PredictionSummary {
    /// kg/cow/day, 2 dp
    pub milk_solids_kg: f64,
    /// kg/cow/day, 1 dp
    pub milk_yield_kg: f64,
    /// kg/day, 2 dp
    pub lwg_kg: f64,
    /// NZD/cow/day, 2 dp
    pub feed_cost: f64,
    /// kg DM/cow/day, 1 dp
    pub dmi_kg: f64,
    /// g/cow/day, whole grams
    pub methane_g: i64,
}
