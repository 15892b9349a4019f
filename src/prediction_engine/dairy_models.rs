//! Closed-form dairy nutrition models
//!
//! Simplified stand-ins for the NASEM dairy equations:
//! - Metabolic body weight and maintenance energy
//! - Metabolizable protein supply
//! - Energy-, protein- and physiology-limited milk yield
//! - Milk composition and milk solids
//! - Energy balance and live-weight gain
//! - Methane from dry-matter intake
//!
//! Every function is pure; constants come from a [`ModelPreset`].

use super::preset::ModelPreset;
use crate::types::LimitingFactor;

// ============================================================================
// Energy
// ============================================================================

/// Metabolic body weight: `W^0.75` (kg).
pub fn metabolic_body_weight(cow_weight_kg: f64, preset: &ModelPreset) -> f64 {
    cow_weight_kg.powf(preset.metabolic_weight_exponent)
}

/// Maintenance ME requirement (MJ/day).
///
/// Formula: maintenance = 0.08 × W^0.75
pub fn maintenance_energy(cow_weight_kg: f64, preset: &ModelPreset) -> f64 {
    preset.maintenance_mj_per_kg_mbw * metabolic_body_weight(cow_weight_kg, preset)
}

// ============================================================================
// Protein
// ============================================================================

/// Metabolizable protein supply (g/day).
///
/// Formula: MP = CP × 0.64 + ME × 2.5
///
/// The first term approximates the efficiency of dietary protein, the second
/// microbial protein synthesised per MJ of energy. Units are loose.
pub fn mp_supply(cp_intake_g: f64, me_intake_mj: f64, preset: &ModelPreset) -> f64 {
    cp_intake_g * preset.mp_per_g_cp + me_intake_mj * preset.mp_per_mj_me
}

// ============================================================================
// Milk Yield
// ============================================================================

/// Milk yield supported by energy left after maintenance (kg/day).
///
/// Formula: max(0, (ME − maintenance − 10) / 5.0)
pub fn milk_from_energy(me_intake_mj: f64, maintenance_mj: f64, preset: &ModelPreset) -> f64 {
    ((me_intake_mj - maintenance_mj - preset.energy_offset_mj) / preset.mj_per_kg_milk).max(0.0)
}

/// Milk yield supported by metabolizable protein (kg/day).
///
/// Formula: MP / 95
pub fn milk_from_protein(mp_supply_g: f64, preset: &ModelPreset) -> f64 {
    mp_supply_g / preset.mp_g_per_kg_milk
}

/// Largest yield the cow can step up to from its current yield (kg/day).
pub fn milk_ceiling(current_milk_kg_day: f64, preset: &ModelPreset) -> f64 {
    current_milk_kg_day * preset.milk_ceiling_multiplier
}

/// Minimum of the three ceilings and which one bound.
///
/// Ties resolve in the order energy, protein, physiological.
pub fn limiting_yield(from_energy: f64, from_protein: f64, ceiling: f64) -> (f64, LimitingFactor) {
    let mut best = (from_energy, LimitingFactor::Energy);
    if from_protein < best.0 {
        best = (from_protein, LimitingFactor::Protein);
    }
    if ceiling < best.0 {
        best = (ceiling, LimitingFactor::Physiological);
    }
    best
}

// ============================================================================
// Milk Composition
// ============================================================================

/// Milk fat percentage from the preset's ration-quality driver.
///
/// Formula: fat% = base + slope × (driver / DMI) + offset
///
/// `driver_total` is total ration cost or total dietary fat (g), depending
/// on the preset. Callers guarantee `dmi_kg != 0`.
pub fn fat_percent(driver_total: f64, dmi_kg: f64, preset: &ModelPreset) -> f64 {
    preset.fat_base_pct + preset.fat_slope * (driver_total / dmi_kg) + preset.fat_offset_pct
}

/// Milk protein percentage.
///
/// Formula: protein% = 3.3 + 0.008 × (MP / milk)
///
/// With no milk there is nothing to divide over, so the baseline is returned.
pub fn protein_percent(mp_supply_g: f64, milk_kg: f64, preset: &ModelPreset) -> f64 {
    if milk_kg == 0.0 {
        return preset.protein_base_pct;
    }
    preset.protein_base_pct + preset.protein_slope * (mp_supply_g / milk_kg)
}

/// Milk solids (kg/day) from yield and composition.
///
/// Formula: MS = milk × (fat% + protein%) / 100
pub fn milk_solids(milk_kg: f64, fat_pct: f64, protein_pct: f64) -> f64 {
    milk_kg * (fat_pct + protein_pct) / 100.0
}

// ============================================================================
// Energy Balance & Live Weight
// ============================================================================

/// ME left over after maintenance, milk and the fixed offset (MJ/day).
///
/// Negative when the cow is mobilising body reserves.
pub fn energy_balance(
    me_intake_mj: f64,
    maintenance_mj: f64,
    milk_kg: f64,
    preset: &ModelPreset,
) -> f64 {
    me_intake_mj - (maintenance_mj + milk_kg * preset.mj_per_kg_milk + preset.energy_offset_mj)
}

/// Live-weight gain (kg/day), floored at the physiological loss limit.
///
/// Formula: LWG = max(floor, balance / 28)
pub fn live_weight_gain(energy_balance_mj: f64, preset: &ModelPreset) -> f64 {
    (energy_balance_mj / preset.mj_per_kg_lwg).max(preset.lwg_floor_kg)
}

// ============================================================================
// Methane
// ============================================================================

/// Enteric methane (g/day). Depends on DMI only, not on feed composition.
///
/// Formula: CH4 = 21 × DMI + offset
pub fn methane(dmi_kg: f64, preset: &ModelPreset) -> f64 {
    preset.methane_g_per_kg_dmi * dmi_kg + preset.methane_offset_g
}
