//! Prediction Engine
//!
//! Deterministic dairy ration calculations. Everything here is a pure
//! function of its arguments: the feed library, the intake vector, the
//! animal state and the model preset. Nothing is cached between calls.
//!
//! - `predict()` - full-precision metrics, or `None` for zero intake
//! - `predict_summary()` - the same, rounded for display
//! - `dairy_models` - the individual formulas
//! - `metrics` - rounding and herd economics

pub mod dairy_models;
pub mod metrics;
pub mod preset;

pub use dairy_models::{
    energy_balance, fat_percent, limiting_yield, live_weight_gain, maintenance_energy,
    metabolic_body_weight, methane, milk_ceiling, milk_from_energy, milk_from_protein,
    milk_solids, mp_supply, protein_percent,
};
pub use metrics::{extra_revenue, round_to, summarize};
pub use preset::{FatDriver, ModelPreset};

use crate::types::{AnimalState, FeedColumn, FeedLibrary, Prediction, PredictionSummary};

/// Predict milk, live-weight, cost and methane outcomes for one cow-day.
///
/// `intakes` holds kg DM per feed, positionally matched to `library`.
/// Entries past the end of the library are ignored by every total. Returns `None` when total intake is zero; callers must not display
/// metrics in that case. Inputs are otherwise used as given: range checks
/// belong to the input layer.
pub fn predict(
    animal: &AnimalState,
    library: &FeedLibrary,
    intakes: &[f64],
    preset: &ModelPreset,
) -> Option<Prediction> {
    let intakes = &intakes[..intakes.len().min(library.len())];
    let dmi_kg: f64 = intakes.iter().sum();
    if dmi_kg == 0.0 {
        tracing::debug!("Zero dry-matter intake, no prediction");
        return None;
    }

    let me_intake_mj = library.dot(FeedColumn::MetabolizableEnergy, intakes);
    let cp_intake_g = library.dot(FeedColumn::CrudeProtein, intakes);
    let feed_cost = library.dot(FeedColumn::Cost, intakes);
    let mp_supply_g = mp_supply(cp_intake_g, me_intake_mj, preset);

    let maintenance_mj = maintenance_energy(animal.cow_weight_kg, preset);
    let milk_from_energy_kg = milk_from_energy(me_intake_mj, maintenance_mj, preset);
    let milk_from_protein_kg = milk_from_protein(mp_supply_g, preset);
    let milk_ceiling_kg = milk_ceiling(animal.current_milk_kg_day, preset);
    let (milk_yield_kg, limiting_factor) =
        limiting_yield(milk_from_energy_kg, milk_from_protein_kg, milk_ceiling_kg);

    let fat_driver_total = match preset.fat_driver {
        FatDriver::RationCost => feed_cost,
        FatDriver::DietaryFat => library.dot(FeedColumn::Fat, intakes),
    };
    let fat_pct = fat_percent(fat_driver_total, dmi_kg, preset);
    let protein_pct = protein_percent(mp_supply_g, milk_yield_kg, preset);
    let milk_solids_kg = milk_solids(milk_yield_kg, fat_pct, protein_pct);

    let energy_balance_mj = energy_balance(me_intake_mj, maintenance_mj, milk_yield_kg, preset);
    let lwg_kg = live_weight_gain(energy_balance_mj, preset);
    let methane_g = methane(dmi_kg, preset);

    tracing::debug!(
        dmi = dmi_kg,
        me = me_intake_mj,
        mp = mp_supply_g,
        milk = milk_yield_kg,
        limit = %limiting_factor,
        "Prediction computed"
    );

    Some(Prediction {
        dmi_kg,
        me_intake_mj,
        cp_intake_g,
        mp_supply_g,
        maintenance_mj,
        milk_from_energy_kg,
        milk_from_protein_kg,
        milk_ceiling_kg,
        milk_yield_kg,
        limiting_factor,
        fat_pct,
        protein_pct,
        milk_solids_kg,
        energy_balance_mj,
        lwg_kg,
        feed_cost,
        methane_g,
    })
}

/// [`predict`] followed by display rounding.
pub fn predict_summary(
    animal: &AnimalState,
    library: &FeedLibrary,
    intakes: &[f64],
    preset: &ModelPreset,
) -> Option<PredictionSummary> {
    predict(animal, library, intakes, preset).map(|p| summarize(&p))
}
