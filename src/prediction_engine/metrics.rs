//! Display rounding and herd-level economics

use crate::config::EconomicsConfig;
use crate::types::{Prediction, PredictionSummary};

/// Round to `decimals` places, ties to even.
///
/// Rounds the exact binary value, not `value * 10^decimals`: 0.175 is stored
/// as 0.17499999999999998... and rounds down to 0.17. Display only; engine
/// values stay at full precision until this point.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{value:.decimals$}").parse().unwrap_or(value)
}

/// Round a prediction into its headline figures.
pub fn summarize(prediction: &Prediction) -> PredictionSummary {
    PredictionSummary {
        milk_solids_kg: round_to(prediction.milk_solids_kg, 2),
        milk_yield_kg: round_to(prediction.milk_yield_kg, 1),
        lwg_kg: round_to(prediction.lwg_kg, 2),
        feed_cost: round_to(prediction.feed_cost, 2),
        dmi_kg: round_to(prediction.dmi_kg, 1),
        methane_g: round_to(prediction.methane_g, 0) as i64,
    }
}

/// Extra daily herd revenue over the baseline milk-solids yield (NZD, whole dollars).
///
/// Formula: round((MS − baseline) × price × herd)
///
/// Takes the displayed (already rounded) milk solids so the figure agrees
/// with what the farmer sees. Negative when the ration underperforms.
pub fn extra_revenue(milk_solids_kg: f64, herd_size: u32, economics: &EconomicsConfig) -> f64 {
    let per_cow = (milk_solids_kg - economics.baseline_milk_solids_kg)
        * economics.milk_solids_price_per_kg;
    (per_cow * f64::from(herd_size)).round_ties_even()
}
