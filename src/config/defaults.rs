//! System-wide default constants.
//!
//! Centralises the calculator's input ranges and farm defaults.
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Farm Inputs
// ============================================================================

/// Default cow live weight (kg).
pub const COW_WEIGHT_KG: f64 = 560.0;

/// Accepted cow live weight range (kg).
pub const COW_WEIGHT_RANGE_KG: (f64, f64) = (400.0, 750.0);

/// Default current milk yield (kg/cow/day).
pub const CURRENT_MILK_KG: f64 = 34.0;

/// Accepted current milk yield range (kg/cow/day).
pub const CURRENT_MILK_RANGE_KG: (f64, f64) = (15.0, 55.0);

/// Default herd size (cows).
pub const HERD_SIZE: u32 = 435;

/// Accepted herd size range (cows).
pub const HERD_SIZE_RANGE: (u32, u32) = (100, 2000);

/// Accepted intake per feed (kg DM/cow/day).
pub const INTAKE_RANGE_KG: (f64, f64) = (0.0, 20.0);

// ============================================================================
// Default Intakes
// ============================================================================

/// Spring pasture offered in spring (kg DM/cow/day).
pub const PEAK_PASTURE_INTAKE_KG: f64 = 12.0;

/// Any other pasture (kg DM/cow/day).
pub const PASTURE_INTAKE_KG: f64 = 10.0;

// ============================================================================
// Economics
// ============================================================================

/// Milk-solids payout (NZD per kg MS).
pub const MILK_SOLIDS_PRICE_NZD: f64 = 8.50;

/// Milk solids the herd produces without the ration change (kg/cow/day).
pub const BASELINE_MILK_SOLIDS_KG: f64 = 1.9;

// ============================================================================
// Server
// ============================================================================

/// Default HTTP bind address.
pub const SERVER_ADDR: &str = "127.0.0.1:8080";
