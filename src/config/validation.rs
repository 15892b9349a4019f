//! Config validation: unknown-key detection with Levenshtein suggestions
//! and physical range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

use super::defaults;
use super::RivelConfig;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for RivelConfig.
///
/// Maintained by hand to match the structs in farm_config.rs.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [farm]
        "farm",
        "farm.name",
        "farm.herd_size",
        "farm.season",
        "farm.cow_weight_kg",
        "farm.current_milk_kg_day",
        // [model]
        "model",
        "model.variant",
        "model.mp_per_g_cp",
        "model.mp_per_mj_me",
        "model.maintenance_mj_per_kg_mbw",
        "model.metabolic_weight_exponent",
        "model.energy_offset_mj",
        "model.mj_per_kg_milk",
        "model.mp_g_per_kg_milk",
        "model.milk_ceiling_multiplier",
        "model.fat_driver",
        "model.fat_base_pct",
        "model.fat_slope",
        "model.fat_offset_pct",
        "model.protein_base_pct",
        "model.protein_slope",
        "model.mj_per_kg_lwg",
        "model.lwg_floor_kg",
        "model.methane_g_per_kg_dmi",
        "model.methane_offset_g",
        // [economics]
        "economics",
        "economics.milk_solids_price_per_kg",
        "economics.baseline_milk_solids_kg",
        // [server]
        "server",
        "server.addr",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

fn levenshtein(a: &str, b: &str) -> usize {
    let b_len = b.chars().count();
    if a.is_empty() {
        return b_len;
    }
    if b.is_empty() {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.chars().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
///
/// Ties go to the alphabetically first key so suggestions are stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (levenshtein(unknown, k), k))
        .filter(|(dist, _)| *dist <= 3)
        .min()
        .map(|(_, k)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// Never fails: TOML syntax errors are reported later by serde.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(),
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Physical Range Validation
// ============================================================================

fn out_of_typical_range(field: &str, value: f64, (min, max): (f64, f64)) -> Option<ValidationWarning> {
    (value < min || value > max).then(|| ValidationWarning {
        field: field.to_string(),
        message: format!("{field} = {value} is outside the calculator range ({min}-{max})"),
        suggestion: None,
    })
}

/// Validate physical ranges on a parsed RivelConfig.
///
/// Returns (errors, warnings). Errors are values the model cannot work with
/// (non-finite numbers, zero or negative divisors); warnings are values
/// outside the ranges the calculator offers.
pub fn validate_physical_ranges(config: &RivelConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let farm = &config.farm;
    let econ = &config.economics;
    let p = config.preset();

    // Every number must be finite
    let numbers = [
        ("farm.cow_weight_kg", farm.cow_weight_kg),
        ("farm.current_milk_kg_day", farm.current_milk_kg_day),
        ("economics.milk_solids_price_per_kg", econ.milk_solids_price_per_kg),
        ("economics.baseline_milk_solids_kg", econ.baseline_milk_solids_kg),
        ("model.mp_per_g_cp", p.mp_per_g_cp),
        ("model.mp_per_mj_me", p.mp_per_mj_me),
        ("model.maintenance_mj_per_kg_mbw", p.maintenance_mj_per_kg_mbw),
        ("model.metabolic_weight_exponent", p.metabolic_weight_exponent),
        ("model.energy_offset_mj", p.energy_offset_mj),
        ("model.mj_per_kg_milk", p.mj_per_kg_milk),
        ("model.mp_g_per_kg_milk", p.mp_g_per_kg_milk),
        ("model.milk_ceiling_multiplier", p.milk_ceiling_multiplier),
        ("model.fat_base_pct", p.fat_base_pct),
        ("model.fat_slope", p.fat_slope),
        ("model.fat_offset_pct", p.fat_offset_pct),
        ("model.protein_base_pct", p.protein_base_pct),
        ("model.protein_slope", p.protein_slope),
        ("model.mj_per_kg_lwg", p.mj_per_kg_lwg),
        ("model.lwg_floor_kg", p.lwg_floor_kg),
        ("model.methane_g_per_kg_dmi", p.methane_g_per_kg_dmi),
        ("model.methane_offset_g", p.methane_offset_g),
    ];
    for (name, value) in numbers {
        if !value.is_finite() {
            errors.push(format!("{name} must be a finite number (got {value})"));
        }
    }

    // Divisors
    for (name, value) in [
        ("model.mj_per_kg_milk", p.mj_per_kg_milk),
        ("model.mp_g_per_kg_milk", p.mp_g_per_kg_milk),
        ("model.mj_per_kg_lwg", p.mj_per_kg_lwg),
    ] {
        if value <= 0.0 {
            errors.push(format!("{name} = {value} must be > 0 (used as divisor)"));
        }
    }

    if p.milk_ceiling_multiplier <= 0.0 {
        errors.push(format!(
            "model.milk_ceiling_multiplier = {} must be > 0",
            p.milk_ceiling_multiplier
        ));
    } else if p.milk_ceiling_multiplier > 1.5 {
        warnings.push(ValidationWarning {
            field: "model.milk_ceiling_multiplier".to_string(),
            message: format!(
                "model.milk_ceiling_multiplier = {} allows more than a 50% step-up in yield",
                p.milk_ceiling_multiplier
            ),
            suggestion: None,
        });
    }

    if p.lwg_floor_kg > 0.0 {
        errors.push(format!(
            "model.lwg_floor_kg = {} must be <= 0 (it bounds weight loss)",
            p.lwg_floor_kg
        ));
    }

    if econ.milk_solids_price_per_kg < 0.0 {
        errors.push(format!(
            "economics.milk_solids_price_per_kg = {:.2} cannot be negative",
            econ.milk_solids_price_per_kg
        ));
    }

    if farm.herd_size == 0 {
        errors.push("farm.herd_size must be > 0".to_string());
    }
    if farm.cow_weight_kg <= 0.0 {
        errors.push(format!("farm.cow_weight_kg = {} must be > 0", farm.cow_weight_kg));
    }

    // Outside what the calculator offers: suspicious, not fatal
    let (herd_min, herd_max) = defaults::HERD_SIZE_RANGE;
    warnings.extend(
        [
            out_of_typical_range("farm.cow_weight_kg", farm.cow_weight_kg, defaults::COW_WEIGHT_RANGE_KG),
            out_of_typical_range(
                "farm.current_milk_kg_day",
                farm.current_milk_kg_day,
                defaults::CURRENT_MILK_RANGE_KG,
            ),
            out_of_typical_range(
                "farm.herd_size",
                f64::from(farm.herd_size),
                (f64::from(herd_min), f64::from(herd_max)),
            ),
        ]
        .into_iter()
        .flatten(),
    );

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================
