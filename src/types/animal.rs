//! Animal-side inputs: season and the cow's current state

use serde::{Deserialize, Serialize};

// ============================================================================
// Season
// ============================================================================

/// Calendar season on a New Zealand pasture farm.
///
/// Informational for the prediction formulas; only used to seed default
/// pasture intakes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Season::Spring => write!(f, "Spring"),
            Season::Summer => write!(f, "Summer"),
            Season::Autumn => write!(f, "Autumn"),
            Season::Winter => write!(f, "Winter"),
        }
    }
}

/// Error returned when a season name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown season '{0}' (expected spring, summer, autumn or winter)")]
pub struct ParseSeasonError(pub String);

impl std::str::FromStr for Season {
    type Err = ParseSeasonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "autumn" | "fall" => Ok(Season::Autumn),
            "winter" => Ok(Season::Winter),
            _ => Err(ParseSeasonError(s.to_string())),
        }
    }
}

// ============================================================================
// Animal State
// ============================================================================

/// Per-cow parameters re-supplied on every prediction.
///
/// Only `cow_weight_kg` and `current_milk_kg_day` feed the formulas; the
/// remaining fields travel with the request for display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AnimalState {
    /// Live weight (kg)
    pub cow_weight_kg: f64,
    /// Current milk yield (kg/cow/day)
    pub current_milk_kg_day: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_in_milk: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<Season>,
}

impl AnimalState {
    pub fn new(cow_weight_kg: f64, current_milk_kg_day: f64) -> Self {
        Self {
            cow_weight_kg,
            current_milk_kg_day,
            days_in_milk: None,
            season: None,
        }
    }

    pub fn with_season(mut self, season: Season) -> Self {
        self.season = Some(season);
        self
    }
}
