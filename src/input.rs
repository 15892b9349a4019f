//! Input layer: farm input validation and default intake seeding
//!
//! The prediction engine accepts any numbers it is given. Everything that
//! reaches it from a person (CLI flags, HTTP bodies) passes through
//! [`FarmInputs::validate`] first, which enforces the calculator's
//! slider ranges.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::defaults;
use crate::types::{AnimalState, FeedCategory, FeedLibrary, Season};

/// Rejected farm input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    #[error("{field} = {value} is outside the accepted range {min}-{max}")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("expected {expected} intake values (one per feed), got {actual}")]
    IntakeLength { expected: usize, actual: usize },

    #[error("unknown feed '{0}'")]
    UnknownFeed(String),

    #[error("invalid intake '{0}' (expected NAME=KG)")]
    MalformedIntake(String),
}

/// Everything the calculator collects from the farmer for one prediction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FarmInputs {
    pub cow_weight_kg: f64,
    pub current_milk_kg_day: f64,
    #[serde(default = "default_herd_size")]
    pub herd_size: u32,
    #[serde(default)]
    pub season: Season,
    /// kg DM per feed, in library order
    pub intakes: Vec<f64>,
}

fn default_herd_size() -> u32 {
    defaults::HERD_SIZE
}

impl FarmInputs {
    /// Check every field against the calculator ranges. Stops at the first
    /// problem.
    pub fn validate(&self, library: &FeedLibrary) -> Result<(), InputError> {
        check_range("cow_weight_kg", self.cow_weight_kg, defaults::COW_WEIGHT_RANGE_KG)?;
        check_range(
            "current_milk_kg_day",
            self.current_milk_kg_day,
            defaults::CURRENT_MILK_RANGE_KG,
        )?;
        let (herd_min, herd_max) = defaults::HERD_SIZE_RANGE;
        check_range(
            "herd_size",
            f64::from(self.herd_size),
            (f64::from(herd_min), f64::from(herd_max)),
        )?;

        if self.intakes.len() != library.len() {
            return Err(InputError::IntakeLength {
                expected: library.len(),
                actual: self.intakes.len(),
            });
        }
        for (feed, amount) in library.iter().zip(&self.intakes) {
            check_range(&feed.name, *amount, defaults::INTAKE_RANGE_KG)?;
        }
        Ok(())
    }

    pub fn animal(&self) -> AnimalState {
        AnimalState::new(self.cow_weight_kg, self.current_milk_kg_day).with_season(self.season)
    }
}

fn check_range(field: &str, value: f64, (min, max): (f64, f64)) -> Result<(), InputError> {
    if !value.is_finite() {
        return Err(InputError::NotFinite {
            field: field.to_string(),
        });
    }
    if value < min || value > max {
        return Err(InputError::OutOfRange {
            field: field.to_string(),
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Default intake vector for a season.
///
/// Spring pasture gets the peak allowance in spring, every other pasture the
/// standard allowance, supplements start at zero.
pub fn default_intakes(library: &FeedLibrary, season: Season) -> Vec<f64> {
    library
        .iter()
        .map(|feed| match feed.category {
            FeedCategory::Pasture(Season::Spring) if season == Season::Spring => {
                defaults::PEAK_PASTURE_INTAKE_KG
            }
            FeedCategory::Pasture(_) => defaults::PASTURE_INTAKE_KG,
            FeedCategory::Supplement => 0.0,
        })
        .collect()
}

/// Build a positional intake vector from `(feed name, kg)` pairs.
///
/// Feeds not named get zero; a name given twice keeps the last amount.
pub fn intakes_from_named<'a, I>(library: &FeedLibrary, pairs: I) -> Result<Vec<f64>, InputError>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut intakes = vec![0.0; library.len()];
    for (name, kg) in pairs {
        let idx = library
            .position(name)
            .ok_or_else(|| InputError::UnknownFeed(name.to_string()))?;
        intakes[idx] = kg;
    }
    Ok(intakes)
}

/// Parse a `NAME=KG` command-line pair.
pub fn parse_named_intake(raw: &str) -> Result<(String, f64), InputError> {
    let (name, kg) = raw
        .rsplit_once('=')
        .ok_or_else(|| InputError::MalformedIntake(raw.to_string()))?;
    let kg: f64 = kg
        .trim()
        .parse()
        .map_err(|_| InputError::MalformedIntake(raw.to_string()))?;
    Ok((name.trim().to_string(), kg))
}
