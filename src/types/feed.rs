//! Feed library types: feed records, library variants and nutrient columns

use serde::{Deserialize, Serialize};

use super::Season;

// ============================================================================
// Library Variant
// ============================================================================

/// Which of the two calculator configurations is active.
///
/// The variant selects both the feed table and the model constants:
/// - **Standard**: 7 feeds with a display colour, fat % driven by ration cost
/// - **Composition**: 6 feeds with NDF/starch/fat columns, fat % driven by
///   dietary fat
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ModelVariant {
    #[default]
    Standard,
    Composition,
}

impl std::fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelVariant::Standard => write!(f, "standard"),
            ModelVariant::Composition => write!(f, "composition"),
        }
    }
}

/// Error returned when a model variant name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown model variant '{0}' (expected standard or composition)")]
pub struct ParseVariantError(pub String);

impl std::str::FromStr for ModelVariant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "a" => Ok(ModelVariant::Standard),
            "composition" | "b" => Ok(ModelVariant::Composition),
            _ => Err(ParseVariantError(s.to_string())),
        }
    }
}

// ============================================================================
// Feed Record
// ============================================================================

/// How a feed is offered on farm. Drives default intake seeding only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", content = "season", rename_all = "lowercase")]
pub enum FeedCategory {
    /// Grazed pasture at its best in the given season
    Pasture(Season),
    /// Bought-in or conserved supplement
    Supplement,
}

/// Fibre, starch and fat content (g/kg DM).
///
/// NDF and starch are carried for display; only fat is read by the
/// composition-variant fat percentage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FeedComposition {
    pub ndf_g_per_kg: f64,
    pub starch_g_per_kg: f64,
    pub fat_g_per_kg: f64,
}

/// One row of the feed library. All nutrient values are per kg dry matter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedRecord {
    pub name: String,
    pub metabolizable_energy_mj_per_kg: f64,
    pub crude_protein_g_per_kg: f64,
    /// NZD per kg DM
    pub cost_per_kg: f64,
    pub category: FeedCategory,
    /// Display colour (standard variant only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Composition columns (composition variant only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composition: Option<FeedComposition>,
}

/// A numeric column of the feed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedColumn {
    MetabolizableEnergy,
    CrudeProtein,
    Cost,
    Ndf,
    Starch,
    Fat,
}

impl FeedColumn {
    /// Value of this column for a record. Composition columns read as 0
    /// for feeds without composition data.
    pub fn value(self, feed: &FeedRecord) -> f64 {
        let comp = feed.composition.as_ref();
        match self {
            FeedColumn::MetabolizableEnergy => feed.metabolizable_energy_mj_per_kg,
            FeedColumn::CrudeProtein => feed.crude_protein_g_per_kg,
            FeedColumn::Cost => feed.cost_per_kg,
            FeedColumn::Ndf => comp.map_or(0.0, |c| c.ndf_g_per_kg),
            FeedColumn::Starch => comp.map_or(0.0, |c| c.starch_g_per_kg),
            FeedColumn::Fat => comp.map_or(0.0, |c| c.fat_g_per_kg),
        }
    }
}

// ============================================================================
// Feed Library
// ============================================================================

/// Immutable, ordered catalogue of feeds.
///
/// Intake vectors correspond to this library by position. Built once at
/// startup and shared read-only afterwards.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FeedLibrary {
    variant: ModelVariant,
    feeds: Vec<FeedRecord>,
}

impl FeedLibrary {
    pub(crate) fn new(variant: ModelVariant, feeds: Vec<FeedRecord>) -> Self {
        Self { variant, feeds }
    }

    pub fn variant(&self) -> ModelVariant {
        self.variant
    }

    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FeedRecord> {
        self.feeds.iter()
    }

    pub fn get(&self, index: usize) -> Option<&FeedRecord> {
        self.feeds.get(index)
    }

    /// Position of a feed by name (case-insensitive, surrounding whitespace ignored).
    pub fn position(&self, name: &str) -> Option<usize> {
        let needle = name.trim();
        self.feeds
            .iter()
            .position(|f| f.name.eq_ignore_ascii_case(needle))
    }

    /// Dot product of a nutrient column with an intake vector.
    ///
    /// Pairs feeds and intakes by position; extra entries on either side
    /// are ignored.
    pub fn dot(&self, column: FeedColumn, intakes: &[f64]) -> f64 {
        self.feeds
            .iter()
            .zip(intakes)
            .map(|(feed, amount)| column.value(feed) * amount)
            .sum()
    }
}

impl<'a> IntoIterator for &'a FeedLibrary {
    type Item = &'a FeedRecord;
    type IntoIter = std::slice::Iter<'a, FeedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.feeds.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_feed_library() -> FeedLibrary {
        FeedLibrary::new(
            ModelVariant::Composition,
            vec![
                FeedRecord {
                    name: "Grass".to_string(),
                    metabolizable_energy_mj_per_kg: 12.0,
                    crude_protein_g_per_kg: 200.0,
                    cost_per_kg: 0.2,
                    category: FeedCategory::Pasture(Season::Spring),
                    color: None,
                    composition: Some(FeedComposition {
                        ndf_g_per_kg: 400.0,
                        starch_g_per_kg: 20.0,
                        fat_g_per_kg: 40.0,
                    }),
                },
                FeedRecord {
                    name: "Grain".to_string(),
                    metabolizable_energy_mj_per_kg: 13.0,
                    crude_protein_g_per_kg: 100.0,
                    cost_per_kg: 0.4,
                    category: FeedCategory::Supplement,
                    color: None,
                    composition: None,
                },
            ],
        )
    }

    #[test]
    fn test_dot_product_by_position() {
        let lib = two_feed_library();
        let me = lib.dot(FeedColumn::MetabolizableEnergy, &[2.0, 1.0]);
        assert!((me - 37.0).abs() < 1e-12);
        let cost = lib.dot(FeedColumn::Cost, &[2.0, 1.0]);
        assert!((cost - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_missing_composition_reads_as_zero() {
        let lib = two_feed_library();
        let fat = lib.dot(FeedColumn::Fat, &[1.0, 5.0]);
        assert!((fat - 40.0).abs() < 1e-12);
    }

    #[test]
    fn test_position_ignores_case() {
        let lib = two_feed_library();
        assert_eq!(lib.position("grain"), Some(1));
        assert_eq!(lib.position(" GRASS "), Some(0));
        assert_eq!(lib.position("Tapioca"), None);
    }

    #[test]
    fn test_variant_parsing() {
        assert_eq!("Composition".parse::<ModelVariant>(), Ok(ModelVariant::Composition));
        assert_eq!("a".parse::<ModelVariant>(), Ok(ModelVariant::Standard));
        assert_eq!(
            "hybrid".parse::<ModelVariant>(),
            Err(ParseVariantError("hybrid".to_string()))
        );
        assert_eq!(
            ParseVariantError("hybrid".to_string()).to_string(),
            "unknown model variant 'hybrid' (expected standard or composition)"
        );
    }
}
