//! Feed Library
//!
//! Static, ordered feed tables for the two calculator variants. The tables
//! are hard-coded: loading cannot fail and always returns the same rows in
//! the same order, so callers build the library once and pass it around.
//!
//! | Feed                      | ME (MJ/kg) | CP (g/kg) | NZD/kg |
//! |---------------------------|-----------:|----------:|-------:|
//! | Ryegrass Pasture (Spring) | 12.2       | 220       | 0.23   |
//! | Ryegrass Pasture (Autumn) | 11.5       | 180       | 0.25   |
//! | PKE                       | 10.2       | 160       | 0.35   |
//! | Maize Silage              | 10.8       | 80        | 0.28   |
//! | Canola Meal               | 12.1       | 380       | 0.45   |
//! | Barley Grain              | 13.0       | 120       | 0.38   |
//! | Tapioca (standard only)   | 13.2       | 90        | 0.40   |

use crate::types::{
    FeedCategory, FeedComposition, FeedLibrary, FeedRecord, ModelVariant, Season,
};

/// (name, ME, CP, cost, category) shared by both variants.
type BaseRow = (&'static str, f64, f64, f64, FeedCategory);

const BASE_ROWS: [BaseRow; 7] = [
    ("Ryegrass Pasture (Spring)", 12.2, 220.0, 0.23, FeedCategory::Pasture(Season::Spring)),
    ("Ryegrass Pasture (Autumn)", 11.5, 180.0, 0.25, FeedCategory::Pasture(Season::Autumn)),
    ("PKE", 10.2, 160.0, 0.35, FeedCategory::Supplement),
    ("Maize Silage", 10.8, 80.0, 0.28, FeedCategory::Supplement),
    ("Canola Meal", 12.1, 380.0, 0.45, FeedCategory::Supplement),
    ("Barley Grain", 13.0, 120.0, 0.38, FeedCategory::Supplement),
    ("Tapioca", 13.2, 90.0, 0.40, FeedCategory::Supplement),
];

/// Display colours for the standard table, same order as `BASE_ROWS`.
const COLORS: [&str; 7] = [
    "#90EE90", "#228B22", "#8B4513", "#FFD700", "#DAA520", "#F4A460", "#D3D3D3",
];

/// NDF, starch, fat (g/kg DM) for the first six feeds.
const COMPOSITION: [(f64, f64, f64); 6] = [
    (400.0, 20.0, 40.0),
    (450.0, 15.0, 35.0),
    (700.0, 20.0, 90.0),
    (420.0, 300.0, 30.0),
    (250.0, 50.0, 40.0),
    (200.0, 580.0, 20.0),
];

/// Load the feed table for a variant.
pub fn load_feed_library(variant: ModelVariant) -> FeedLibrary {
    let feeds = match variant {
        ModelVariant::Standard => standard_rows(),
        ModelVariant::Composition => composition_rows(),
    };
    tracing::debug!(%variant, feeds = feeds.len(), "Feed library loaded");
    FeedLibrary::new(variant, feeds)
}

fn base_record(row: &BaseRow) -> FeedRecord {
    let (name, me, cp, cost, category) = *row;
    FeedRecord {
        name: name.to_string(),
        metabolizable_energy_mj_per_kg: me,
        crude_protein_g_per_kg: cp,
        cost_per_kg: cost,
        category,
        color: None,
        composition: None,
    }
}

fn standard_rows() -> Vec<FeedRecord> {
    BASE_ROWS
        .iter()
        .zip(COLORS)
        .map(|(row, color)| FeedRecord {
            color: Some(color.to_string()),
            ..base_record(row)
        })
        .collect()
}

fn composition_rows() -> Vec<FeedRecord> {
    BASE_ROWS
        .iter()
        .zip(COMPOSITION)
        .map(|(row, (ndf, starch, fat))| FeedRecord {
            composition: Some(FeedComposition {
                ndf_g_per_kg: ndf,
                starch_g_per_kg: starch,
                fat_g_per_kg: fat,
            }),
            ..base_record(row)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_standard_library_has_seven_coloured_rows() {
        let lib = load_feed_library(ModelVariant::Standard);
        assert_eq!(lib.len(), 7);
        assert_eq!(lib.variant(), ModelVariant::Standard);
        assert!(lib.iter().all(|f| f.color.is_some() && f.composition.is_none()));
        assert_eq!(lib.get(6).map(|f| f.name.as_str()), Some("Tapioca"));
    }

    #[test]
    fn test_composition_library_has_six_rows_without_tapioca() {
        let lib = load_feed_library(ModelVariant::Composition);
        assert_eq!(lib.len(), 6);
        assert!(lib.iter().all(|f| f.composition.is_some() && f.color.is_none()));
        assert_eq!(lib.position("Tapioca"), None);
    }

    #[test]
    fn test_names_unique_and_values_in_domain() {
        for variant in [ModelVariant::Standard, ModelVariant::Composition] {
            let lib = load_feed_library(variant);
            let names: HashSet<_> = lib.iter().map(|f| f.name.as_str()).collect();
            assert_eq!(names.len(), lib.len(), "duplicate feed name in {variant}");
            for f in &lib {
                assert!(f.metabolizable_energy_mj_per_kg > 0.0);
                assert!(f.crude_protein_g_per_kg >= 0.0);
                assert!(f.cost_per_kg >= 0.0);
            }
        }
    }

    #[test]
    fn test_loading_is_deterministic() {
        assert_eq!(
            load_feed_library(ModelVariant::Standard),
            load_feed_library(ModelVariant::Standard)
        );
    }

    #[test]
    fn test_shared_rows_agree_between_variants() {
        let a = load_feed_library(ModelVariant::Standard);
        let b = load_feed_library(ModelVariant::Composition);
        for (fa, fb) in a.iter().zip(b.iter()) {
            assert_eq!(fa.name, fb.name);
            assert_eq!(fa.metabolizable_energy_mj_per_kg, fb.metabolizable_energy_mj_per_kg);
            assert_eq!(fa.cost_per_kg, fb.cost_per_kg);
        }
    }
}
