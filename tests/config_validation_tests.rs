//! Config Validation Tests
//!
//! Typo detection, range validation and file loading for `rivel.toml`,
//! exercised independently from the prediction engine.

use std::io::Write;

use rivel::config::validation::{
    known_config_keys, suggest_correction, validate_physical_ranges, validate_unknown_keys,
};
use rivel::config::{ConfigError, RivelConfig};
use rivel::prediction_engine::ModelPreset;
use rivel::types::{ModelVariant, Season};

// ============================================================================
// Typo Detection
// ============================================================================

#[test]
fn typo_in_model_key_warns_with_suggestion() {
    let toml_str = r#"
[model]
methane_ofset_g = 190.0
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1, "Expected exactly 1 warning");
    assert!(warnings[0].field.contains("methane_ofset_g"));
    assert_eq!(
        warnings[0].suggestion.as_deref(),
        Some("model.methane_offset_g")
    );
}

#[test]
fn typo_in_farm_section_warns() {
    let toml_str = r#"
[farm]
heard_size = 300
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].suggestion.as_deref(), Some("farm.herd_size"));
}

#[test]
fn unknown_section_warns_without_suggestion() {
    let warnings = validate_unknown_keys("[irrigation]\nenabled = true\n");
    assert_eq!(warnings.len(), 2);
    assert!(warnings.iter().all(|w| w.field.starts_with("irrigation")));
}

#[test]
fn valid_config_produces_zero_warnings() {
    let toml_str = r#"
[farm]
name = "Ngatea Flats"
herd_size = 620
season = "summer"
cow_weight_kg = 520.0
current_milk_kg_day = 26.0

[model]
variant = "composition"
milk_ceiling_multiplier = 1.12
fat_driver = "dietary_fat"

[economics]
milk_solids_price_per_kg = 9.25
baseline_milk_solids_kg = 1.8

[server]
addr = "0.0.0.0:9090"
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert!(warnings.is_empty(), "Unexpected warnings: {warnings:?}");

    let config = RivelConfig::from_toml_str(toml_str).expect("valid config");
    assert_eq!(config.farm.season, Season::Summer);
    assert_eq!(config.preset().variant, ModelVariant::Composition);
    assert_eq!(config.preset().milk_ceiling_multiplier, 1.12);
    assert_eq!(config.server.addr, "0.0.0.0:9090");
}

#[test]
fn suggest_correction_finds_close_match() {
    let known = known_config_keys();
    assert_eq!(
        suggest_correction("economics.milk_solid_price_per_kg", &known).as_deref(),
        Some("economics.milk_solids_price_per_kg")
    );
}

// ============================================================================
// Range Validation
// ============================================================================

#[test]
fn defaults_are_clean() {
    let (errors, warnings) = validate_physical_ranges(&RivelConfig::default());
    assert!(errors.is_empty());
    assert!(warnings.is_empty());
}

#[test]
fn zero_herd_is_an_error() {
    let result = RivelConfig::from_toml_str("[farm]\nherd_size = 0\n");
    match result {
        Err(ConfigError::Validation(errors)) => {
            assert!(errors.iter().any(|e| e.contains("herd_size")));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn negative_price_is_an_error() {
    let mut config = RivelConfig::default();
    config.economics.milk_solids_price_per_kg = -1.0;
    let (errors, _) = validate_physical_ranges(&config);
    assert_eq!(errors.len(), 1);
}

#[test]
fn large_herd_only_warns() {
    let config = RivelConfig::from_toml_str("[farm]\nherd_size = 3500\n").expect("warning only");
    let (_, warnings) = validate_physical_ranges(&config);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].field, "farm.herd_size");
}

#[test]
fn syntax_error_is_parse_error() {
    let result = RivelConfig::from_toml_str("[farm\nname = ");
    assert!(matches!(result, Err(ConfigError::Parse(..))));
}

#[test]
fn bad_variant_is_parse_error() {
    let result = RivelConfig::from_toml_str("[model]\nvariant = \"hybrid\"\n");
    assert!(matches!(result, Err(ConfigError::Parse(..))));
}

// ============================================================================
// File Loading
// ============================================================================

#[test]
fn load_from_file_applies_overrides() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(
        file,
        "[model]\nvariant = \"standard\"\nlwg_floor_kg = -0.9\n\n[farm]\nname = \"Test Farm\""
    )
    .unwrap();

    let config = RivelConfig::load_from_file(file.path()).expect("load");
    assert_eq!(config.farm.name, "Test Farm");
    let preset = config.preset();
    assert_eq!(preset.lwg_floor_kg, -0.9);
    assert_eq!(
        ModelPreset {
            lwg_floor_kg: ModelPreset::STANDARD.lwg_floor_kg,
            ..preset
        },
        ModelPreset::STANDARD
    );
}

#[test]
fn save_then_load_roundtrips() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("rivel.toml");

    let mut config = RivelConfig::default();
    config.farm.name = "Roundtrip".to_string();
    config.model.variant = ModelVariant::Composition;
    config.save_to_file(&path).expect("save");

    let loaded = RivelConfig::load_from_file(&path).expect("load");
    assert_eq!(loaded, config);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let result = RivelConfig::load_from_file(&dir.path().join("nope.toml"));
    assert!(matches!(result, Err(ConfigError::Io(..))));
}

#[test]
fn shipped_example_config_is_clean() {
    let example = include_str!("../rivel.toml.example");
    assert!(validate_unknown_keys(example).is_empty());
    let config = RivelConfig::from_toml_str(example).expect("example parses");
    let mut expected = RivelConfig::default();
    expected.farm.name = "Home Farm".to_string();
    assert_eq!(config, expected);
}
