//! Farm Configuration - calculator defaults, model constants and economics
//!
//! Every constant the prediction model uses can be overridden here on top
//! of the selected variant's preset. Each struct implements `Default` with
//! the calculator's built-in values, so an absent or empty file changes
//! nothing.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults;
use crate::prediction_engine::{FatDriver, ModelPreset};
use crate::types::{ModelVariant, Season};

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "RIVEL_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "rivel.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration.
///
/// Load with `RivelConfig::load()` which searches:
/// 1. `$RIVEL_CONFIG`
/// 2. `./rivel.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RivelConfig {
    /// Farm and herd defaults
    #[serde(default)]
    pub farm: FarmInfo,

    /// Model variant and constant overrides
    #[serde(default)]
    pub model: ModelConfig,

    /// Milk-solids payout
    #[serde(default)]
    pub economics: EconomicsConfig,

    /// HTTP server
    #[serde(default)]
    pub server: ServerConfig,
}

impl RivelConfig {
    /// Load configuration using the standard search order. Problems with a
    /// discovered file are logged and the next source is tried.
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), farm = %config.farm.name, "Loaded config from {CONFIG_ENV_VAR}");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {CONFIG_ENV_VAR}, falling back");
                    }
                }
            } else {
                warn!(path = %path, "{CONFIG_ENV_VAR} points to non-existent file, falling back");
            }
        }

        // 2. Check ./rivel.toml
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!(farm = %config.farm.name, "Loaded config from ./{LOCAL_CONFIG_FILE}");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{LOCAL_CONFIG_FILE}, using defaults");
                }
            }
        }

        // 3. Defaults
        info!("No {LOCAL_CONFIG_FILE} found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate a TOML document. Unknown keys are logged, not
    /// rejected.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Write the config to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Config saved");
        Ok(())
    }

    /// Validate all values. Collects every error before returning; range
    /// warnings are logged.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (errors, warnings) = super::validation::validate_physical_ranges(self);
        for w in &warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// The fully resolved model constants.
    pub fn preset(&self) -> ModelPreset {
        self.model.preset()
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config validation failed:\n  - {}", .0.join("\n  - "))]
    Validation(Vec<String>),
}

// ============================================================================
// Farm Info
// ============================================================================

/// Farm defaults used when a request does not supply its own values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FarmInfo {
    #[serde(default = "default_farm_name")]
    pub name: String,

    #[serde(default = "default_herd_size")]
    pub herd_size: u32,

    #[serde(default)]
    pub season: Season,

    #[serde(default = "default_cow_weight")]
    pub cow_weight_kg: f64,

    #[serde(default = "default_current_milk")]
    pub current_milk_kg_day: f64,
}

fn default_farm_name() -> String { "Unnamed Farm".to_string() }
fn default_herd_size() -> u32 { defaults::HERD_SIZE }
fn default_cow_weight() -> f64 { defaults::COW_WEIGHT_KG }
fn default_current_milk() -> f64 { defaults::CURRENT_MILK_KG }

impl Default for FarmInfo {
    fn default() -> Self {
        Self {
            name: default_farm_name(),
            herd_size: default_herd_size(),
            season: Season::default(),
            cow_weight_kg: default_cow_weight(),
            current_milk_kg_day: default_current_milk(),
        }
    }
}

// ============================================================================
// Model Config
// ============================================================================

/// Variant selection plus optional per-constant overrides.
///
/// Any override left unset keeps the variant preset's value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ModelConfig {
    #[serde(default)]
    pub variant: ModelVariant,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mp_per_g_cp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mp_per_mj_me: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_mj_per_kg_mbw: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metabolic_weight_exponent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_offset_mj: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mj_per_kg_milk: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mp_g_per_kg_milk: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milk_ceiling_multiplier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat_driver: Option<FatDriver>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat_base_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat_slope: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat_offset_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_base_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_slope: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mj_per_kg_lwg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lwg_floor_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub methane_g_per_kg_dmi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub methane_offset_g: Option<f64>,
}

impl ModelConfig {
    /// Variant preset with overrides applied.
    pub fn preset(&self) -> ModelPreset {
        let base = ModelPreset::for_variant(self.variant);
        ModelPreset {
            variant: self.variant,
            mp_per_g_cp: self.mp_per_g_cp.unwrap_or(base.mp_per_g_cp),
            mp_per_mj_me: self.mp_per_mj_me.unwrap_or(base.mp_per_mj_me),
            maintenance_mj_per_kg_mbw: self
                .maintenance_mj_per_kg_mbw
                .unwrap_or(base.maintenance_mj_per_kg_mbw),
            metabolic_weight_exponent: self
                .metabolic_weight_exponent
                .unwrap_or(base.metabolic_weight_exponent),
            energy_offset_mj: self.energy_offset_mj.unwrap_or(base.energy_offset_mj),
            mj_per_kg_milk: self.mj_per_kg_milk.unwrap_or(base.mj_per_kg_milk),
            mp_g_per_kg_milk: self.mp_g_per_kg_milk.unwrap_or(base.mp_g_per_kg_milk),
            milk_ceiling_multiplier: self
                .milk_ceiling_multiplier
                .unwrap_or(base.milk_ceiling_multiplier),
            fat_driver: self.fat_driver.unwrap_or(base.fat_driver),
            fat_base_pct: self.fat_base_pct.unwrap_or(base.fat_base_pct),
            fat_slope: self.fat_slope.unwrap_or(base.fat_slope),
            fat_offset_pct: self.fat_offset_pct.unwrap_or(base.fat_offset_pct),
            protein_base_pct: self.protein_base_pct.unwrap_or(base.protein_base_pct),
            protein_slope: self.protein_slope.unwrap_or(base.protein_slope),
            mj_per_kg_lwg: self.mj_per_kg_lwg.unwrap_or(base.mj_per_kg_lwg),
            lwg_floor_kg: self.lwg_floor_kg.unwrap_or(base.lwg_floor_kg),
            methane_g_per_kg_dmi: self.methane_g_per_kg_dmi.unwrap_or(base.methane_g_per_kg_dmi),
            methane_offset_g: self.methane_offset_g.unwrap_or(base.methane_offset_g),
        }
    }
}

// ============================================================================
// Economics
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EconomicsConfig {
    /// Payout (NZD per kg milk solids)
    #[serde(default = "default_ms_price")]
    pub milk_solids_price_per_kg: f64,

    /// Milk solids per cow before the ration change (kg/day)
    #[serde(default = "default_baseline_ms")]
    pub baseline_milk_solids_kg: f64,
}

fn default_ms_price() -> f64 { defaults::MILK_SOLIDS_PRICE_NZD }
fn default_baseline_ms() -> f64 { defaults::BASELINE_MILK_SOLIDS_KG }

impl Default for EconomicsConfig {
    fn default() -> Self {
        Self {
            milk_solids_price_per_kg: default_ms_price(),
            baseline_milk_solids_kg: default_baseline_ms(),
        }
    }
}

// ============================================================================
// Server
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_server_addr")]
    pub addr: String,
}

fn default_server_addr() -> String { defaults::SERVER_ADDR.to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_server_addr(),
        }
    }
}
