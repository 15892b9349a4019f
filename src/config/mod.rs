//! Configuration Module
//!
//! Calculator defaults, model-constant overrides, economics and server
//! settings loaded from TOML.
//!
//! ## Loading Order
//!
//! 1. `RIVEL_CONFIG` environment variable (path to TOML file)
//! 2. `rivel.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! Load once at startup and pass the pieces explicitly:
//!
//! ```ignore
//! let config = RivelConfig::load();
//! let preset = config.preset();
//! let library = load_feed_library(preset.variant);
//! ```

mod farm_config;
pub mod defaults;
pub mod validation;

pub use farm_config::*;
