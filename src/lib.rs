//! Rivel: dairy ration prediction for New Zealand pasture farms
//!
//! Estimates milk solids, live-weight gain, feed cost and methane for a cow
//! from its daily feed intake.
//!
//! ## Architecture
//!
//! - **Feed Library**: static feed tables for the two model variants
//! - **Prediction Engine**: pure closed-form nutrition formulas
//! - **Input layer**: range checks and season default intakes
//! - **API**: JSON endpoints over the engine

pub mod api;
pub mod config;
pub mod feed_library;
pub mod input;
pub mod prediction_engine;
pub mod types;

pub use config::RivelConfig;
pub use feed_library::load_feed_library;
pub use input::{default_intakes, FarmInputs, InputError};
pub use prediction_engine::{predict, predict_summary, ModelPreset};
pub use types::{
    AnimalState, FeedLibrary, FeedRecord, LimitingFactor, ModelVariant, Prediction,
    PredictionSummary, Season,
};
