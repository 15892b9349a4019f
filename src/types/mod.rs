//! Shared data structures for the dairy ration calculator
//!
//! - Feed library: FeedRecord, FeedLibrary, ModelVariant
//! - Animal inputs: AnimalState, Season
//! - Outputs: Prediction (full precision), PredictionSummary (display)

mod animal;
mod feed;
mod prediction;

pub use animal::*;
pub use feed::*;
pub use prediction::*;
