//! API route handlers
//!
//! - Health and active model variant
//! - Feed library listing
//! - Season default intakes
//! - Prediction

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::envelope::{ApiErrorResponse, ApiResponse};
use crate::config::{EconomicsConfig, FarmInfo, RivelConfig};
use crate::feed_library::load_feed_library;
use crate::input::{default_intakes, FarmInputs};
use crate::prediction_engine::{extra_revenue, predict, summarize, ModelPreset};
use crate::types::{FeedLibrary, ModelVariant, Prediction, PredictionSummary, Season};

// ============================================================================
// API State
// ============================================================================

/// Shared, read-only state for API handlers
#[derive(Clone)]
pub struct ApiState {
    pub library: Arc<FeedLibrary>,
    pub preset: ModelPreset,
    pub economics: EconomicsConfig,
    pub farm: Arc<FarmInfo>,
}

impl ApiState {
    /// Build the library for the configured variant once.
    pub fn from_config(config: &RivelConfig) -> Self {
        let preset = config.preset();
        Self {
            library: Arc::new(load_feed_library(preset.variant)),
            preset,
            economics: config.economics.clone(),
            farm: Arc::new(config.farm.clone()),
        }
    }
}

// ============================================================================
// Health
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub variant: ModelVariant,
    pub feeds: usize,
}

/// GET /api/v1/health
pub async fn get_health(State(state): State<ApiState>) -> Response {
    ApiResponse::ok(HealthResponse {
        status: "ok",
        variant: state.preset.variant,
        feeds: state.library.len(),
    })
}

// ============================================================================
// Feeds
// ============================================================================

/// GET /api/v1/feeds
pub async fn get_feeds(State(state): State<ApiState>) -> Response {
    ApiResponse::ok(state.library.as_ref())
}

// ============================================================================
// Defaults
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct DefaultsQuery {
    pub season: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DefaultsResponse {
    pub season: Season,
    pub cow_weight_kg: f64,
    pub current_milk_kg_day: f64,
    pub herd_size: u32,
    pub intakes: Vec<f64>,
}

/// GET /api/v1/defaults?season=spring
pub async fn get_defaults(
    State(state): State<ApiState>,
    Query(query): Query<DefaultsQuery>,
) -> Response {
    let season = match query.season.as_deref().map(str::parse::<Season>) {
        None => state.farm.season,
        Some(Ok(season)) => season,
        Some(Err(e)) => return ApiErrorResponse::bad_request(e.to_string()),
    };

    ApiResponse::ok(DefaultsResponse {
        season,
        cow_weight_kg: state.farm.cow_weight_kg,
        current_milk_kg_day: state.farm.current_milk_kg_day,
        herd_size: state.farm.herd_size,
        intakes: default_intakes(&state.library, season),
    })
}

// ============================================================================
// Predict
// ============================================================================

/// Prediction request. Omitted fields fall back to the farm defaults; omitted
/// intakes fall back to the season defaults.
#[derive(Debug, Default, Deserialize)]
pub struct PredictRequest {
    pub cow_weight_kg: Option<f64>,
    pub current_milk_kg_day: Option<f64>,
    pub herd_size: Option<u32>,
    pub season: Option<Season>,
    pub intakes: Option<Vec<f64>>,
}

impl PredictRequest {
    fn into_inputs(self, farm: &FarmInfo, library: &FeedLibrary) -> FarmInputs {
        let season = self.season.unwrap_or(farm.season);
        FarmInputs {
            cow_weight_kg: self.cow_weight_kg.unwrap_or(farm.cow_weight_kg),
            current_milk_kg_day: self.current_milk_kg_day.unwrap_or(farm.current_milk_kg_day),
            herd_size: self.herd_size.unwrap_or(farm.herd_size),
            season,
            intakes: self
                .intakes
                .unwrap_or_else(|| default_intakes(library, season)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub summary: PredictionSummary,
    pub detail: Prediction,
    /// NZD/day across the herd, relative to the baseline milk solids
    pub extra_revenue: f64,
    pub herd_size: u32,
    pub season: Season,
}

/// POST /api/v1/predict
///
/// `data` is `null` when total intake is zero.
pub async fn post_predict(
    State(state): State<ApiState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return ApiErrorResponse::bad_request(rejection.body_text()),
    };

    let inputs = request.into_inputs(&state.farm, &state.library);
    if let Err(e) = inputs.validate(&state.library) {
        warn!(error = %e, "Rejected prediction request");
        return ApiErrorResponse::invalid_input(e.to_string());
    }

    let response = predict(&inputs.animal(), &state.library, &inputs.intakes, &state.preset).map(
        |detail| {
            let summary = summarize(&detail);
            PredictResponse {
                extra_revenue: extra_revenue(summary.milk_solids_kg, inputs.herd_size, &state.economics),
                summary,
                detail,
                herd_size: inputs.herd_size,
                season: inputs.season,
            }
        },
    );

    debug!(absent = response.is_none(), "Prediction served");
    ApiResponse::ok(response)
}
