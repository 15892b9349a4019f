//! API route definitions
//!
//! - /api/v1/health - status and active model variant
//! - /api/v1/feeds - feed library
//! - /api/v1/defaults - season default intakes
//! - /api/v1/predict - run a prediction

use axum::{routing::{get, post}, Router};

use super::handlers::{self, ApiState};

/// Create all v1 API routes
pub fn api_routes(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(handlers::get_health))
        .route("/feeds", get(handlers::get_feeds))
        .route("/defaults", get(handlers::get_defaults))
        .route("/predict", post(handlers::post_predict))
        .with_state(state)
}
