//! HTTP routes for risk and model endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{evaluate_risk, health, model_status, predict, RiskAppState};

/// Creates the router with all risk, model and health endpoints.
pub fn risk_routes(state: RiskAppState) -> Router {
    Router::new()
        .route("/api/risk/evaluate", post(evaluate_risk))
        .route("/api/model/predict", post(predict))
        .route("/api/model/status", get(model_status))
        .route("/health", get(health))
        .with_state(state)
}
