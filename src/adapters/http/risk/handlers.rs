//! HTTP handlers for risk evaluation and the trained-model service.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info};
use uuid::Uuid;

use crate::application::handlers::risk::RiskOrchestrator;
use crate::domain::assessment::{HealthProfile, HealthProfileInput, RiskError};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::model::{ModelError, ModelSlot};

use super::dto::{ErrorResponse, HealthResponse, ModelStatusResponse, PredictionResponse};

/// Response header carrying the id logged for each evaluation.
pub const EVALUATION_ID_HEADER: &str = "x-evaluation-id";

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct RiskAppState {
    pub orchestrator: Arc<RiskOrchestrator>,
    pub model_slot: ModelSlot,
}

impl RiskAppState {
    pub fn new(orchestrator: Arc<RiskOrchestrator>, model_slot: ModelSlot) -> Self {
        Self {
            orchestrator,
            model_slot,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/risk/evaluate - Evaluate a health profile
pub async fn evaluate_risk(
    State(state): State<RiskAppState>,
    Json(input): Json<HealthProfileInput>,
) -> Result<impl IntoResponse, RiskApiError> {
    let evaluation_id = Uuid::new_v4();
    let profile = HealthProfile::new(input)?;
    let result = state.orchestrator.evaluate(&profile).await?;

    info!(
        %evaluation_id,
        risk_level = %result.risk_level,
        model_used = result.model_used.as_str(),
        "Risk evaluated"
    );
    Ok((
        StatusCode::OK,
        [(EVALUATION_ID_HEADER, evaluation_id.to_string())],
        Json(result),
    ))
}

/// POST /api/model/predict - Score a profile with the trained model only
pub async fn predict(
    State(state): State<RiskAppState>,
    Json(input): Json<HealthProfileInput>,
) -> Result<impl IntoResponse, RiskApiError> {
    let profile = HealthProfile::new(input)?;
    let context = state.model_slot.get().ok_or(RiskApiError::ModelNotReady)?;
    let prediction = context.predict(&profile)?;

    Ok((StatusCode::OK, Json(PredictionResponse::from(prediction))))
}

/// GET /api/model/status - Describe the serving model
pub async fn model_status(State(state): State<RiskAppState>) -> impl IntoResponse {
    let response = match state.model_slot.get() {
        Some(context) => ModelStatusResponse::from(context.as_ref()),
        None => ModelStatusResponse::not_ready(),
    };
    (StatusCode::OK, Json(response))
}

/// GET /health - Liveness probe
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse::ok()))
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

/// Errors surfaced by the risk endpoints.
#[derive(Debug, thiserror::Error)]
pub enum RiskApiError {
    #[error(transparent)]
    Profile(#[from] RiskError),

    #[error("model not ready")]
    ModelNotReady,

    #[error("prediction failed: {0}")]
    Prediction(#[from] ModelError),
}

impl IntoResponse for RiskApiError {
    fn into_response(self) -> Response {
        match self {
            RiskApiError::Profile(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse::from(DomainError::from(err))),
            )
                .into_response(),
            RiskApiError::ModelNotReady => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::model_not_ready()),
            )
                .into_response(),
            RiskApiError::Prediction(err) => {
                error!(error = %err, "Serving model rejected an encoded profile");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(ErrorCode::ScoringUnavailable, err.to_string())),
                )
                    .into_response()
            }
        }
    }
}
