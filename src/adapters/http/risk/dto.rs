//! Data transfer objects for risk and model endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::assessment::RiskLevel;
use crate::domain::foundation::{DomainError, ErrorCode, Percentage};
use crate::domain::model::{ModelPrediction, ServingContext, VOCABULARY_VERSION};

// ════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/model/predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResponse {
    pub risk_level: RiskLevel,
    pub risk_percentage: Percentage,
    pub probability: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

impl From<ModelPrediction> for PredictionResponse {
    fn from(prediction: ModelPrediction) -> Self {
        Self {
            risk_level: prediction.risk_level,
            risk_percentage: prediction.risk_percentage,
            probability: prediction.probability,
            accuracy: prediction.accuracy,
        }
    }
}

/// Body of `GET /api/model/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelStatusResponse {
    pub ready: bool,
    pub vocabulary_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_rows: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_rows: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prevalence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trained_at: Option<DateTime<Utc>>,
}

impl ModelStatusResponse {
    pub fn not_ready() -> Self {
        Self {
            ready: false,
            vocabulary_version: VOCABULARY_VERSION.to_string(),
            feature_count: None,
            accuracy: None,
            valid_rows: None,
            invalid_rows: None,
            prevalence: None,
            trained_at: None,
        }
    }
}

impl From<&ServingContext> for ModelStatusResponse {
    fn from(context: &ServingContext) -> Self {
        let summary = context.summary();
        Self {
            ready: true,
            vocabulary_version: VOCABULARY_VERSION.to_string(),
            feature_count: Some(context.model().feature_count()),
            accuracy: context.model().accuracy(),
            valid_rows: Some(summary.valid_rows),
            invalid_rows: Some(summary.invalid_rows),
            prevalence: Some(summary.prevalence),
            trained_at: Some(context.trained_at()),
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Errors
// ════════════════════════════════════════════════════════════════════════════

/// Error body shared by all endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn model_not_ready() -> Self {
        Self::new(ErrorCode::ModelNotReady, "No trained model is available yet")
    }
}

impl From<DomainError> for ErrorResponse {
    fn from(err: DomainError) -> Self {
        let details = if err.details.is_empty() {
            None
        } else {
            serde_json::to_value(&err.details).ok()
        };
        Self {
            code: err.code.to_string(),
            message: err.message,
            details,
        }
    }
}
