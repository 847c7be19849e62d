//! Risk Scorer Port - Interface for anything that turns a profile into a tier.
//!
//! The orchestrator treats every scorer the same way: one bounded attempt,
//! and any error means "use the rule-based result instead". Implementations
//! cover the remote model service, the in-process trained model and the rule
//! engine itself.
//!
//! # Example
//!
//! ```ignore
//! let scorer: Arc<dyn RiskScorer> = Arc::new(RemoteScorer::new(config)?);
//! let score = scorer.score(&profile).await?;
//! println!("{} ({})", score.risk_level, score.risk_percentage);
//! ```

use async_trait::async_trait;

use crate::domain::assessment::{HealthProfile, ModelUsed, RiskLevel};
use crate::domain::foundation::Percentage;
use crate::domain::model::ModelPrediction;

/// Port for risk scoring backends.
#[async_trait]
pub trait RiskScorer: Send + Sync {
    /// Scores a validated profile.
    async fn score(&self, profile: &HealthProfile) -> Result<ModelScore, ScoringError>;

    /// Which `modelUsed` tag a successful score from this backend carries.
    fn model_kind(&self) -> ModelUsed;
}

/// Tier and percentage reported by a scorer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelScore {
    pub risk_level: RiskLevel,
    pub risk_percentage: Percentage,
    /// Raw model probability, when the backend exposes one.
    pub probability: Option<f64>,
    /// Training accuracy of the model that produced this score.
    pub accuracy: Option<f64>,
}

impl ModelScore {
    pub fn new(risk_level: RiskLevel, risk_percentage: Percentage) -> Self {
        Self {
            risk_level,
            risk_percentage,
            probability: None,
            accuracy: None,
        }
    }

    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = Some(probability);
        self
    }

    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = Some(accuracy);
        self
    }
}

impl From<ModelPrediction> for ModelScore {
    fn from(prediction: ModelPrediction) -> Self {
        Self {
            risk_level: prediction.risk_level,
            risk_percentage: prediction.risk_percentage,
            probability: Some(prediction.probability),
            accuracy: prediction.accuracy,
        }
    }
}

/// Scoring errors. Every variant sends the orchestrator to the rule engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    /// The attempt exceeded its time budget.
    #[error("scoring timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Transport failure reaching the backend.
    #[error("network error: {0}")]
    Network(String),

    /// Backend answered with a non-success status.
    #[error("scoring service unavailable ({status}): {message}")]
    Unavailable { status: u16, message: String },

    /// Backend has no trained model yet.
    #[error("model not ready")]
    ModelNotReady,

    /// Response body was not valid JSON for the contract.
    #[error("parse error: {0}")]
    Parse(String),

    /// Response parsed but violates the contract.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ScoringError {
    /// Creates an unavailable error.
    pub fn unavailable(status: u16, message: impl Into<String>) -> Self {
        Self::Unavailable {
            status,
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// Short machine-readable label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ScoringError::Timeout { .. } => "timeout",
            ScoringError::Network(_) => "network",
            ScoringError::Unavailable { .. } => "unavailable",
            ScoringError::ModelNotReady => "model_not_ready",
            ScoringError::Parse(_) => "parse",
            ScoringError::InvalidResponse(_) => "invalid_response",
        }
    }
}
