//! Remote Scorer - RiskScorer backed by the trained-model HTTP service.
//!
//! Posts the profile's raw fields as camelCase JSON to
//! `{base_url}/api/model/predict` and expects
//! `{ riskLevel, riskPercentage, probability?, accuracy? }` back.
//!
//! # Configuration
//!
//! ```ignore
//! let config = RemoteScorerConfig::new("http://127.0.0.1:8080")
//!     .with_timeout(Duration::from_secs(5));
//!
//! let scorer = RemoteScorer::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::domain::assessment::{HealthProfile, ModelUsed, RiskLevel};
use crate::domain::foundation::Percentage;
use crate::ports::{ModelScore, RiskScorer, ScoringError};

/// Path of the prediction endpoint, relative to the base URL.
pub const PREDICT_PATH: &str = "/api/model/predict";

/// Configuration for the remote scorer.
#[derive(Debug, Clone)]
pub struct RemoteScorerConfig {
    /// Base URL of the scoring service (no trailing path).
    pub base_url: String,
    /// Client-side request timeout.
    pub timeout: Duration,
}

impl RemoteScorerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(5),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP client for the scoring service.
pub struct RemoteScorer {
    config: RemoteScorerConfig,
    client: Client,
}

/// Response body of the prediction endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PredictBody {
    risk_level: String,
    risk_percentage: f64,
    #[serde(default)]
    probability: Option<f64>,
    #[serde(default)]
    accuracy: Option<f64>,
}

/// Error body of the prediction endpoint.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
}

impl RemoteScorer {
    /// Creates a scorer with its own connection pool.
    pub fn new(config: RemoteScorerConfig) -> Result<Self, ScoringError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ScoringError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn predict_url(&self) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), PREDICT_PATH)
    }

    async fn send_request(&self, profile: &HealthProfile) -> Result<Response, ScoringError> {
        self.client
            .post(self.predict_url())
            .json(profile)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ScoringError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    ScoringError::network(format!("Connection failed: {}", e))
                } else {
                    ScoringError::network(e.to_string())
                }
            })
    }

    /// Maps non-success statuses to scoring errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, ScoringError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        if status == StatusCode::SERVICE_UNAVAILABLE && is_model_not_ready(&error_body) {
            return Err(ScoringError::ModelNotReady);
        }

        Err(ScoringError::unavailable(status.as_u16(), error_body))
    }

    async fn parse_response(&self, response: Response) -> Result<ModelScore, ScoringError> {
        let response = self.handle_response_status(response).await?;

        let body: PredictBody = response
            .json()
            .await
            .map_err(|e| ScoringError::parse(format!("Failed to parse response: {}", e)))?;

        into_score(body)
    }
}

fn is_model_not_ready(error_body: &str) -> bool {
    serde_json::from_str::<ErrorBody>(error_body)
        .map(|body| body.code == "MODEL_NOT_READY")
        .unwrap_or(false)
}

fn parse_risk_level(value: &str) -> Option<RiskLevel> {
    [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High]
        .into_iter()
        .find(|level| level.label().eq_ignore_ascii_case(value.trim()))
}

fn into_score(body: PredictBody) -> Result<ModelScore, ScoringError> {
    let risk_level = parse_risk_level(&body.risk_level).ok_or_else(|| {
        ScoringError::invalid_response(format!("unknown riskLevel '{}'", body.risk_level))
    })?;

    if !(0.0..=100.0).contains(&body.risk_percentage) {
        return Err(ScoringError::invalid_response(format!(
            "riskPercentage {} outside 0-100",
            body.risk_percentage
        )));
    }

    let mut score = ModelScore::new(
        risk_level,
        Percentage::new(body.risk_percentage.round() as u8),
    );
    if let Some(probability) = body.probability {
        score = score.with_probability(probability);
    }
    if let Some(accuracy) = body.accuracy {
        score = score.with_accuracy(accuracy);
    }
    Ok(score)
}

#[async_trait]
impl RiskScorer for RemoteScorer {
    async fn score(&self, profile: &HealthProfile) -> Result<ModelScore, ScoringError> {
        let response = self.send_request(profile).await?;
        self.parse_response(response).await
    }

    fn model_kind(&self) -> ModelUsed {
        ModelUsed::Trained
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::{
        ActivityLevel, AlcoholIntake, ClinicalMeasurements, DietType, Gender, HealthProfileInput,
        SmokingStatus, StressLevel, YesNo,
    };
    use axum::http::StatusCode as AxumStatus;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    fn test_profile() -> HealthProfile {
        HealthProfile::new(HealthProfileInput {
            age: 45,
            gender: Gender::Male,
            height: Some(175.0),
            weight: Some(80.0),
            family_history: YesNo::Yes,
            physical_activity: ActivityLevel::Moderate,
            diet_type: DietType::Balanced,
            smoking_status: SmokingStatus::NonSmoker,
            alcohol_intake: AlcoholIntake::Occasional,
            stress_level: StressLevel::Medium,
            hypertension: YesNo::No,
            clinical: ClinicalMeasurements::default(),
        })
        .unwrap()
    }

    /// Serves `router` on an ephemeral port and returns its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn scorer(base_url: String) -> RemoteScorer {
        RemoteScorer::new(RemoteScorerConfig::new(base_url)).unwrap()
    }

    #[test]
    fn config_builder_works() {
        let config = RemoteScorerConfig::new("http://scoring:8080")
            .with_timeout(Duration::from_secs(2));

        assert_eq!(config.base_url, "http://scoring:8080");
        assert_eq!(config.timeout, Duration::from_secs(2));
    }

    #[test]
    fn predict_url_ignores_trailing_slash() {
        let scorer = scorer("http://scoring:8080/".to_string());
        assert_eq!(scorer.predict_url(), "http://scoring:8080/api/model/predict");
    }

    #[test]
    fn risk_level_parsing_is_case_insensitive() {
        assert_eq!(parse_risk_level("high"), Some(RiskLevel::High));
        assert_eq!(parse_risk_level(" Medium "), Some(RiskLevel::Medium));
        assert_eq!(parse_risk_level("severe"), None);
    }

    #[test]
    fn model_not_ready_body_is_recognized() {
        assert!(is_model_not_ready(r#"{"code":"MODEL_NOT_READY","message":"x"}"#));
        assert!(!is_model_not_ready(r#"{"code":"INTERNAL_ERROR"}"#));
        assert!(!is_model_not_ready("not json"));
    }

    #[tokio::test]
    async fn successful_prediction_is_mapped() {
        let router = Router::new().route(
            PREDICT_PATH,
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["familyHistory"], "Yes");
                assert_eq!(body["physicalActivity"], "Moderate");
                Json(json!({
                    "riskLevel": "Medium",
                    "riskPercentage": 52,
                    "probability": 0.52,
                    "accuracy": 0.87
                }))
            }),
        );
        let scorer = scorer(serve(router).await);

        let score = scorer.score(&test_profile()).await.unwrap();

        assert_eq!(score.risk_level, RiskLevel::Medium);
        assert_eq!(score.risk_percentage.value(), 52);
        assert_eq!(score.probability, Some(0.52));
        assert_eq!(score.accuracy, Some(0.87));
        assert_eq!(scorer.model_kind(), ModelUsed::Trained);
    }

    #[tokio::test]
    async fn model_not_ready_maps_to_dedicated_error() {
        let router = Router::new().route(
            PREDICT_PATH,
            post(|| async {
                (
                    AxumStatus::SERVICE_UNAVAILABLE,
                    Json(json!({"code": "MODEL_NOT_READY", "message": "no model"})),
                )
            }),
        );
        let scorer = scorer(serve(router).await);

        let err = scorer.score(&test_profile()).await.unwrap_err();
        assert_eq!(err, ScoringError::ModelNotReady);
    }

    #[tokio::test]
    async fn server_error_maps_to_unavailable() {
        let router = Router::new().route(
            PREDICT_PATH,
            post(|| async { (AxumStatus::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let scorer = scorer(serve(router).await);

        let err = scorer.score(&test_profile()).await.unwrap_err();
        assert!(matches!(err, ScoringError::Unavailable { status: 500, .. }));
    }

    #[tokio::test]
    async fn malformed_body_maps_to_parse_error() {
        let router = Router::new().route(PREDICT_PATH, post(|| async { "not json" }));
        let scorer = scorer(serve(router).await);

        let err = scorer.score(&test_profile()).await.unwrap_err();
        assert!(matches!(err, ScoringError::Parse(_)));
    }

    #[tokio::test]
    async fn out_of_contract_values_are_rejected() {
        let router = Router::new().route(
            PREDICT_PATH,
            post(|| async { Json(json!({"riskLevel": "Extreme", "riskPercentage": 50})) }),
        );
        let unknown_tier = scorer(serve(router).await);
        let err = unknown_tier.score(&test_profile()).await.unwrap_err();
        assert!(matches!(err, ScoringError::InvalidResponse(_)));

        let router = Router::new().route(
            PREDICT_PATH,
            post(|| async { Json(json!({"riskLevel": "High", "riskPercentage": 140})) }),
        );
        let over_hundred = scorer(serve(router).await);
        let err = over_hundred.score(&test_profile()).await.unwrap_err();
        assert!(matches!(err, ScoringError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn unreachable_service_maps_to_network_error() {
        // Bind then drop to get a port nobody listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let scorer = scorer(format!("http://{}", addr));
        let err = scorer.score(&test_profile()).await.unwrap_err();
        assert!(matches!(err, ScoringError::Network(_)));
    }

    #[tokio::test]
    async fn slow_service_maps_to_timeout() {
        let router = Router::new().route(
            PREDICT_PATH,
            post(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(json!({"riskLevel": "Low", "riskPercentage": 10}))
            }),
        );
        let base_url = serve(router).await;
        let scorer = RemoteScorer::new(
            RemoteScorerConfig::new(base_url).with_timeout(Duration::from_millis(100)),
        )
        .unwrap();

        let err = scorer.score(&test_profile()).await.unwrap_err();
        assert!(matches!(err, ScoringError::Timeout { .. }));
    }
}
