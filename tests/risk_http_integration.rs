//! Integration tests for the risk and model HTTP endpoints.
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot`; scorers
//! are mocks or a model published directly into the slot.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use diabetes_risk::adapters::http::risk::EVALUATION_ID_HEADER;
use diabetes_risk::adapters::{build_router, LocalModelScorer, MockScorer, RiskAppState};
use diabetes_risk::application::{RiskOrchestrator, FALLBACK_NOTICE};
use diabetes_risk::config::ServerConfig;
use diabetes_risk::domain::assessment::RiskLevel;
use diabetes_risk::domain::foundation::Percentage;
use diabetes_risk::domain::model::{
    DatasetSummary, FeatureEncoder, FeatureLayout, ModelSlot, ServingContext, TrainedModel,
};
use diabetes_risk::ports::{ModelScore, ScoringError};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app(orchestrator: RiskOrchestrator, slot: ModelSlot) -> Router {
    build_router(
        RiskAppState::new(Arc::new(orchestrator), slot),
        &ServerConfig::default(),
    )
}

fn profile_json() -> Value {
    json!({
        "age": 45,
        "gender": "Male",
        "height": 175,
        "weight": 80,
        "familyHistory": "Yes",
        "physicalActivity": "Moderate",
        "dietType": "Balanced",
        "smokingStatus": "Non-Smoker",
        "alcoholIntake": "Occasional",
        "stressLevel": "Medium",
        "hypertension": "No"
    })
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn published_slot(bias: f64) -> ModelSlot {
    let slot = ModelSlot::new();
    slot.publish(ServingContext::from_parts(
        TrainedModel::new(vec![0.0; 10], bias).with_accuracy(0.82),
        FeatureEncoder::new(FeatureLayout::Basic),
        DatasetSummary {
            valid_rows: 90,
            invalid_rows: 10,
            positive_rows: 30,
            prevalence: 1.0 / 3.0,
        },
    ));
    slot
}

// =============================================================================
// POST /api/risk/evaluate
// =============================================================================

#[tokio::test]
async fn evaluate_uses_primary_scorer_when_it_answers() {
    let scorer = MockScorer::new().with_score(
        ModelScore::new(RiskLevel::High, Percentage::new(77)).with_accuracy(0.9),
    );
    let app = app(RiskOrchestrator::new(Arc::new(scorer)), ModelSlot::new());

    let response = app
        .oneshot(post_json("/api/risk/evaluate", &profile_json()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(EVALUATION_ID_HEADER));
    let body = body_json(response).await;
    assert_eq!(body["riskLevel"], "High");
    assert_eq!(body["riskPercentage"], 77);
    assert_eq!(body["modelUsed"], "trained");
    assert_eq!(body["modelAccuracy"], 0.9);
    assert_eq!(body["factors"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn evaluate_falls_back_when_primary_times_out() {
    let scorer = MockScorer::new().with_delay(Duration::from_millis(500));
    let orchestrator =
        RiskOrchestrator::new(Arc::new(scorer)).with_timeout(Duration::from_millis(20));
    let app = app(orchestrator, ModelSlot::new());

    let response = app
        .oneshot(post_json("/api/risk/evaluate", &profile_json()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["modelUsed"], "rule-based");
    assert_eq!(body["recommendations"][0], FALLBACK_NOTICE);
    assert!(body.get("modelAccuracy").is_none());
}

#[tokio::test]
async fn evaluate_falls_back_when_primary_errors() {
    let scorer = MockScorer::new().with_error(ScoringError::unavailable(502, "bad gateway"));
    let app = app(RiskOrchestrator::new(Arc::new(scorer)), ModelSlot::new());

    let body = body_json(
        app.oneshot(post_json("/api/risk/evaluate", &profile_json()))
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(body["modelUsed"], "rule-based");
}

#[tokio::test]
async fn evaluate_without_weight_is_unprocessable() {
    let mut profile = profile_json();
    profile.as_object_mut().unwrap().remove("weight");
    let app = app(RiskOrchestrator::without_primary(), ModelSlot::new());

    let response = app
        .oneshot(post_json("/api/risk/evaluate", &profile))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["code"], "MISSING_BMI");
}

#[tokio::test]
async fn evaluate_with_age_out_of_range_is_unprocessable() {
    let mut profile = profile_json();
    profile["age"] = json!(130);
    let app = app(RiskOrchestrator::without_primary(), ModelSlot::new());

    let response = app
        .oneshot(post_json("/api/risk/evaluate", &profile))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["code"], "OUT_OF_RANGE");
    assert_eq!(body["details"]["field"], "age");
}

#[tokio::test]
async fn evaluate_with_local_model_tags_trained() {
    let slot = published_slot(-2.0);
    let orchestrator = RiskOrchestrator::new(Arc::new(LocalModelScorer::new(slot.clone())));
    let app = app(orchestrator, slot);

    let body = body_json(
        app.oneshot(post_json("/api/risk/evaluate", &profile_json()))
            .await
            .unwrap(),
    )
    .await;

    // sigmoid(-2) ~ 0.119
    assert_eq!(body["modelUsed"], "trained");
    assert_eq!(body["riskLevel"], "Low");
    assert_eq!(body["riskPercentage"], 12);
    assert_eq!(body["modelAccuracy"], 0.82);
}

// =============================================================================
// Model service
// =============================================================================

#[tokio::test]
async fn predict_without_model_is_service_unavailable() {
    let app = app(RiskOrchestrator::without_primary(), ModelSlot::new());

    let response = app
        .oneshot(post_json("/api/model/predict", &profile_json()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["code"], "MODEL_NOT_READY");
}

#[tokio::test]
async fn predict_with_model_returns_contract_fields() {
    let app = app(RiskOrchestrator::without_primary(), published_slot(0.0));

    let response = app
        .oneshot(post_json("/api/model/predict", &profile_json()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["riskLevel"], "Medium");
    assert_eq!(body["riskPercentage"], 50);
    assert_eq!(body["probability"], 0.5);
    assert_eq!(body["accuracy"], 0.82);
}

#[tokio::test]
async fn model_status_reports_readiness() {
    let app_without = app(RiskOrchestrator::without_primary(), ModelSlot::new());
    let body = body_json(app_without.oneshot(get("/api/model/status")).await.unwrap()).await;
    assert_eq!(body["ready"], false);
    assert_eq!(body["vocabularyVersion"], "1");

    let app_with = app(RiskOrchestrator::without_primary(), published_slot(0.0));
    let body = body_json(app_with.oneshot(get("/api/model/status")).await.unwrap()).await;
    assert_eq!(body["ready"], true);
    assert_eq!(body["featureCount"], 10);
    assert_eq!(body["validRows"], 90);
    assert_eq!(body["invalidRows"], 10);
    assert!(body["trainedAt"].is_string());
}

#[tokio::test]
async fn health_is_ok() {
    let app = app(RiskOrchestrator::without_primary(), ModelSlot::new());

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}
