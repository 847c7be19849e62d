//! HTTP adapter for risk evaluation and the trained-model service.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, HealthResponse, ModelStatusResponse, PredictionResponse};
pub use handlers::{RiskApiError, RiskAppState, EVALUATION_ID_HEADER};
pub use routes::risk_routes;
