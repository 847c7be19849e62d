//! HTTP adapters - REST API implementations.

pub mod risk;
mod router;

pub use risk::{risk_routes, RiskApiError, RiskAppState};
pub use router::build_router;
