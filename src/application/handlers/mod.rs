//! Application handlers.
//!
//! Handlers that orchestrate domain operations over ports.

pub mod risk;

pub use risk::{
    RiskOrchestrator, TrainModelHandler, TrainingError, DEFAULT_SCORING_TIMEOUT, FALLBACK_NOTICE,
};
