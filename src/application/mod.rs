//! Application layer - Handlers that coordinate domain logic and ports.

pub mod handlers;

pub use handlers::{
    RiskOrchestrator, TrainModelHandler, TrainingError, DEFAULT_SCORING_TIMEOUT, FALLBACK_NOTICE,
};
