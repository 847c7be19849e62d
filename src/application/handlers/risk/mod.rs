//! Risk handlers - evaluation orchestration and startup training.

mod risk_orchestrator;
mod train_model;

pub use risk_orchestrator::{RiskOrchestrator, DEFAULT_SCORING_TIMEOUT, FALLBACK_NOTICE};
pub use train_model::{TrainModelHandler, TrainingError};
