//! Scoring adapters - implementations of the `RiskScorer` port.
//!
//! - `RemoteScorer` - HTTP client for the trained-model service
//! - `LocalModelScorer` - In-process serving context
//! - `RuleBasedScorer` - Deterministic rule engine
//! - `MockScorer` - Configurable test double

mod local_model_scorer;
mod mock_scorer;
mod remote_scorer;
mod rule_based_scorer;

pub use local_model_scorer::LocalModelScorer;
pub use mock_scorer::{MockOutcome, MockScorer};
pub use remote_scorer::{RemoteScorer, RemoteScorerConfig, PREDICT_PATH};
pub use rule_based_scorer::RuleBasedScorer;
