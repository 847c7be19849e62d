//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `RiskScorer` - Remote, local or rule-based risk scoring
//! - `DatasetSource` - Labeled training records for the startup trainer

mod dataset_source;
mod risk_scorer;

pub use dataset_source::DatasetSource;
pub use risk_scorer::{ModelScore, RiskScorer, ScoringError};
