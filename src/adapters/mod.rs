//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `scoring` - Risk scorers (remote HTTP, local model, rules, mock)
//! - `dataset` - Training dataset sources (JSON file, in-memory)
//! - `http` - axum routes exposing evaluation and the model service

pub mod dataset;
pub mod http;
pub mod scoring;

pub use dataset::{FileDatasetSource, InMemoryDatasetSource};
pub use http::{build_router, RiskAppState};
pub use scoring::{LocalModelScorer, MockScorer, RemoteScorer, RemoteScorerConfig, RuleBasedScorer};
