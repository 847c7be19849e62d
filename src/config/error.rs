//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid host/port combination: {0}")]
    InvalidAddress(String),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid scoring timeout (must be 1-60 seconds)")]
    InvalidScoringTimeout,

    #[error("Invalid scoring service URL: {0}")]
    InvalidScoringUrl(String),

    #[error("Learning rate must be a positive finite number")]
    InvalidLearningRate,

    #[error("Iteration count must be between 1 and 1000000")]
    InvalidIterations,
}
