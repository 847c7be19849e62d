//! Scoring configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Which primary scorer the orchestrator consults
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    /// Call the trained-model service over HTTP
    Remote,
    /// Use the model trained in this process
    #[default]
    Local,
    /// Rule engine only
    Rules,
}

/// Scoring configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// Primary scorer
    #[serde(default)]
    pub mode: ScoringMode,

    /// Base URL of the trained-model service (remote mode)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Time budget for one scoring attempt, in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ScoringConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate scoring configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 60 {
            return Err(ValidationError::InvalidScoringTimeout);
        }
        if self.mode != ScoringMode::Remote {
            return Ok(());
        }
        if self.base_url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("scoring.base_url"));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ValidationError::InvalidScoringUrl(self.base_url.clone()));
        }
        Ok(())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            mode: ScoringMode::default(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_timeout() -> u64 {
    5
}
