//! Mock Risk Scorer for testing.
//!
//! # Features
//!
//! - Pre-configured scores, consumed in order
//! - Simulated delays for timeout testing
//! - Error injection for fallback testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let scorer = MockScorer::new()
//!     .with_score(ModelScore::new(RiskLevel::High, Percentage::new(80)))
//!     .with_delay(Duration::from_millis(100));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::assessment::{HealthProfile, ModelUsed, RiskLevel};
use crate::domain::foundation::Percentage;
use crate::ports::{ModelScore, RiskScorer, ScoringError};

/// A configured mock outcome.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    Score(ModelScore),
    Error(ScoringError),
}

/// Mock scorer for testing.
#[derive(Debug, Clone)]
pub struct MockScorer {
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    delay: Duration,
    kind: ModelUsed,
    calls: Arc<Mutex<Vec<HealthProfile>>>,
}

impl Default for MockScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockScorer {
    /// Creates a mock that reports itself as a trained model.
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            delay: Duration::ZERO,
            kind: ModelUsed::Trained,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful score to the queue.
    pub fn with_score(self, score: ModelScore) -> Self {
        self.push(MockOutcome::Score(score));
        self
    }

    /// Adds an error to the queue.
    pub fn with_error(self, error: ScoringError) -> Self {
        self.push(MockOutcome::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the reported model kind.
    pub fn with_kind(mut self, kind: ModelUsed) -> Self {
        self.kind = kind;
        self
    }

    /// Returns the number of calls made to this scorer.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<HealthProfile> {
        self.calls.lock().unwrap().clone()
    }

    fn push(&self, outcome: MockOutcome) {
        self.outcomes.lock().unwrap().push_back(outcome);
    }

    fn next_outcome(&self) -> MockOutcome {
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(MockOutcome::Score(ModelScore::new(
                RiskLevel::Low,
                Percentage::new(10),
            )))
    }
}

#[async_trait]
impl RiskScorer for MockScorer {
    async fn score(&self, profile: &HealthProfile) -> Result<ModelScore, ScoringError> {
        self.calls.lock().unwrap().push(profile.clone());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_outcome() {
            MockOutcome::Score(score) => Ok(score),
            MockOutcome::Error(err) => Err(err),
        }
    }

    fn model_kind(&self) -> ModelUsed {
        self.kind
    }
}
