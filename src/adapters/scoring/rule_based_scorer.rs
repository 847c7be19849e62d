//! Rule-Based Scorer - RiskScorer over the deterministic rule engine.
//!
//! Used as the primary scorer when no model is configured (`rules` mode), so
//! every request still flows through the same orchestration path.

use async_trait::async_trait;

use crate::domain::assessment::{HealthProfile, ModelUsed, RuleEngine};
use crate::ports::{ModelScore, RiskScorer, ScoringError};

/// Scores profiles with [`RuleEngine`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedScorer {
    engine: RuleEngine,
}

#[async_trait]
impl RiskScorer for RuleBasedScorer {
    async fn score(&self, profile: &HealthProfile) -> Result<ModelScore, ScoringError> {
        let assessment = self
            .engine
            .score(profile)
            .map_err(|e| ScoringError::invalid_response(e.to_string()))?;
        Ok(ModelScore::new(assessment.risk_level, assessment.risk_percentage))
    }

    fn model_kind(&self) -> ModelUsed {
        ModelUsed::RuleBased
    }
}
