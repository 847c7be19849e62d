//! RiskOrchestrator - Chooses between the trained model and the rule engine.
//!
//! Each evaluation makes at most one bounded attempt at the primary scorer.
//! On success the primary's tier and percentage stand and the rule engine only
//! explains them. On any failure (or with no primary at all) the rule engine's
//! complete result is returned, prefixed with [`FALLBACK_NOTICE`].

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::assessment::{
    EvaluationState, HealthProfile, ModelUsed, RiskError, RiskResult, RuleAssessment, RuleEngine,
};
use crate::domain::foundation::StateMachine;
use crate::ports::{ModelScore, RiskScorer, ScoringError};

/// Time budget for the primary attempt.
pub const DEFAULT_SCORING_TIMEOUT: Duration = Duration::from_secs(5);

/// First recommendation of every fallback result.
pub const FALLBACK_NOTICE: &str =
    "Note: the trained model was unavailable, so this assessment is based on rule-based scoring.";

/// Produces a [`RiskResult`] for a validated profile.
pub struct RiskOrchestrator {
    primary: Option<Arc<dyn RiskScorer>>,
    rules: RuleEngine,
    timeout: Duration,
}

impl RiskOrchestrator {
    pub fn new(primary: Arc<dyn RiskScorer>) -> Self {
        Self {
            primary: Some(primary),
            rules: RuleEngine::new(),
            timeout: DEFAULT_SCORING_TIMEOUT,
        }
    }

    /// An orchestrator that always takes the fallback path.
    pub fn without_primary() -> Self {
        Self {
            primary: None,
            rules: RuleEngine::new(),
            timeout: DEFAULT_SCORING_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Evaluates one profile.
    ///
    /// # Errors
    ///
    /// `RiskError::MissingBmi` when the profile cannot be scored at all.
    /// Scorer failures never surface here; they select the fallback.
    pub async fn evaluate(&self, profile: &HealthProfile) -> Result<RiskResult, RiskError> {
        let assessment = self.rules.score(profile)?;
        let state = EvaluationState::AttemptTrained;

        match self.attempt_primary(profile).await {
            Ok((score, kind)) => {
                let state = state.transition_to(EvaluationState::Trained)?;
                debug!(
                    %state,
                    risk_level = %score.risk_level,
                    model = kind.as_str(),
                    "Primary scorer answered"
                );
                self.from_primary(profile, score, kind)
            }
            Err(err) => {
                let state = state.transition_to(EvaluationState::FallbackRuleBased)?;
                warn!(
                    %state,
                    error = %err,
                    kind = err.kind(),
                    "Trained model unavailable, falling back to rule-based scoring"
                );
                Ok(fallback(assessment))
            }
        }
    }

    async fn attempt_primary(
        &self,
        profile: &HealthProfile,
    ) -> Result<(ModelScore, ModelUsed), ScoringError> {
        let primary = self.primary.as_ref().ok_or(ScoringError::ModelNotReady)?;

        let score = tokio::time::timeout(self.timeout, primary.score(profile))
            .await
            .map_err(|_| ScoringError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            })??;

        Ok((score, primary.model_kind()))
    }

    fn from_primary(
        &self,
        profile: &HealthProfile,
        score: ModelScore,
        kind: ModelUsed,
    ) -> Result<RiskResult, RiskError> {
        let explanation = self.rules.explain(profile, score.risk_level)?;
        Ok(RiskResult {
            risk_level: score.risk_level,
            risk_percentage: score.risk_percentage,
            factors: explanation.factors,
            recommendations: explanation.recommendations,
            model_used: kind,
            model_accuracy: score.accuracy,
        })
    }
}

fn fallback(assessment: RuleAssessment) -> RiskResult {
    let mut recommendations = Vec::with_capacity(assessment.recommendations.len() + 1);
    recommendations.push(FALLBACK_NOTICE.to_string());
    recommendations.extend(assessment.recommendations);

    RiskResult {
        risk_level: assessment.risk_level,
        risk_percentage: assessment.risk_percentage,
        factors: assessment.factors,
        recommendations,
        model_used: ModelUsed::RuleBased,
        model_accuracy: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::scoring::{MockScorer, RuleBasedScorer};
    use crate::domain::assessment::{
        ActivityLevel, AlcoholIntake, ClinicalMeasurements, DietType, Gender, HealthProfileInput,
        RiskLevel, SmokingStatus, StressLevel, YesNo,
    };
    use crate::domain::foundation::Percentage;

    fn test_profile() -> HealthProfile {
        HealthProfile::new(HealthProfileInput {
            age: 48,
            gender: Gender::Male,
            height: Some(178.0),
            weight: Some(92.0),
            family_history: YesNo::Yes,
            physical_activity: ActivityLevel::Low,
            diet_type: DietType::Balanced,
            smoking_status: SmokingStatus::FormerSmoker,
            alcohol_intake: AlcoholIntake::Occasional,
            stress_level: StressLevel::Medium,
            hypertension: YesNo::No,
            clinical: ClinicalMeasurements::default(),
        })
        .unwrap()
    }

    fn high_score() -> ModelScore {
        ModelScore::new(RiskLevel::High, Percentage::new(83))
            .with_probability(0.83)
            .with_accuracy(0.91)
    }

    #[tokio::test]
    async fn primary_success_sets_tier_and_tags_trained() {
        let scorer = MockScorer::new().with_score(high_score());
        let orchestrator = RiskOrchestrator::new(Arc::new(scorer.clone()));

        let result = orchestrator.evaluate(&test_profile()).await.unwrap();

        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(result.risk_percentage.value(), 83);
        assert_eq!(result.model_used, ModelUsed::Trained);
        assert_eq!(result.model_accuracy, Some(0.91));
        assert_eq!(scorer.call_count(), 1);
    }

    #[tokio::test]
    async fn primary_success_explains_with_rule_factors() {
        let orchestrator =
            RiskOrchestrator::new(Arc::new(MockScorer::new().with_score(high_score())));
        let profile = test_profile();

        let result = orchestrator.evaluate(&profile).await.unwrap();
        let explanation = RuleEngine::new().explain(&profile, RiskLevel::High).unwrap();

        assert_eq!(result.factors, explanation.factors);
        assert_eq!(result.recommendations, explanation.recommendations);
        assert!(!result.recommendations.iter().any(|r| r == FALLBACK_NOTICE));
    }

    #[tokio::test]
    async fn timeout_falls_back_with_identical_factors() {
        let scorer = MockScorer::new()
            .with_score(high_score())
            .with_delay(Duration::from_millis(500));
        let orchestrator =
            RiskOrchestrator::new(Arc::new(scorer)).with_timeout(Duration::from_millis(50));
        let profile = test_profile();

        let result = orchestrator.evaluate(&profile).await.unwrap();
        let direct = RuleEngine::new().score(&profile).unwrap();

        assert_eq!(result.model_used, ModelUsed::RuleBased);
        assert_eq!(result.factors, direct.factors);
        assert_eq!(result.risk_level, direct.risk_level);
        assert_eq!(result.risk_percentage, direct.risk_percentage);
        assert_eq!(result.recommendations[0], FALLBACK_NOTICE);
        assert_eq!(result.recommendations[1..], direct.recommendations[..]);
        assert_eq!(result.model_accuracy, None);
    }

    #[tokio::test]
    async fn every_scoring_error_falls_back() {
        let errors = [
            ScoringError::Timeout { timeout_secs: 5 },
            ScoringError::network("connection refused"),
            ScoringError::unavailable(502, "bad gateway"),
            ScoringError::ModelNotReady,
            ScoringError::parse("eof"),
            ScoringError::invalid_response("riskPercentage 140"),
        ];

        for error in errors {
            let orchestrator = RiskOrchestrator::new(Arc::new(MockScorer::new().with_error(error)));
            let result = orchestrator.evaluate(&test_profile()).await.unwrap();
            assert_eq!(result.model_used, ModelUsed::RuleBased);
            assert_eq!(result.recommendations[0], FALLBACK_NOTICE);
        }
    }

    #[tokio::test]
    async fn no_primary_behaves_like_fallback() {
        let profile = test_profile();
        let result = RiskOrchestrator::without_primary()
            .evaluate(&profile)
            .await
            .unwrap();
        let direct = RuleEngine::new().score(&profile).unwrap();

        assert_eq!(result.model_used, ModelUsed::RuleBased);
        assert_eq!(result.risk_percentage, direct.risk_percentage);
        assert_eq!(result.recommendations[0], FALLBACK_NOTICE);
    }

    #[tokio::test]
    async fn makes_a_single_attempt() {
        let scorer = MockScorer::new().with_error(ScoringError::network("down"));
        let orchestrator = RiskOrchestrator::new(Arc::new(scorer.clone()));

        orchestrator.evaluate(&test_profile()).await.unwrap();

        assert_eq!(scorer.call_count(), 1);
    }

    #[tokio::test]
    async fn rule_based_primary_is_not_a_fallback() {
        let profile = test_profile();
        let orchestrator = RiskOrchestrator::new(Arc::new(RuleBasedScorer::default()));

        let result = orchestrator.evaluate(&profile).await.unwrap();
        let direct = RuleEngine::new().score(&profile).unwrap();

        assert_eq!(result.model_used, ModelUsed::RuleBased);
        assert_eq!(result.risk_percentage, direct.risk_percentage);
        assert_eq!(result.recommendations, direct.recommendations);
    }

    #[test]
    fn default_timeout_is_five_seconds() {
        assert_eq!(
            RiskOrchestrator::without_primary().timeout(),
            Duration::from_secs(5)
        );
    }
}
