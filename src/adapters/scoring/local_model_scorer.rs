//! Local Model Scorer - RiskScorer backed by the in-process serving context.
//!
//! Reads the [`ModelSlot`] on every call, so a scorer created before training
//! finishes starts answering as soon as the context is published.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::assessment::{HealthProfile, ModelUsed};
use crate::domain::model::ModelSlot;
use crate::ports::{ModelScore, RiskScorer, ScoringError};

/// Scores profiles with the locally trained model.
#[derive(Debug, Clone)]
pub struct LocalModelScorer {
    slot: ModelSlot,
}

impl LocalModelScorer {
    pub fn new(slot: ModelSlot) -> Self {
        Self { slot }
    }
}

#[async_trait]
impl RiskScorer for LocalModelScorer {
    async fn score(&self, profile: &HealthProfile) -> Result<ModelScore, ScoringError> {
        let context = self.slot.get().ok_or(ScoringError::ModelNotReady)?;
        let prediction = context
            .predict(profile)
            .map_err(|e| ScoringError::invalid_response(e.to_string()))?;

        debug!(
            probability = prediction.probability,
            risk_level = %prediction.risk_level,
            "Local model prediction"
        );
        Ok(prediction.into())
    }

    fn model_kind(&self) -> ModelUsed {
        ModelUsed::Trained
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::{
        ActivityLevel, AlcoholIntake, ClinicalMeasurements, DietType, Gender, HealthProfileInput,
        RiskLevel, SmokingStatus, StressLevel, YesNo,
    };
    use crate::domain::model::{
        DatasetSummary, FeatureEncoder, FeatureLayout, ServingContext, TrainedModel,
    };

    fn test_profile() -> HealthProfile {
        HealthProfile::new(HealthProfileInput {
            age: 50,
            gender: Gender::Female,
            height: Some(160.0),
            weight: Some(70.0),
            family_history: YesNo::No,
            physical_activity: ActivityLevel::Moderate,
            diet_type: DietType::Balanced,
            smoking_status: SmokingStatus::NonSmoker,
            alcohol_intake: AlcoholIntake::No,
            stress_level: StressLevel::Low,
            hypertension: YesNo::No,
            clinical: ClinicalMeasurements::default(),
        })
        .unwrap()
    }

    fn summary() -> DatasetSummary {
        DatasetSummary {
            valid_rows: 10,
            invalid_rows: 0,
            positive_rows: 5,
            prevalence: 0.5,
        }
    }

    #[tokio::test]
    async fn empty_slot_reports_model_not_ready() {
        let scorer = LocalModelScorer::new(ModelSlot::new());
        let err = scorer.score(&test_profile()).await.unwrap_err();
        assert_eq!(err, ScoringError::ModelNotReady);
    }

    #[tokio::test]
    async fn published_model_answers() {
        let slot = ModelSlot::new();
        let scorer = LocalModelScorer::new(slot.clone());

        // Zero weights with bias 2.0: sigmoid(2.0) ~ 0.88 for every profile.
        let model = TrainedModel::new(vec![0.0; 10], 2.0).with_accuracy(0.75);
        slot.publish(ServingContext::from_parts(
            model,
            FeatureEncoder::new(FeatureLayout::Basic),
            summary(),
        ));

        let score = scorer.score(&test_profile()).await.unwrap();
        assert_eq!(score.risk_level, RiskLevel::High);
        assert_eq!(score.risk_percentage.value(), 88);
        assert_eq!(score.accuracy, Some(0.75));
        assert_eq!(scorer.model_kind(), ModelUsed::Trained);
    }

    #[tokio::test]
    async fn dimension_mismatch_is_an_invalid_response() {
        let slot = ModelSlot::new();
        slot.publish(ServingContext::from_parts(
            TrainedModel::new(vec![0.0; 15], 0.0),
            FeatureEncoder::new(FeatureLayout::Basic),
            summary(),
        ));

        let err = LocalModelScorer::new(slot)
            .score(&test_profile())
            .await
            .unwrap_err();
        assert!(matches!(err, ScoringError::InvalidResponse(_)));
    }
}
