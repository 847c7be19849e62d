//! Serving context - everything the scoring service needs, trained once.
//!
//! A [`ServingContext`] bundles the trained weights with the exact encoder
//! (layout and normalization statistics) used to produce its training vectors.
//! It is built by [`ServingContext::train`] before the server accepts
//! requests and published into a [`ModelSlot`], a write-once cell. Readers
//! either see nothing or a complete context; nothing ever mutates it.

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::info;

use super::classifier::{LinearClassifier, ModelError, TrainedModel, SERVING_ITERATIONS, DEFAULT_LEARNING_RATE};
use super::dataset::{DatasetProcessor, DatasetSummary, RawRecord};
use super::encoder::{FeatureEncoder, FeatureLayout};
use crate::domain::assessment::{HealthProfile, RiskLevel};
use crate::domain::foundation::Percentage;

/// Parameters of the startup trainer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingSettings {
    pub learning_rate: f64,
    pub iterations: usize,
    pub layout: FeatureLayout,
}

impl Default for TrainingSettings {
    fn default() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            iterations: SERVING_ITERATIONS,
            layout: FeatureLayout::Basic,
        }
    }
}

/// Result of scoring one profile with the trained model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPrediction {
    pub probability: f64,
    pub risk_level: RiskLevel,
    pub risk_percentage: Percentage,
    pub accuracy: Option<f64>,
}

impl ModelPrediction {
    /// Maps a probability to tier and whole percent.
    pub fn from_probability(probability: f64, accuracy: Option<f64>) -> Self {
        Self {
            probability,
            risk_level: RiskLevel::from_probability(probability),
            risk_percentage: Percentage::from_fraction(probability),
            accuracy,
        }
    }
}

/// Trained model plus the encoder that feeds it.
#[derive(Debug, Clone)]
pub struct ServingContext {
    model: TrainedModel,
    encoder: FeatureEncoder,
    summary: DatasetSummary,
    trained_at: DateTime<Utc>,
}

impl ServingContext {
    /// Fits the dataset, trains the classifier and measures training accuracy.
    ///
    /// # Errors
    ///
    /// `ModelError::EmptyDataset` when no row survives the validity filter.
    pub fn train(records: &[RawRecord], settings: &TrainingSettings) -> Result<Self, ModelError> {
        let fitted = DatasetProcessor::new(settings.layout).fit(records);
        let classifier = LinearClassifier::new(settings.learning_rate, settings.iterations);

        let model = classifier.train(&fitted.features, &fitted.labels)?;
        let accuracy = LinearClassifier::accuracy(&model, &fitted.features, &fitted.labels)?;
        let model = model.with_accuracy(accuracy);

        info!(
            features = model.feature_count(),
            iterations = settings.iterations,
            accuracy,
            "Model trained"
        );

        Ok(Self {
            model,
            encoder: FeatureEncoder::with_stats(settings.layout, fitted.stats),
            summary: fitted.summary,
            trained_at: Utc::now(),
        })
    }

    /// Assembles a context from already trained parts.
    pub fn from_parts(model: TrainedModel, encoder: FeatureEncoder, summary: DatasetSummary) -> Self {
        Self {
            model,
            encoder,
            summary,
            trained_at: Utc::now(),
        }
    }

    /// Encodes the profile with the training encoder and runs inference.
    pub fn predict(&self, profile: &HealthProfile) -> Result<ModelPrediction, ModelError> {
        let features = self.encoder.encode(profile);
        let probability = self.model.predict(features.as_slice())?;
        Ok(ModelPrediction::from_probability(probability, self.model.accuracy()))
    }

    pub fn model(&self) -> &TrainedModel {
        &self.model
    }

    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    pub fn summary(&self) -> &DatasetSummary {
        &self.summary
    }

    pub fn trained_at(&self) -> DateTime<Utc> {
        self.trained_at
    }
}

/// Write-once holder of the serving context.
///
/// Cloning shares the same slot.
#[derive(Debug, Clone, Default)]
pub struct ModelSlot {
    inner: Arc<OnceCell<Arc<ServingContext>>>,
}

impl ModelSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a context. Returns false if one was already published.
    pub fn publish(&self, context: ServingContext) -> bool {
        self.inner.set(Arc::new(context)).is_ok()
    }

    pub fn get(&self) -> Option<Arc<ServingContext>> {
        self.inner.get().cloned()
    }

    pub fn is_ready(&self) -> bool {
        self.inner.get().is_some()
    }
}
