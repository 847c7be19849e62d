//! Startup training configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::domain::model::{
    FeatureLayout, TrainingSettings, DEFAULT_LEARNING_RATE, SERVING_ITERATIONS,
};

/// Training configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TrainingConfig {
    /// JSON dataset to train from; no training happens without one
    pub dataset_path: Option<PathBuf>,

    /// Gradient descent step size
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,

    /// Full-batch passes
    #[serde(default = "default_iterations")]
    pub iterations: usize,

    /// Include the five clinical measurements as features
    #[serde(default)]
    pub clinical_features: bool,
}

impl TrainingConfig {
    /// Feature layout selected by `clinical_features`
    pub fn layout(&self) -> FeatureLayout {
        if self.clinical_features {
            FeatureLayout::Clinical
        } else {
            FeatureLayout::Basic
        }
    }

    /// Trainer parameters
    pub fn settings(&self) -> TrainingSettings {
        TrainingSettings {
            learning_rate: self.learning_rate,
            iterations: self.iterations,
            layout: self.layout(),
        }
    }

    /// Validate training configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(ValidationError::InvalidLearningRate);
        }
        if self.iterations == 0 || self.iterations > 1_000_000 {
            return Err(ValidationError::InvalidIterations);
        }
        Ok(())
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            dataset_path: None,
            learning_rate: default_learning_rate(),
            iterations: default_iterations(),
            clinical_features: false,
        }
    }
}

fn default_learning_rate() -> f64 {
    DEFAULT_LEARNING_RATE
}

fn default_iterations() -> usize {
    SERVING_ITERATIONS
}
