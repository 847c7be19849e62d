//! Linear Classifier - logistic regression trained by batch gradient descent.
//!
//! Training minimizes the squared residual of the sigmoid output rather than
//! cross-entropy. Each iteration:
//!
//! 1. computes `e = sigmoid(w·x + b) - y` for every sample with the current
//!    parameters,
//! 2. accumulates `Σ e·x_j` per weight and `Σ e` for the bias,
//! 3. updates `w_j -= lr · Σ e·x_j / N` and `b -= lr · Σ e / N`.
//!
//! There is no regularization and no early stopping: exactly `iterations`
//! passes run. Keeping this update rule unchanged keeps trained weights
//! reproducible across releases.

use serde::Serialize;
use thiserror::Error;

/// Default learning rate.
pub const DEFAULT_LEARNING_RATE: f64 = 0.01;

/// Default iteration count.
pub const DEFAULT_ITERATIONS: usize = 1000;

/// Iteration count used by the startup trainer.
pub const SERVING_ITERATIONS: usize = 2000;

/// Probability at or above which a prediction counts as positive.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Errors from training or applying a model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("cannot train on an empty dataset")]
    EmptyDataset,

    #[error("{features} feature rows but {labels} labels")]
    LabelCountMismatch { features: usize, labels: usize },

    #[error("feature row {row} has {actual} values, expected {expected}")]
    RaggedFeatures {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("model expects {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Logistic function.
pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn linear(weights: &[f64], bias: f64, features: &[f64]) -> f64 {
    weights
        .iter()
        .zip(features)
        .map(|(w, x)| w * x)
        .sum::<f64>()
        + bias
}

/// Weights and bias of a trained classifier. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainedModel {
    weights: Vec<f64>,
    bias: f64,
    accuracy: Option<f64>,
}

impl TrainedModel {
    pub fn new(weights: Vec<f64>, bias: f64) -> Self {
        Self {
            weights,
            bias,
            accuracy: None,
        }
    }

    /// Attaches a measured accuracy (fraction of correct predictions).
    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = Some(accuracy);
        self
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn accuracy(&self) -> Option<f64> {
        self.accuracy
    }

    pub fn feature_count(&self) -> usize {
        self.weights.len()
    }

    /// `sigmoid(w·x + b)`.
    ///
    /// # Errors
    ///
    /// `ModelError::DimensionMismatch` if the vector length differs from the
    /// weight count.
    pub fn predict(&self, features: &[f64]) -> Result<f64, ModelError> {
        if features.len() != self.weights.len() {
            return Err(ModelError::DimensionMismatch {
                expected: self.weights.len(),
                actual: features.len(),
            });
        }
        Ok(sigmoid(linear(&self.weights, self.bias, features)))
    }
}

/// Gradient descent trainer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearClassifier {
    learning_rate: f64,
    iterations: usize,
}

impl Default for LinearClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_LEARNING_RATE, DEFAULT_ITERATIONS)
    }
}

impl LinearClassifier {
    pub fn new(learning_rate: f64, iterations: usize) -> Self {
        Self {
            learning_rate,
            iterations,
        }
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Trains from zero-initialized parameters.
    ///
    /// # Errors
    ///
    /// - `ModelError::EmptyDataset` when there are no samples
    /// - `ModelError::LabelCountMismatch` when labels and rows differ in count
    /// - `ModelError::RaggedFeatures` when rows differ in length
    pub fn train(&self, features: &[Vec<f64>], labels: &[f64]) -> Result<TrainedModel, ModelError> {
        let dims = check_shape(features, labels)?;
        let n = features.len() as f64;
        let mut weights = vec![0.0; dims];
        let mut bias = 0.0;

        for _ in 0..self.iterations {
            let mut weight_gradients = vec![0.0; dims];
            let mut bias_gradient = 0.0;

            for (x, y) in features.iter().zip(labels) {
                let error = sigmoid(linear(&weights, bias, x)) - y;
                for (gradient, value) in weight_gradients.iter_mut().zip(x) {
                    *gradient += error * value;
                }
                bias_gradient += error;
            }

            for (weight, gradient) in weights.iter_mut().zip(&weight_gradients) {
                *weight -= self.learning_rate * gradient / n;
            }
            bias -= self.learning_rate * bias_gradient / n;
        }

        Ok(TrainedModel::new(weights, bias))
    }

    /// Pure inference: `sigmoid(w·x + b)`.
    pub fn predict(features: &[f64], model: &TrainedModel) -> Result<f64, ModelError> {
        model.predict(features)
    }

    /// Fraction of samples whose thresholded prediction matches the label.
    pub fn accuracy(
        model: &TrainedModel,
        features: &[Vec<f64>],
        labels: &[f64],
    ) -> Result<f64, ModelError> {
        check_shape(features, labels)?;
        let mut correct = 0usize;
        for (x, y) in features.iter().zip(labels) {
            let predicted = if model.predict(x)? >= DECISION_THRESHOLD {
                1.0
            } else {
                0.0
            };
            if predicted == *y {
                correct += 1;
            }
        }
        Ok(correct as f64 / features.len() as f64)
    }
}

fn check_shape(features: &[Vec<f64>], labels: &[f64]) -> Result<usize, ModelError> {
    let first = features.first().ok_or(ModelError::EmptyDataset)?;
    if features.len() != labels.len() {
        return Err(ModelError::LabelCountMismatch {
            features: features.len(),
            labels: labels.len(),
        });
    }
    let expected = first.len();
    if let Some((row, x)) = features.iter().enumerate().find(|(_, x)| x.len() != expected) {
        return Err(ModelError::RaggedFeatures {
            row,
            expected,
            actual: x.len(),
        });
    }
    Ok(expected)
}
