//! Model Module - Feature encoding, dataset fitting and the linear classifier.
//!
//! # Components
//!
//! - `vocabulary` - Versioned category tables shared by training and inference
//! - `FeatureEncoder` - Profile or dataset row to fixed-order vector
//! - `DatasetProcessor` - Two-pass fit producing vectors, labels and statistics
//! - `LinearClassifier` - Gradient descent trainer and pure inference
//! - `ServingContext` - Trained model plus its encoder, published once

mod classifier;
mod dataset;
mod encoder;
mod serving;
mod vocabulary;

pub use classifier::{
    sigmoid, LinearClassifier, ModelError, TrainedModel, DECISION_THRESHOLD, DEFAULT_ITERATIONS,
    DEFAULT_LEARNING_RATE, SERVING_ITERATIONS,
};
pub use dataset::{
    parse_records, DatasetError, DatasetProcessor, DatasetSummary, FittedDataset,
    RawRecord, LABEL_COLUMN,
};
pub use encoder::{
    EncodedFeatureVector, FeatureEncoder, FeatureLayout, FeatureSlot, FeatureSource, FieldStats,
    NormalizationStats,
};
pub use serving::{ModelPrediction, ModelSlot, ServingContext, TrainingSettings};
pub use vocabulary::{CategoricalField, ContinuousField, DatasetTerm, VOCABULARY_VERSION};
