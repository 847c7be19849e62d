//! TrainModelHandler - Loads the dataset and builds the serving context.
//!
//! Training is CPU-bound, so it runs on the blocking pool. The resulting
//! context is published into the [`ModelSlot`] only once it is complete.

use std::sync::Arc;
use tracing::info;

use crate::domain::model::{
    DatasetError, ModelError, ModelSlot, ServingContext, TrainingSettings,
};
use crate::ports::DatasetSource;

/// Errors from the startup trainer.
#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("training failed: {0}")]
    Model(#[from] ModelError),

    #[error("training task aborted: {0}")]
    Aborted(String),

    #[error("a model is already published")]
    AlreadyPublished,
}

/// Handler for training and publishing the serving model.
pub struct TrainModelHandler {
    source: Arc<dyn DatasetSource>,
    settings: TrainingSettings,
}

impl TrainModelHandler {
    pub fn new(source: Arc<dyn DatasetSource>, settings: TrainingSettings) -> Self {
        Self { source, settings }
    }

    /// Loads records and trains a context without publishing it.
    pub async fn handle(&self) -> Result<ServingContext, TrainingError> {
        let records = self.source.load().await?;
        info!(
            source = %self.source.describe(),
            records = records.len(),
            "Dataset loaded"
        );

        let settings = self.settings;
        let context =
            tokio::task::spawn_blocking(move || ServingContext::train(&records, &settings))
                .await
                .map_err(|e| TrainingError::Aborted(e.to_string()))??;

        Ok(context)
    }

    /// Trains and publishes into `slot`.
    pub async fn train_and_publish(&self, slot: &ModelSlot) -> Result<(), TrainingError> {
        let context = self.handle().await?;
        if slot.publish(context) {
            info!("Serving model published");
            Ok(())
        } else {
            Err(TrainingError::AlreadyPublished)
        }
    }
}
