//! Dataset Source Port - Where labeled training records come from.

use async_trait::async_trait;

use crate::domain::model::{DatasetError, RawRecord};

/// Port for loading the labeled training dataset.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Loads every record. Validity filtering happens later, in the processor.
    async fn load(&self) -> Result<Vec<RawRecord>, DatasetError>;

    /// Human-readable origin for logs (a path, "in-memory", ...).
    fn describe(&self) -> String;
}
