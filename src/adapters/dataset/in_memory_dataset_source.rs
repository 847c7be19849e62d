//! In-memory Dataset Source Adapter
//!
//! Holds records directly; used by tests and embedded deployments.

use async_trait::async_trait;

use crate::domain::model::{DatasetError, RawRecord};
use crate::ports::DatasetSource;

/// Dataset held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatasetSource {
    records: Vec<RawRecord>,
}

impl InMemoryDatasetSource {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl DatasetSource for InMemoryDatasetSource {
    async fn load(&self) -> Result<Vec<RawRecord>, DatasetError> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory ({} records)", self.records.len())
    }
}
