//! Dataset adapters - implementations of the `DatasetSource` port.

mod file_dataset_source;
mod in_memory_dataset_source;

pub use file_dataset_source::FileDatasetSource;
pub use in_memory_dataset_source::InMemoryDatasetSource;
