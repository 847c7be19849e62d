//! File-based Dataset Source Adapter
//!
//! Reads a JSON array of flat records from disk. Each object is one row keyed
//! by dataset column name (`Age`, `BMI`, `Diet_Type`, ..., `Diabetes`).

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::model::{parse_records, DatasetError, RawRecord};
use crate::ports::DatasetSource;

/// Dataset stored as a JSON file.
#[derive(Debug, Clone)]
pub struct FileDatasetSource {
    path: PathBuf,
}

impl FileDatasetSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl DatasetSource for FileDatasetSource {
    async fn load(&self) -> Result<Vec<RawRecord>, DatasetError> {
        let contents = fs::read_to_string(&self.path).await?;
        parse_records(&contents)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn loads_records_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"Age": 50, "BMI": "27.5", "Diabetes": "Yes"}}, {{"Age": 31, "Diabetes": "No"}}]"#
        )
        .unwrap();

        let source = FileDatasetSource::new(file.path());
        let records = source.load().await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("Age").map(String::as_str), Some("50"));
        assert_eq!(records[0].get("BMI").map(String::as_str), Some("27.5"));
        assert!(records[1].get("BMI").is_none());
        assert_eq!(source.describe(), file.path().display().to_string());
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileDatasetSource::new(dir.path().join("absent.json"));

        let err = source.load().await.unwrap_err();
        assert!(matches!(err, DatasetError::Io(_)));
    }

    #[tokio::test]
    async fn non_array_file_is_a_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"Age": 50}}"#).unwrap();

        let err = FileDatasetSource::new(file.path()).load().await.unwrap_err();
        assert!(matches!(err, DatasetError::Parse(_)));
    }
}
