//! Read-only catalog source backed by a JSON array of question objects.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use quiz_core::model::Question;
use tracing::{debug, warn};

use crate::repository::{QuestionRecord, QuestionRepository, StorageError};

/// A `words.json`-style file: `[{"id": "A1_001", "question": "...", "answer": "..."}, ...]`.
#[derive(Debug, Clone)]
pub struct JsonCatalogFile {
    path: PathBuf,
}

impl JsonCatalogFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse catalog JSON, skipping entries that are not question objects.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the document is not a JSON array.
pub fn parse_catalog_json(raw: &str) -> Result<Vec<QuestionRecord>, StorageError> {
    let entries: Vec<serde_json::Value> =
        serde_json::from_str(raw).map_err(|e| StorageError::Serialization(e.to_string()))?;

    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<QuestionRecord>(entry) {
            Ok(record) => records.push(record),
            Err(err) => warn!(index, error = %err, "skipping malformed catalog entry"),
        }
    }
    Ok(records)
}

#[async_trait]
impl QuestionRepository for JsonCatalogFile {
    async fn list_questions(&self) -> Result<Vec<QuestionRecord>, StorageError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => StorageError::NotFound,
                _ => StorageError::Io(e.to_string()),
            })?;
        let records = parse_catalog_json(&raw)?;
        debug!(path = %self.path.display(), records = records.len(), "read catalog file");
        Ok(records)
    }

    async fn upsert_questions(&self, _questions: &[Question]) -> Result<usize, StorageError> {
        Err(StorageError::ReadOnly)
    }
}
