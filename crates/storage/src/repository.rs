use async_trait::async_trait;
use quiz_core::model::{Question, QuestionError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::json::JsonCatalogFile;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("catalog source is read-only")]
    ReadOnly,

    #[error("io error: {0}")]
    Io(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape for a catalog entry.
///
/// Every field is optional so that sources with incomplete entries can be
/// read and filtered instead of failing as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: Option<String>,
    pub question: Option<String>,
    pub answer: Option<String>,
}

impl QuestionRecord {
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        Self {
            id: Some(question.id().to_owned()),
            question: Some(question.question().to_owned()),
            answer: Some(question.answer().to_owned()),
        }
    }

    /// Convert the record back into a domain `Question`.
    ///
    /// Missing question or answer text becomes an empty string.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::BlankId` if the record has no usable id.
    pub fn into_question(self) -> Result<Question, QuestionError> {
        Question::new(
            self.id.unwrap_or_default(),
            self.question.unwrap_or_default(),
            self.answer.unwrap_or_default(),
        )
    }
}

/// Repository contract for the question catalog.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Fetch every record in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the source cannot be read.
    async fn list_questions(&self) -> Result<Vec<QuestionRecord>, StorageError>;

    /// Insert or update questions by id, keeping the position of existing ids.
    ///
    /// Returns the number of questions written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::ReadOnly` for sources that cannot be written,
    /// or other storage errors.
    async fn upsert_questions(&self, questions: &[Question]) -> Result<usize, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    questions: Arc<Mutex<Vec<QuestionRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with raw records, including malformed ones.
    #[must_use]
    pub fn with_records(records: Vec<QuestionRecord>) -> Self {
        Self {
            questions: Arc::new(Mutex::new(records)),
        }
    }
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn list_questions(&self) -> Result<Vec<QuestionRecord>, StorageError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn upsert_questions(&self, questions: &[Question]) -> Result<usize, StorageError> {
        let mut guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        for question in questions {
            let record = QuestionRecord::from_question(question);
            match guard
                .iter()
                .position(|existing| existing.id.as_deref() == Some(question.id()))
            {
                Some(index) => guard[index] = record,
                None => guard.push(record),
            }
        }
        Ok(questions.len())
    }
}

/// Catalog source behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let questions: Arc<dyn QuestionRepository> = Arc::new(InMemoryRepository::new());
        Self { questions }
    }

    /// Read the catalog from a JSON file such as `words.json`.
    #[must_use]
    pub fn json_file(path: impl Into<PathBuf>) -> Self {
        let questions: Arc<dyn QuestionRepository> = Arc::new(JsonCatalogFile::new(path));
        Self { questions }
    }
}
