use std::sync::Arc;

use quiz_core::model::{Catalog, Question};
use storage::repository::QuestionRepository;
use tracing::{info, warn};

use crate::error::CatalogLoadError;

/// Catalog plus what was dropped while building it.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    /// Records rejected for a missing or blank id.
    pub skipped: usize,
    /// Ids seen more than once; the first record was kept.
    pub duplicates: Vec<String>,
}

/// Loads the question catalog once at startup.
#[derive(Clone)]
pub struct CatalogService {
    questions: Arc<dyn QuestionRepository>,
}

impl CatalogService {
    #[must_use]
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self { questions }
    }

    /// Read every record, drop malformed and duplicate entries, and build the catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogLoadError::Storage` if the source cannot be read, and
    /// `CatalogLoadError::Empty` if no usable question remains.
    pub async fn load(&self) -> Result<LoadedCatalog, CatalogLoadError> {
        let records = self.questions.list_questions().await?;

        let mut skipped = 0;
        let mut questions: Vec<Question> = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            match record.into_question() {
                Ok(question) => questions.push(question),
                Err(err) => {
                    skipped += 1;
                    warn!(index, error = %err, "skipping catalog record");
                }
            }
        }

        let build = Catalog::build(questions);
        for id in &build.duplicates {
            warn!(%id, "duplicate question id, keeping first occurrence");
        }
        if build.catalog.is_empty() {
            return Err(CatalogLoadError::Empty);
        }

        info!(
            questions = build.catalog.len(),
            skipped,
            duplicates = build.duplicates.len(),
            "catalog loaded"
        );
        Ok(LoadedCatalog {
            catalog: build.catalog,
            skipped,
            duplicates: build.duplicates,
        })
    }
}
