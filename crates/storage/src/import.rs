//! Copy a catalog from one repository into another.

use quiz_core::model::{Catalog, Question};
use tracing::{info, warn};

use crate::repository::{QuestionRepository, StorageError};

/// Outcome of an import run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub written: usize,
    /// Source positions of entries without a usable id.
    pub skipped: Vec<usize>,
    /// Ids seen again after their first occurrence.
    pub duplicates: Vec<String>,
}

/// Read every record from `source` and upsert the valid ones into `target`.
///
/// The first record for each id wins, matching how catalogs are loaded.
///
/// # Errors
///
/// Returns `StorageError` if reading the source or writing the target fails.
pub async fn import_catalog(
    source: &dyn QuestionRepository,
    target: &dyn QuestionRepository,
) -> Result<ImportReport, StorageError> {
    let records = source.list_questions().await?;

    let mut skipped = Vec::new();
    let mut questions: Vec<Question> = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        match record.into_question() {
            Ok(question) => questions.push(question),
            Err(err) => {
                warn!(index, error = %err, "skipping catalog entry");
                skipped.push(index);
            }
        }
    }

    let build = Catalog::build(questions);
    for id in &build.duplicates {
        warn!(%id, "duplicate question id, keeping the first entry");
    }

    let unique: Vec<Question> = build.catalog.iter().cloned().collect();
    let written = target.upsert_questions(&unique).await?;
    info!(written, skipped = skipped.len(), duplicates = build.duplicates.len(), "catalog copied");

    Ok(ImportReport {
        written,
        skipped,
        duplicates: build.duplicates,
    })
}
