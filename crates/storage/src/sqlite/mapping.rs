use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::{QuestionRecord, StorageError};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn map_question_row(row: &SqliteRow) -> Result<QuestionRecord, StorageError> {
    Ok(QuestionRecord {
        id: Some(row.try_get::<String, _>("id").map_err(ser)?),
        question: Some(row.try_get::<String, _>("question").map_err(ser)?),
        answer: Some(row.try_get::<String, _>("answer").map_err(ser)?),
    })
}
