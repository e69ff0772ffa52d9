use quiz_core::model::Question;

use super::SqliteRepository;
use super::mapping::map_question_row;
use crate::repository::{QuestionRecord, QuestionRepository, StorageError};

fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait::async_trait]
impl QuestionRepository for SqliteRepository {
    async fn list_questions(&self) -> Result<Vec<QuestionRecord>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, question, answer
            FROM questions
            ORDER BY position ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(map_question_row(&row)?);
        }
        Ok(records)
    }

    async fn upsert_questions(&self, questions: &[Question]) -> Result<usize, StorageError> {
        let mut tx = self.pool.begin().await.map_err(conn)?;

        for question in questions {
            sqlx::query(
                r"
                INSERT INTO questions (id, question, answer)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(id) DO UPDATE SET
                    question = excluded.question,
                    answer = excluded.answer
                ",
            )
            .bind(question.id())
            .bind(question.question())
            .bind(question.answer())
            .execute(&mut *tx)
            .await
            .map_err(conn)?;
        }

        tx.commit().await.map_err(conn)?;
        Ok(questions.len())
    }
}
