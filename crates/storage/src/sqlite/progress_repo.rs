use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use talent_core::model::AnswerSheet;

use crate::repository::{ProgressRecord, ProgressRepository, StorageError};

use super::mapping::{question_id_from_i64, question_id_to_i64, score_from_tenths, score_to_tenths, ser};
use super::SqliteRepository;

#[async_trait]
impl ProgressRepository for SqliteRepository {
    async fn save_progress(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let index = i64::try_from(record.current_question_index)
            .map_err(|_| StorageError::Serialization("current_question_index overflow".into()))?;

        // Replace the whole record so removed answers do not linger.
        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        sqlx::query("DELETE FROM progress_answers")
            .execute(&mut *tx)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        sqlx::query(
            r"
            INSERT INTO progress (id, current_question_index, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(id) DO UPDATE SET
                current_question_index = excluded.current_question_index,
                updated_at = excluded.updated_at
            ",
        )
        .bind(1_i64)
        .bind(index)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        for (id, score) in record.answers.iter() {
            sqlx::query(
                r"
                INSERT INTO progress_answers (question_id, score_tenths)
                VALUES (?1, ?2)
                ",
            )
            .bind(question_id_to_i64(id))
            .bind(score_to_tenths(score))
            .execute(&mut *tx)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))
    }

    async fn load_progress(&self) -> Result<Option<ProgressRecord>, StorageError> {
        let row = sqlx::query("SELECT current_question_index FROM progress WHERE id = 1")
            .fetch_optional(self.pool())
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let index_i64: i64 = row.try_get("current_question_index").map_err(ser)?;
        let current_question_index = usize::try_from(index_i64)
            .map_err(|_| StorageError::Serialization(format!("invalid index: {index_i64}")))?;

        let answer_rows = sqlx::query("SELECT question_id, score_tenths FROM progress_answers")
            .fetch_all(self.pool())
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let mut answers = AnswerSheet::new();
        for row in answer_rows {
            let id = question_id_from_i64(row.try_get("question_id").map_err(ser)?)?;
            let score = score_from_tenths(row.try_get("score_tenths").map_err(ser)?)?;
            answers.record(id, score);
        }

        Ok(Some(ProgressRecord {
            current_question_index,
            answers,
        }))
    }

    async fn clear_progress(&self) -> Result<(), StorageError> {
        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        sqlx::query("DELETE FROM progress_answers")
            .execute(&mut *tx)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        sqlx::query("DELETE FROM progress")
            .execute(&mut *tx)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        tx.commit()
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))
    }
}
