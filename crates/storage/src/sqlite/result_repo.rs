use async_trait::async_trait;
use sqlx::Row;

use talent_core::model::AnswerSheet;

use crate::repository::{ResultRepository, StorageError};

use super::mapping::{question_id_from_i64, question_id_to_i64, score_from_tenths, score_to_tenths, ser};
use super::SqliteRepository;

#[async_trait]
impl ResultRepository for SqliteRepository {
    async fn save_result(&self, answers: &AnswerSheet) -> Result<(), StorageError> {
        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        sqlx::query("DELETE FROM final_answers")
            .execute(&mut *tx)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        for (id, score) in answers.iter() {
            sqlx::query(
                r"
                INSERT INTO final_answers (question_id, score_tenths)
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

    async fn load_result(&self) -> Result<Option<AnswerSheet>, StorageError> {
        let rows = sqlx::query("SELECT question_id, score_tenths FROM final_answers")
            .fetch_all(self.pool())
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        if rows.is_empty() {
            return Ok(None);
        }

        let mut answers = AnswerSheet::new();
        for row in rows {
            let id = question_id_from_i64(row.try_get("question_id").map_err(ser)?)?;
            let score = score_from_tenths(row.try_get("score_tenths").map_err(ser)?)?;
            answers.record(id, score);
        }
        Ok(Some(answers))
    }

    async fn clear_result(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM final_answers")
            .execute(self.pool())
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }
}
