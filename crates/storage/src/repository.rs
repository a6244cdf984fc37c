use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use talent_core::model::AnswerSheet;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted in-progress state: where the respondent is and what they have
/// answered so far.
///
/// The serialized shape is the wire contract with older saved data, so the
/// field names keep their original camelCase spelling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub current_question_index: usize,
    pub answers: AnswerSheet,
}

/// Repository contract for the in-progress record.
///
/// There is exactly one progress record per storage namespace; saving
/// replaces it wholesale.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Persist (or replace) the progress record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn save_progress(&self, record: &ProgressRecord) -> Result<(), StorageError>;

    /// Fetch the progress record, if one was saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for unreadable persisted state,
    /// or other storage errors.
    async fn load_progress(&self) -> Result<Option<ProgressRecord>, StorageError>;

    /// Remove the progress record. Removing an absent record is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be removed.
    async fn clear_progress(&self) -> Result<(), StorageError>;
}

/// Repository contract for the finalized answer sheet.
///
/// Written once when the assessment completes; the bare sheet is the whole
/// record.
#[async_trait]
pub trait ResultRepository: Send + Sync {
    /// Persist (or replace) the finalized answers.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the sheet cannot be stored.
    async fn save_result(&self, answers: &AnswerSheet) -> Result<(), StorageError>;

    /// Fetch the finalized answers, if the assessment was completed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for unreadable persisted state,
    /// or other storage errors.
    async fn load_result(&self) -> Result<Option<AnswerSheet>, StorageError>;

    /// Remove the finalized answers. Removing absent answers is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be removed.
    async fn clear_result(&self) -> Result<(), StorageError>;
}

/// Bundle of repository handles the services layer works against.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
    pub results: Arc<dyn ResultRepository>,
}

impl Storage {
    /// Build a `Storage` backed by in-memory repositories.
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        Self {
            progress: Arc::new(repo.clone()),
            results: Arc::new(repo),
        }
    }
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    progress: Arc<Mutex<Option<ProgressRecord>>>,
    result: Arc<Mutex<Option<AnswerSheet>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock<T>(slot: &Mutex<T>) -> Result<std::sync::MutexGuard<'_, T>, StorageError> {
        slot.lock()
            .map_err(|_| StorageError::Connection("poisoned lock".into()))
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn save_progress(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        *Self::lock(&self.progress)? = Some(record.clone());
        Ok(())
    }

    async fn load_progress(&self) -> Result<Option<ProgressRecord>, StorageError> {
        Ok(Self::lock(&self.progress)?.clone())
    }

    async fn clear_progress(&self) -> Result<(), StorageError> {
        *Self::lock(&self.progress)? = None;
        Ok(())
    }
}

#[async_trait]
impl ResultRepository for InMemoryRepository {
    async fn save_result(&self, answers: &AnswerSheet) -> Result<(), StorageError> {
        *Self::lock(&self.result)? = Some(answers.clone());
        Ok(())
    }

    async fn load_result(&self) -> Result<Option<AnswerSheet>, StorageError> {
        Ok(Self::lock(&self.result)?.clone())
    }

    async fn clear_result(&self) -> Result<(), StorageError> {
        *Self::lock(&self.result)? = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use talent_core::model::{OptionScore, QuestionId};

    fn sample_record() -> ProgressRecord {
        let mut answers = AnswerSheet::new();
        answers.record(QuestionId::new(1), OptionScore::FullMatch);
        answers.record(QuestionId::new(2), OptionScore::NoMatch);
        ProgressRecord {
            current_question_index: 2,
            answers,
        }
    }

    #[test]
    fn progress_record_wire_shape_is_stable() {
        let json = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(json["currentQuestionIndex"], serde_json::json!(2));
        assert_eq!(json["answers"]["1"], serde_json::json!(2.5));
        assert_eq!(json["answers"]["2"], serde_json::json!(0.0));
    }

    #[test]
    fn progress_record_roundtrips_through_json() {
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();
        let back: ProgressRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn progress_record_parses_the_legacy_layout() {
        let json = r#"{"currentQuestionIndex":5,"answers":{"3":1.5,"4":2}}"#;
        let record: ProgressRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.current_question_index, 5);
        assert_eq!(
            record.answers.score_for(QuestionId::new(3)),
            Some(OptionScore::PartialMatch)
        );
        assert_eq!(
            record.answers.score_for(QuestionId::new(4)),
            Some(OptionScore::StrongMatch)
        );
    }

    #[tokio::test]
    async fn in_memory_progress_roundtrip_and_clear() {
        let repo = InMemoryRepository::new();
        assert!(repo.load_progress().await.unwrap().is_none());

        let record = sample_record();
        repo.save_progress(&record).await.unwrap();
        assert_eq!(repo.load_progress().await.unwrap(), Some(record));

        repo.clear_progress().await.unwrap();
        assert!(repo.load_progress().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn in_memory_result_roundtrip_and_clear() {
        let repo = InMemoryRepository::new();
        assert!(repo.load_result().await.unwrap().is_none());

        let answers = sample_record().answers;
        repo.save_result(&answers).await.unwrap();
        assert_eq!(repo.load_result().await.unwrap(), Some(answers));

        repo.clear_result().await.unwrap();
        assert!(repo.load_result().await.unwrap().is_none());
    }
}
