//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;
use talent_core::model::QuestionId;

/// Errors emitted by assessment sessions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("question {0} is not part of the assessment")]
    UnknownQuestion(QuestionId),

    #[error("assessment is already finalized")]
    Finalized,

    #[error("only {answered} of {total} questions answered; finish them all first")]
    Incomplete { answered: usize, total: usize },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ResultsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResultsError {
    #[error("no finalized answers found; complete the assessment first")]
    NoFinalAnswers,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
