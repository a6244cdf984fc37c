use std::sync::Arc;

use storage::repository::{ProgressRepository, ResultRepository, StorageError};
use talent_core::model::{OptionScore, QuestionBank, QuestionId};

use crate::error::SessionError;
use crate::Clock;
use super::service::QuizSession;

/// Outcome of a forward navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Moved to the question at this index.
    Moved(usize),
    /// The session was on the last question and has been finalized.
    Finalized,
}

/// Orchestrates a session against durable storage.
///
/// Every mutation synchronizes to storage immediately; there is no batching
/// and nothing to flush, so an interrupted run resumes from the last action.
#[derive(Clone)]
pub struct QuizFlowService {
    clock: Clock,
    bank: Arc<QuestionBank>,
    progress: Arc<dyn ProgressRepository>,
    results: Arc<dyn ResultRepository>,
}

impl QuizFlowService {
    /// Build a flow service over the built-in question bank.
    #[must_use]
    pub fn new(
        clock: Clock,
        progress: Arc<dyn ProgressRepository>,
        results: Arc<dyn ResultRepository>,
    ) -> Self {
        Self {
            clock,
            bank: Arc::new(QuestionBank::builtin().clone()),
            progress,
            results,
        }
    }

    /// Replace the question bank (used by tests and custom assessments).
    #[must_use]
    pub fn with_bank(mut self, bank: Arc<QuestionBank>) -> Self {
        self.bank = bank;
        self
    }

    #[must_use]
    pub fn bank(&self) -> &Arc<QuestionBank> {
        &self.bank
    }

    /// Resume a persisted session, or start a fresh one.
    ///
    /// A missing record starts fresh. An unreadable record is logged and
    /// discarded, also starting fresh: losing progress beats refusing to
    /// run.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` for storage failures other than an
    /// unreadable record.
    pub async fn resume_or_start(&self) -> Result<QuizSession, SessionError> {
        let started_at = self.clock.now();
        match self.progress.load_progress().await {
            Ok(Some(record)) => Ok(QuizSession::from_progress(
                Arc::clone(&self.bank),
                record,
                started_at,
            )),
            Ok(None) => Ok(QuizSession::new(Arc::clone(&self.bank), started_at)),
            Err(StorageError::Serialization(err)) => {
                tracing::warn!(error = %err, "discarding unreadable progress record");
                Ok(QuizSession::new(Arc::clone(&self.bank), started_at))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Record an answer for any question and persist the session.
    ///
    /// # Errors
    ///
    /// Returns session validation errors, or `SessionError::Storage` if
    /// persistence fails.
    pub async fn record_answer(
        &self,
        session: &mut QuizSession,
        id: QuestionId,
        score: OptionScore,
    ) -> Result<(), SessionError> {
        session.record_answer(id, score)?;
        self.persist(session).await
    }

    /// Record an answer for the question the respondent is looking at.
    ///
    /// # Errors
    ///
    /// Returns session validation errors, or `SessionError::Storage` if
    /// persistence fails.
    pub async fn answer_current(
        &self,
        session: &mut QuizSession,
        score: OptionScore,
    ) -> Result<(), SessionError> {
        let id = session.current_question().id();
        self.record_answer(session, id, score).await
    }

    /// Move back one question and persist the new position.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if persistence fails.
    pub async fn retreat(&self, session: &mut QuizSession) -> Result<bool, SessionError> {
        let moved = session.retreat();
        if moved {
            self.persist(session).await?;
        }
        Ok(moved)
    }

    /// Move forward one question, or finalize from the last one.
    ///
    /// Finalization only happens with a complete sheet; an incomplete sheet
    /// is rejected without touching storage or the session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Incomplete` when finalization is premature,
    /// or `SessionError::Storage` if persistence fails.
    pub async fn next(&self, session: &mut QuizSession) -> Result<StepOutcome, SessionError> {
        if session.at_last() {
            self.finalize(session).await?;
            return Ok(StepOutcome::Finalized);
        }
        session.advance();
        self.persist(session).await?;
        Ok(StepOutcome::Moved(session.current_index()))
    }

    /// Write the final answers and clear the in-progress record.
    ///
    /// Finalizing an already finalized session is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Incomplete` if any question is unanswered,
    /// or `SessionError::Storage` if persistence fails.
    pub async fn finalize(&self, session: &mut QuizSession) -> Result<(), SessionError> {
        if session.is_finalized() {
            return Ok(());
        }

        let progress = session.progress();
        if !progress.is_complete {
            return Err(SessionError::Incomplete {
                answered: progress.answered,
                total: progress.total,
            });
        }

        self.results.save_result(session.answers()).await?;
        self.progress.clear_progress().await?;
        session.mark_finalized();
        Ok(())
    }

    /// Drop all persisted state and hand back a fresh session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if either record cannot be cleared.
    pub async fn restart(&self) -> Result<QuizSession, SessionError> {
        self.progress.clear_progress().await?;
        self.results.clear_result().await?;
        Ok(QuizSession::new(Arc::clone(&self.bank), self.clock.now()))
    }

    async fn persist(&self, session: &QuizSession) -> Result<(), SessionError> {
        self.progress
            .save_progress(&session.to_progress_record())
            .await?;
        Ok(())
    }
}
