use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

use storage::repository::ProgressRecord;
use talent_core::model::{AnswerSheet, OptionScore, Question, QuestionBank, QuestionId};

use crate::error::SessionError;
use super::progress::SessionProgress;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory state of one assessment run.
///
/// Holds the current question index and the answers recorded so far;
/// navigation is a bounded counter, answers are upserts keyed by question
/// id. Persistence lives a layer up in `QuizFlowService` so this type stays
/// independently testable.
///
/// Invariant: `current` always indexes a question in the bank.
pub struct QuizSession {
    bank: Arc<QuestionBank>,
    current: usize,
    answers: AnswerSheet,
    started_at: DateTime<Utc>,
    finalized: bool,
}

impl QuizSession {
    /// Create a fresh session over the given bank.
    ///
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic.
    #[must_use]
    pub fn new(bank: Arc<QuestionBank>, started_at: DateTime<Utc>) -> Self {
        Self {
            bank,
            current: 0,
            answers: AnswerSheet::new(),
            started_at,
            finalized: false,
        }
    }

    /// Rehydrate a session from a persisted progress record.
    ///
    /// A stored index past the end of the bank is clamped to the last
    /// question, and answers for ids the bank does not know are dropped.
    #[must_use]
    pub fn from_progress(
        bank: Arc<QuestionBank>,
        record: ProgressRecord,
        started_at: DateTime<Utc>,
    ) -> Self {
        let last = bank.len().saturating_sub(1);
        let current = record.current_question_index.min(last);
        let answers: AnswerSheet = record
            .answers
            .iter()
            .filter(|(id, _)| bank.contains(*id))
            .collect();

        Self {
            bank,
            current,
            answers,
            started_at,
            finalized: false,
        }
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The question the respondent is looking at.
    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.bank.questions()[self.current]
    }

    #[must_use]
    pub fn at_first(&self) -> bool {
        self.current == 0
    }

    #[must_use]
    pub fn at_last(&self) -> bool {
        self.current + 1 == self.bank.len()
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// True once every question has an answer.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.answers.is_complete_for(&self.bank)
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.bank.len();
        let answered = self.answers.answered_count();
        SessionProgress {
            current: self.current,
            total,
            answered,
            remaining: total.saturating_sub(answered),
            is_complete: self.is_complete(),
        }
    }

    /// Record (or overwrite) an answer.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finalized` after finalization and
    /// `SessionError::UnknownQuestion` for an id outside the bank. Score
    /// validity needs no check, the type admits only the five weights.
    pub fn record_answer(
        &mut self,
        id: QuestionId,
        score: OptionScore,
    ) -> Result<(), SessionError> {
        if self.finalized {
            return Err(SessionError::Finalized);
        }
        if !self.bank.contains(id) {
            return Err(SessionError::UnknownQuestion(id));
        }
        self.answers.record(id, score);
        Ok(())
    }

    /// Move forward one question. Returns false when already at the end.
    pub fn advance(&mut self) -> bool {
        if self.at_last() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Move back one question. Returns false when already at the start.
    pub fn retreat(&mut self) -> bool {
        if self.at_first() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Snapshot of the persistable state.
    #[must_use]
    pub fn to_progress_record(&self) -> ProgressRecord {
        ProgressRecord {
            current_question_index: self.current,
            answers: self.answers.clone(),
        }
    }

    pub(crate) fn mark_finalized(&mut self) {
        self.finalized = true;
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("current", &self.current)
            .field("answered", &self.answers.answered_count())
            .field("total", &self.bank.len())
            .field("started_at", &self.started_at)
            .field("finalized", &self.finalized)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use talent_core::time::fixed_now;

    fn builtin_session() -> QuizSession {
        QuizSession::new(Arc::new(QuestionBank::builtin().clone()), fixed_now())
    }

    #[test]
    fn navigation_clamps_at_both_ends() {
        let mut session = builtin_session();
        assert!(session.at_first());
        assert!(!session.retreat());
        assert_eq!(session.current_index(), 0);

        for _ in 0..session.bank().len() * 2 {
            session.advance();
        }
        assert!(session.at_last());
        assert_eq!(session.current_index(), session.bank().len() - 1);
        assert!(!session.advance());
    }

    #[test]
    fn recording_unknown_question_is_rejected() {
        let mut session = builtin_session();
        let err = session
            .record_answer(QuestionId::new(99), OptionScore::FullMatch)
            .unwrap_err();
        assert!(matches!(err, SessionError::UnknownQuestion(_)));
    }

    #[test]
    fn reanswering_overwrites() {
        let mut session = builtin_session();
        let id = session.current_question().id();
        session.record_answer(id, OptionScore::WeakMatch).unwrap();
        session.record_answer(id, OptionScore::FullMatch).unwrap();

        assert_eq!(session.answers().answered_count(), 1);
        assert_eq!(session.answers().score_for(id), Some(OptionScore::FullMatch));
    }

    #[test]
    fn completeness_requires_every_question() {
        let mut session = builtin_session();
        let ids: Vec<QuestionId> = session.bank().questions().iter().map(|q| q.id()).collect();
        for id in &ids[1..] {
            session.record_answer(*id, OptionScore::PartialMatch).unwrap();
        }
        assert!(!session.is_complete());
        assert_eq!(session.progress().remaining, 1);

        session.record_answer(ids[0], OptionScore::NoMatch).unwrap();
        assert!(session.is_complete());
        assert_eq!(session.progress().remaining, 0);
    }

    #[test]
    fn rehydration_restores_index_and_answers() {
        let mut session = builtin_session();
        let id = session.current_question().id();
        session.record_answer(id, OptionScore::StrongMatch).unwrap();
        session.advance();
        session.advance();

        let record = session.to_progress_record();
        let restored = QuizSession::from_progress(
            Arc::new(QuestionBank::builtin().clone()),
            record.clone(),
            fixed_now(),
        );

        assert_eq!(restored.current_index(), 2);
        assert_eq!(restored.to_progress_record(), record);
    }

    #[test]
    fn rehydration_clamps_stale_indexes_and_drops_foreign_answers() {
        let mut answers = AnswerSheet::new();
        answers.record(QuestionId::new(1), OptionScore::FullMatch);
        answers.record(QuestionId::new(200), OptionScore::FullMatch);
        let record = ProgressRecord {
            current_question_index: 500,
            answers,
        };

        let session = QuizSession::from_progress(
            Arc::new(QuestionBank::builtin().clone()),
            record,
            fixed_now(),
        );

        assert_eq!(session.current_index(), session.bank().len() - 1);
        assert_eq!(session.answers().answered_count(), 1);
        assert!(session.answers().contains(QuestionId::new(1)));
    }

    #[test]
    fn finalized_sessions_reject_new_answers() {
        let mut session = builtin_session();
        session.mark_finalized();
        let id = session.bank().questions()[0].id();
        assert!(matches!(
            session.record_answer(id, OptionScore::FullMatch),
            Err(SessionError::Finalized)
        ));
    }
}
