use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::choice::OptionScore;
use crate::model::ids::QuestionId;
use crate::model::question::QuestionBank;

/// The answers a respondent has given so far, keyed by question id.
///
/// Built incrementally while the assessment runs; re-selecting an option
/// overwrites the previous entry. Serializes as a plain JSON object
/// (`{"1": 2.5, ...}`), which is also the persisted final-answers shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSheet {
    entries: BTreeMap<QuestionId, OptionScore>,
}

impl AnswerSheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records (or overwrites) the answer for a question.
    pub fn record(&mut self, id: QuestionId, score: OptionScore) {
        self.entries.insert(id, score);
    }

    /// The recorded score for a question, if any.
    #[must_use]
    pub fn score_for(&self, id: QuestionId) -> Option<OptionScore> {
        self.entries.get(&id).copied()
    }

    #[must_use]
    pub fn contains(&self, id: QuestionId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Number of answered questions.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True once every question in the bank has an entry.
    #[must_use]
    pub fn is_complete_for(&self, bank: &QuestionBank) -> bool {
        bank.questions().iter().all(|q| self.contains(q.id()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, OptionScore)> + '_ {
        self.entries.iter().map(|(id, score)| (*id, *score))
    }
}

impl FromIterator<(QuestionId, OptionScore)> for AnswerSheet {
    fn from_iter<I: IntoIterator<Item = (QuestionId, OptionScore)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
