use thiserror::Error;

use crate::model::{
    AnswerSheet, Dimension, OptionScore, QuestionBank, DIMENSION_COUNT, QUESTIONS_PER_DIMENSION,
};

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoringSettingsError {
    #[error("base offset must be >= 0")]
    InvalidBaseOffset,

    #[error("medium threshold must be <= high threshold")]
    InvalidThresholds,
}

//
// ─── SETTINGS ─────────────────────────────────────────────────────────────────
//

/// Scoring constants: the per-dimension base offset plus the two band
/// thresholds.
///
/// The defaults (offset 10, high at 17, medium at 14) are presentation
/// tuning carried over from the product, kept configurable rather than
/// buried in the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringSettings {
    base_offset: i32,
    high_threshold: i32,
    medium_threshold: i32,
}

impl ScoringSettings {
    /// Creates custom scoring settings.
    ///
    /// # Errors
    ///
    /// Returns `ScoringSettingsError` if the offset is negative or the
    /// thresholds are out of order.
    pub fn new(
        base_offset: i32,
        high_threshold: i32,
        medium_threshold: i32,
    ) -> Result<Self, ScoringSettingsError> {
        if base_offset < 0 {
            return Err(ScoringSettingsError::InvalidBaseOffset);
        }
        if medium_threshold > high_threshold {
            return Err(ScoringSettingsError::InvalidThresholds);
        }
        Ok(Self {
            base_offset,
            high_threshold,
            medium_threshold,
        })
    }

    #[must_use]
    pub fn base_offset(&self) -> i32 {
        self.base_offset
    }

    #[must_use]
    pub fn high_threshold(&self) -> i32 {
        self.high_threshold
    }

    #[must_use]
    pub fn medium_threshold(&self) -> i32 {
        self.medium_threshold
    }

    /// Lowest possible dimension score (nothing answered, or all zero).
    #[must_use]
    pub fn min_score(&self) -> i32 {
        self.base_offset
    }

    /// Highest possible dimension score (every answer at full weight).
    #[must_use]
    pub fn max_score(&self) -> i32 {
        let max_tenths = OptionScore::max().tenths() * QUESTIONS_PER_DIMENSION as u32;
        self.base_offset + round_half_up_tenths(max_tenths)
    }

    /// Places a dimension score into its band.
    #[must_use]
    pub fn classify(&self, score: i32) -> ScoreBand {
        if score >= self.high_threshold {
            ScoreBand::High
        } else if score >= self.medium_threshold {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        }
    }
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            base_offset: 10,
            high_threshold: 17,
            medium_threshold: 14,
        }
    }
}

//
// ─── SCORE BAND ───────────────────────────────────────────────────────────────
//

/// Qualitative band for a dimension score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    /// Display label for result reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ScoreBand::High => "Very strong",
            ScoreBand::Medium => "Somewhat strong",
            ScoreBand::Low => "Less strong",
        }
    }
}

//
// ─── DIMENSION SCORES ─────────────────────────────────────────────────────────
//

/// One aggregate score per dimension, in canonical dimension order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionScores([i32; DIMENSION_COUNT]);

impl DimensionScores {
    #[must_use]
    pub fn get(&self, dimension: Dimension) -> i32 {
        self.0[dimension.ordinal()]
    }

    /// Scores paired with their dimension, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, i32)> + '_ {
        Dimension::ALL.into_iter().map(|dim| (dim, self.get(dim)))
    }
}

/// Computes the aggregate score for every dimension.
///
/// Each dimension is the base offset plus the rounded sum of its questions'
/// answered weights. Unanswered questions count as zero: callers are
/// expected to enforce completeness before scoring, and an incomplete sheet
/// degrades to lower scores instead of failing.
///
/// Sums are carried in tenths and rounded half-up, so the result is exact.
#[must_use]
pub fn compute_scores(
    bank: &QuestionBank,
    answers: &AnswerSheet,
    settings: &ScoringSettings,
) -> DimensionScores {
    let mut tenths = [0u32; DIMENSION_COUNT];
    for question in bank.questions() {
        if let Some(score) = answers.score_for(question.id()) {
            tenths[question.dimension().ordinal()] += score.tenths();
        }
    }

    let mut scores = [0i32; DIMENSION_COUNT];
    for (slot, raw) in scores.iter_mut().zip(tenths) {
        *slot = settings.base_offset() + round_half_up_tenths(raw);
    }
    DimensionScores(scores)
}

fn round_half_up_tenths(tenths: u32) -> i32 {
    i32::try_from((tenths + 5) / 10).unwrap_or(i32::MAX)
}
