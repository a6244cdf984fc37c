use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
pub enum OptionScoreError {
    #[error("invalid option score value: {0}")]
    InvalidValue(f64),
}

//
// ─── OPTION SCORE ─────────────────────────────────────────────────────────────
//

/// One of the five fixed response weights: 2.5, 2.0, 1.5, 1.0 or 0.
///
/// Backed by an integer number of tenths so dimension totals and rounding
/// stay exact; the `f64` form only appears at the persistence boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub enum OptionScore {
    /// The statement describes the respondent exactly (2.5).
    FullMatch,
    /// The statement describes the respondent well (2.0).
    StrongMatch,
    /// The statement partly describes the respondent (1.5).
    PartialMatch,
    /// The statement barely describes the respondent (1.0).
    WeakMatch,
    /// The statement does not describe the respondent at all (0).
    NoMatch,
}

impl OptionScore {
    /// All scores, strongest first, in the order options are presented.
    pub const ALL: [OptionScore; 5] = [
        OptionScore::FullMatch,
        OptionScore::StrongMatch,
        OptionScore::PartialMatch,
        OptionScore::WeakMatch,
        OptionScore::NoMatch,
    ];

    /// Weight in tenths of a point.
    #[must_use]
    pub const fn tenths(self) -> u32 {
        match self {
            OptionScore::FullMatch => 25,
            OptionScore::StrongMatch => 20,
            OptionScore::PartialMatch => 15,
            OptionScore::WeakMatch => 10,
            OptionScore::NoMatch => 0,
        }
    }

    /// Weight as the fractional point value used in the persisted form.
    #[must_use]
    pub fn value(self) -> f64 {
        f64::from(self.tenths()) / 10.0
    }

    /// The strongest weight in the set.
    #[must_use]
    pub const fn max() -> Self {
        OptionScore::FullMatch
    }

    /// Converts a numeric weight back into an `OptionScore`.
    ///
    /// # Errors
    ///
    /// Returns `OptionScoreError::InvalidValue` unless the number is exactly
    /// one of the five fixed weights.
    pub fn from_value(value: f64) -> Result<Self, OptionScoreError> {
        Self::ALL
            .into_iter()
            .find(|score| (score.value() - value).abs() < f64::EPSILON)
            .ok_or(OptionScoreError::InvalidValue(value))
    }
}

impl From<OptionScore> for f64 {
    fn from(score: OptionScore) -> Self {
        score.value()
    }
}

impl TryFrom<f64> for OptionScore {
    type Error = OptionScoreError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl fmt::Display for OptionScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

//
// ─── RESPONSE OPTIONS ─────────────────────────────────────────────────────────
//

/// A selectable response: display label plus its weight.
///
/// The same five options apply to every question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseOption {
    pub label: &'static str,
    pub score: OptionScore,
}

/// The fixed option set shared by all questions, strongest first.
pub const RESPONSE_OPTIONS: [ResponseOption; 5] = [
    ResponseOption {
        label: "Describes me exactly",
        score: OptionScore::FullMatch,
    },
    ResponseOption {
        label: "Describes me well",
        score: OptionScore::StrongMatch,
    },
    ResponseOption {
        label: "Partly describes me",
        score: OptionScore::PartialMatch,
    },
    ResponseOption {
        label: "Doesn't quite describe me",
        score: OptionScore::WeakMatch,
    },
    ResponseOption {
        label: "Doesn't describe me at all",
        score: OptionScore::NoMatch,
    },
];
