use thiserror::Error;

use crate::model::{DimensionError, OptionScoreError, QuestionBankError};
use crate::scoring::ScoringSettingsError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Dimension(#[from] DimensionError),
    #[error(transparent)]
    OptionScore(#[from] OptionScoreError),
    #[error(transparent)]
    QuestionBank(#[from] QuestionBankError),
    #[error(transparent)]
    ScoringSettings(#[from] ScoringSettingsError),
}
