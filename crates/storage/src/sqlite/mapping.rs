use talent_core::model::{OptionScore, QuestionId};

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn question_id_from_i64(v: i64) -> Result<QuestionId, StorageError> {
    u16::try_from(v)
        .map(QuestionId::new)
        .map_err(|_| StorageError::Serialization(format!("invalid question_id: {v}")))
}

pub(crate) fn question_id_to_i64(id: QuestionId) -> i64 {
    i64::from(id.value())
}

/// Converts a stored tenths weight back into an `OptionScore`.
///
/// This must stay consistent with `score_to_tenths`.
pub(crate) fn score_from_tenths(v: i64) -> Result<OptionScore, StorageError> {
    u32::try_from(v)
        .ok()
        .and_then(|tenths| OptionScore::ALL.into_iter().find(|s| s.tenths() == tenths))
        .ok_or_else(|| StorageError::Serialization(format!("invalid score_tenths: {v}")))
}

pub(crate) fn score_to_tenths(score: OptionScore) -> i64 {
    i64::from(score.tenths())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_tenths_roundtrip() {
        for score in OptionScore::ALL {
            assert_eq!(score_from_tenths(score_to_tenths(score)).unwrap(), score);
        }
    }

    #[test]
    fn rejects_off_scale_tenths() {
        for bad in [-1_i64, 5, 26, 1000] {
            assert!(score_from_tenths(bad).is_err());
        }
    }

    #[test]
    fn rejects_oversized_question_ids() {
        assert!(question_id_from_i64(i64::from(u16::MAX) + 1).is_err());
        assert!(question_id_from_i64(-3).is_err());
    }
}
