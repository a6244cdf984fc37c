use crate::model::Dimension;
use crate::scoring::DimensionScores;

/// A dimension paired with its score, as ordered by [`rank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedScore {
    pub dimension: Dimension,
    pub score: i32,
}

/// Orders all dimensions by score, descending.
///
/// The sort is stable over the canonical dimension order, so equal scores
/// keep their `A`..`J` order and the ranking is deterministic regardless of
/// how the input was assembled.
#[must_use]
pub fn rank(scores: &DimensionScores) -> Vec<RankedScore> {
    let mut ranked: Vec<RankedScore> = scores
        .iter()
        .map(|(dimension, score)| RankedScore { dimension, score })
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// The strongest `n` entries of a ranking.
#[must_use]
pub fn top_n(ranked: &[RankedScore], n: usize) -> &[RankedScore] {
    &ranked[..n.min(ranked.len())]
}

/// The weakest `n` entries of a ranking, still in ranked order
/// (so the overall weakest dimension comes last).
#[must_use]
pub fn bottom_n(ranked: &[RankedScore], n: usize) -> &[RankedScore] {
    &ranked[ranked.len() - n.min(ranked.len())..]
}

/// Builds the one-sentence result summary.
#[must_use]
pub fn summary_text(top: &[RankedScore], bottom: &[RankedScore]) -> String {
    format!(
        "You are strongest in {}, while {} are comparatively weaker.",
        join_full_names(top),
        join_full_names(bottom)
    )
}

fn join_full_names(entries: &[RankedScore]) -> String {
    let names: Vec<&str> = entries
        .iter()
        .map(|entry| entry.dimension.full_name())
        .collect();
    match names.as_slice() {
        [] => String::new(),
        [only] => (*only).to_string(),
        [rest @ .., last] => format!("{} and {}", rest.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnswerSheet, OptionScore, QuestionBank};
    use crate::scoring::{compute_scores, ScoringSettings};

    fn scores_from(per_dimension: [OptionScore; 10]) -> DimensionScores {
        let bank = QuestionBank::builtin();
        let sheet: AnswerSheet = bank
            .questions()
            .iter()
            .map(|q| (q.id(), per_dimension[q.dimension().ordinal()]))
            .collect();
        compute_scores(bank, &sheet, &ScoringSettings::default())
    }

    #[test]
    fn ranking_is_descending_and_idempotent() {
        let scores = scores_from([
            OptionScore::NoMatch,
            OptionScore::FullMatch,
            OptionScore::PartialMatch,
            OptionScore::StrongMatch,
            OptionScore::WeakMatch,
            OptionScore::FullMatch,
            OptionScore::NoMatch,
            OptionScore::PartialMatch,
            OptionScore::StrongMatch,
            OptionScore::WeakMatch,
        ]);

        let first = rank(&scores);
        let second = rank(&scores);
        assert_eq!(first, second);
        assert!(first.windows(2).all(|pair| pair[0].score >= pair[1].score));
    }

    #[test]
    fn ties_keep_canonical_order() {
        let scores = scores_from([OptionScore::PartialMatch; 10]);
        let ranked = rank(&scores);
        let order: Vec<Dimension> = ranked.iter().map(|entry| entry.dimension).collect();
        assert_eq!(order, Dimension::ALL.to_vec());
    }

    #[test]
    fn top_and_bottom_are_disjoint_for_ten_dimensions() {
        let scores = scores_from([
            OptionScore::FullMatch,
            OptionScore::StrongMatch,
            OptionScore::PartialMatch,
            OptionScore::WeakMatch,
            OptionScore::NoMatch,
            OptionScore::FullMatch,
            OptionScore::StrongMatch,
            OptionScore::PartialMatch,
            OptionScore::WeakMatch,
            OptionScore::NoMatch,
        ]);
        let ranked = rank(&scores);
        let top = top_n(&ranked, 3);
        let bottom = bottom_n(&ranked, 3);

        assert_eq!(top.len(), 3);
        assert_eq!(bottom.len(), 3);
        for t in top {
            assert!(bottom.iter().all(|b| b.dimension != t.dimension));
        }
    }

    #[test]
    fn bottom_slice_keeps_ranked_order() {
        let scores = scores_from([
            OptionScore::FullMatch,
            OptionScore::FullMatch,
            OptionScore::FullMatch,
            OptionScore::FullMatch,
            OptionScore::FullMatch,
            OptionScore::FullMatch,
            OptionScore::FullMatch,
            OptionScore::PartialMatch,
            OptionScore::WeakMatch,
            OptionScore::NoMatch,
        ]);
        let ranked = rank(&scores);
        let bottom = bottom_n(&ranked, 3);
        assert_eq!(bottom[0].dimension, Dimension::Naturalist);
        assert_eq!(bottom[1].dimension, Dimension::Creative);
        assert_eq!(bottom[2].dimension, Dimension::Aesthetic);
        assert!(bottom[0].score >= bottom[1].score && bottom[1].score >= bottom[2].score);
    }

    #[test]
    fn summary_sentence_names_both_groups() {
        let scores = scores_from([
            OptionScore::FullMatch,
            OptionScore::FullMatch,
            OptionScore::FullMatch,
            OptionScore::StrongMatch,
            OptionScore::StrongMatch,
            OptionScore::StrongMatch,
            OptionScore::PartialMatch,
            OptionScore::NoMatch,
            OptionScore::NoMatch,
            OptionScore::NoMatch,
        ]);
        let ranked = rank(&scores);
        let text = summary_text(top_n(&ranked, 3), bottom_n(&ranked, 3));

        assert_eq!(
            text,
            "You are strongest in Linguistic talent, Logical-mathematical talent and \
             Spatial talent, while Naturalist talent, Creative talent and Aesthetic talent \
             are comparatively weaker."
        );
    }
}
