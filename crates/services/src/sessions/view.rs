use std::sync::Arc;

use storage::repository::ResultRepository;
use talent_core::model::{AnswerSheet, Dimension, QuestionBank};
use talent_core::radar::{chart_points, percentage, RadarPoint};
use talent_core::scoring::{compute_scores, ScoreBand, ScoringSettings};
use talent_core::summary::{bottom_n, rank, summary_text, top_n, RankedScore};

use crate::error::ResultsError;

/// How many dimensions the summary sentence names on each side.
pub const SUMMARY_GROUP_SIZE: usize = 3;

/// Presentation-agnostic result line for one dimension.
///
/// This is intentionally **not** a UI view-model: no pre-formatted strings
/// beyond the fixed names, no layout assumptions. The caller decides how to
/// draw the bar that `percentage` describes.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionScoreItem {
    pub dimension: Dimension,
    pub code: char,
    pub name: &'static str,
    pub full_name: &'static str,
    pub score: i32,
    pub band: ScoreBand,
    pub percentage: f64,
}

/// Everything the results screen needs, derived from a finalized sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    /// One item per dimension, in canonical `A`..`J` order.
    pub items: Vec<DimensionScoreItem>,
    /// All dimensions ordered strongest first.
    pub ranked: Vec<RankedScore>,
    /// The leading `SUMMARY_GROUP_SIZE` of `ranked`.
    pub strongest: Vec<RankedScore>,
    /// The trailing `SUMMARY_GROUP_SIZE` of `ranked`, weakest last.
    pub weakest: Vec<RankedScore>,
    /// The one-sentence verdict.
    pub summary: String,
    /// Radar polygon vertices, one per dimension in canonical order.
    pub radar: Vec<RadarPoint>,
}

/// Builds result views from the finalized answer record.
#[derive(Clone)]
pub struct ResultsService {
    results: Arc<dyn ResultRepository>,
    bank: Arc<QuestionBank>,
    settings: ScoringSettings,
}

impl ResultsService {
    /// Build a results service over the built-in bank and default scoring
    /// constants.
    #[must_use]
    pub fn new(results: Arc<dyn ResultRepository>) -> Self {
        Self {
            results,
            bank: Arc::new(QuestionBank::builtin().clone()),
            settings: ScoringSettings::default(),
        }
    }

    /// Replace the question bank (used by tests and custom assessments).
    #[must_use]
    pub fn with_bank(mut self, bank: Arc<QuestionBank>) -> Self {
        self.bank = bank;
        self
    }

    /// Override the scoring constants.
    #[must_use]
    pub fn with_settings(mut self, settings: ScoringSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &ScoringSettings {
        &self.settings
    }

    /// Load the finalized answers and derive the results view.
    ///
    /// # Errors
    ///
    /// Returns `ResultsError::NoFinalAnswers` when the assessment has not
    /// been completed (the caller should route back to the start), or
    /// `ResultsError::Storage` for storage failures.
    pub async fn load_results(&self) -> Result<ResultsView, ResultsError> {
        let answers = self
            .results
            .load_result()
            .await?
            .ok_or(ResultsError::NoFinalAnswers)?;
        Ok(self.build_view(&answers))
    }

    /// Derive the results view from an answer sheet.
    ///
    /// Pure: an incomplete sheet degrades to lower scores, as the scorer
    /// documents, instead of failing.
    #[must_use]
    pub fn build_view(&self, answers: &AnswerSheet) -> ResultsView {
        let scores = compute_scores(&self.bank, answers, &self.settings);
        let ranked = rank(&scores);
        let strongest = top_n(&ranked, SUMMARY_GROUP_SIZE).to_vec();
        let weakest = bottom_n(&ranked, SUMMARY_GROUP_SIZE).to_vec();
        let summary = summary_text(&strongest, &weakest);
        let radar = chart_points(&scores, &self.settings);

        let items = scores
            .iter()
            .map(|(dimension, score)| DimensionScoreItem {
                dimension,
                code: dimension.code(),
                name: dimension.name(),
                full_name: dimension.full_name(),
                score,
                band: self.settings.classify(score),
                percentage: percentage(score, &self.settings),
            })
            .collect();

        ResultsView {
            items,
            ranked,
            strongest,
            weakest,
            summary,
            radar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::{InMemoryRepository, ResultRepository};
    use talent_core::model::OptionScore;

    fn service() -> ResultsService {
        ResultsService::new(Arc::new(InMemoryRepository::new()))
    }

    fn uniform_sheet(score: OptionScore) -> AnswerSheet {
        QuestionBank::builtin()
            .questions()
            .iter()
            .map(|q| (q.id(), score))
            .collect()
    }

    #[test]
    fn view_covers_every_dimension_in_order() {
        let view = service().build_view(&uniform_sheet(OptionScore::StrongMatch));

        assert_eq!(view.items.len(), 10);
        let codes: Vec<char> = view.items.iter().map(|item| item.code).collect();
        assert_eq!(codes, vec!['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J']);
        assert_eq!(view.radar.len(), 10);
        assert_eq!(view.strongest.len(), SUMMARY_GROUP_SIZE);
        assert_eq!(view.weakest.len(), SUMMARY_GROUP_SIZE);
        assert!(!view.summary.is_empty());
    }

    #[test]
    fn uniform_strong_sheet_scores_and_bands() {
        // 2.0 * 4 = 8 raw, 18 with the offset: every dimension lands High.
        let view = service().build_view(&uniform_sheet(OptionScore::StrongMatch));
        for item in &view.items {
            assert_eq!(item.score, 18);
            assert_eq!(item.band, ScoreBand::High);
            assert!((item.percentage - 80.0).abs() < 1e-12);
        }
    }

    #[test]
    fn bands_split_across_a_mixed_sheet() {
        let bank = QuestionBank::builtin();
        // Musical answers max out, Spatial answers bottom out, the rest sit
        // in the middle of the scale.
        let sheet: AnswerSheet = bank
            .questions()
            .iter()
            .map(|q| {
                let score = match q.dimension() {
                    Dimension::Musical => OptionScore::FullMatch,
                    Dimension::Spatial => OptionScore::NoMatch,
                    _ => OptionScore::PartialMatch,
                };
                (q.id(), score)
            })
            .collect();

        let view = service().build_view(&sheet);
        let by_dim = |d: Dimension| {
            view.items
                .iter()
                .find(|item| item.dimension == d)
                .unwrap()
                .clone()
        };

        assert_eq!(by_dim(Dimension::Musical).score, 20);
        assert_eq!(by_dim(Dimension::Musical).band, ScoreBand::High);
        assert_eq!(by_dim(Dimension::Spatial).score, 10);
        assert_eq!(by_dim(Dimension::Spatial).band, ScoreBand::Low);
        assert_eq!(by_dim(Dimension::Linguistic).score, 16);
        assert_eq!(by_dim(Dimension::Linguistic).band, ScoreBand::Medium);

        assert_eq!(view.ranked[0].dimension, Dimension::Musical);
        assert_eq!(view.ranked.last().unwrap().dimension, Dimension::Spatial);
        assert_eq!(view.weakest.last().unwrap().dimension, Dimension::Spatial);
    }

    #[tokio::test]
    async fn load_results_requires_a_finalized_record() {
        let repo = Arc::new(InMemoryRepository::new());
        let service = ResultsService::new(Arc::clone(&repo) as Arc<dyn ResultRepository>);

        let err = service.load_results().await.unwrap_err();
        assert!(matches!(err, ResultsError::NoFinalAnswers));

        repo.save_result(&uniform_sheet(OptionScore::FullMatch))
            .await
            .unwrap();
        let view = service.load_results().await.unwrap();
        assert!(view.items.iter().all(|item| item.score == 20));
    }
}
