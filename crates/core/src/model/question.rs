use once_cell::sync::Lazy;
use std::collections::BTreeSet;
use thiserror::Error;

use crate::model::dimension::{Dimension, DIMENSION_COUNT};
use crate::model::ids::QuestionId;

/// Number of questions backing each dimension score.
pub const QUESTIONS_PER_DIMENSION: usize = 4;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionBankError {
    #[error("question bank is empty")]
    Empty,

    #[error("duplicate question id: {0}")]
    DuplicateId(QuestionId),

    #[error("question {0} has empty text")]
    EmptyText(QuestionId),

    #[error("dimension {dimension} has {count} questions, expected {expected}")]
    DimensionCount {
        dimension: Dimension,
        count: usize,
        expected: usize,
    },
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// A single assessment statement tied to exactly one dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    dimension: Dimension,
}

impl Question {
    #[must_use]
    pub fn new(id: QuestionId, text: impl Into<String>, dimension: Dimension) -> Self {
        Self {
            id,
            text: text.into(),
            dimension,
        }
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }
}

//
// ─── QUESTION BANK ────────────────────────────────────────────────────────────
//

/// The immutable, validated set of questions an assessment runs over.
///
/// Question order is presentation order. The built-in bank deliberately
/// interleaves dimensions so respondents cannot spot the grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Validates and wraps a question list.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError` if the list is empty, an id repeats, a
    /// text is blank, or any dimension is not backed by exactly
    /// `QUESTIONS_PER_DIMENSION` questions.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionBankError> {
        if questions.is_empty() {
            return Err(QuestionBankError::Empty);
        }

        let mut seen = BTreeSet::new();
        let mut per_dimension = [0usize; DIMENSION_COUNT];
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(QuestionBankError::DuplicateId(question.id()));
            }
            if question.text().trim().is_empty() {
                return Err(QuestionBankError::EmptyText(question.id()));
            }
            per_dimension[question.dimension().ordinal()] += 1;
        }

        for dimension in Dimension::ALL {
            let count = per_dimension[dimension.ordinal()];
            if count != QUESTIONS_PER_DIMENSION {
                return Err(QuestionBankError::DimensionCount {
                    dimension,
                    count,
                    expected: QUESTIONS_PER_DIMENSION,
                });
            }
        }

        Ok(Self { questions })
    }

    /// The built-in 40-question bank.
    ///
    /// Validated once on first access; the table below is a process-wide
    /// constant, so a validation failure is a bug in the table itself.
    #[must_use]
    pub fn builtin() -> &'static Self {
        static BUILTIN: Lazy<QuestionBank> = Lazy::new(|| {
            QuestionBank::new(builtin_questions()).expect("built-in question bank is valid")
        });
        &BUILTIN
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// All questions in presentation order.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Question at a presentation position.
    #[must_use]
    pub fn by_index(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Looks a question up by id.
    #[must_use]
    pub fn get(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: QuestionId) -> bool {
        self.get(id).is_some()
    }

    /// Questions belonging to one dimension, in presentation order.
    pub fn questions_for(&self, dimension: Dimension) -> impl Iterator<Item = &Question> {
        self.questions
            .iter()
            .filter(move |q| q.dimension() == dimension)
    }
}

fn builtin_questions() -> Vec<Question> {
    use Dimension::{
        Aesthetic, BodilyKinesthetic, Creative, Interpersonal, Intrapersonal, Linguistic,
        LogicalMathematical, Musical, Naturalist, Spatial,
    };

    let table: [(u16, &str, Dimension); 40] = [
        (
            1,
            "When working on something, I like to add artistic touches that make it distinctive and beautiful",
            Aesthetic,
        ),
        (
            2,
            "Explaining or teaching something to others feels effortless to me",
            Linguistic,
        ),
        (
            3,
            "I handle tasks that need hand-eye coordination, like catching a ball or threading a needle, well",
            BodilyKinesthetic,
        ),
        (4, "I often come up with novel, original ideas", Creative),
        (
            5,
            "When listening to music, I can follow the beat easily",
            Musical,
        ),
        (
            6,
            "Faced with a complex problem, I am good at analyzing causes and finding a solution",
            LogicalMathematical,
        ),
        (
            7,
            "I pick up quickly on shifts in other people's moods",
            Interpersonal,
        ),
        (
            8,
            "I rarely get lost in unfamiliar places; my sense of direction is good",
            Spatial,
        ),
        (
            9,
            "I am sensitive to changes in the natural environment, like weather and seasons",
            Naturalist,
        ),
        (
            10,
            "I often reflect on my own behavior and thoughts",
            Intrapersonal,
        ),
        (
            11,
            "I enjoy reading all kinds of books and articles",
            Linguistic,
        ),
        (
            12,
            "I have a keen eye for color combinations and visual design",
            Aesthetic,
        ),
        (
            13,
            "I can perform a connected sequence of movements, like a dance step or a gymnastics routine, smoothly and accurately",
            BodilyKinesthetic,
        ),
        (
            14,
            "When a problem comes up, I look for inventive ways to solve it",
            Creative,
        ),
        (
            15,
            "I enjoy solving math problems and logic puzzles",
            LogicalMathematical,
        ),
        (
            16,
            "I can easily tell different instruments apart by their sound",
            Musical,
        ),
        (
            17,
            "When a team disagrees, I am good at reconciling the different views",
            Interpersonal,
        ),
        (
            18,
            "I can picture three-dimensional objects clearly in my mind",
            Spatial,
        ),
        (
            19,
            "I have a clear sense of my own strengths and weaknesses",
            Intrapersonal,
        ),
        (
            20,
            "I like observing animals and plants and learning their habits",
            Naturalist,
        ),
        (
            21,
            "I am good at putting my thoughts and feelings into words",
            Linguistic,
        ),
        (
            22,
            "I can readily judge the quality of a work of art",
            Aesthetic,
        ),
        (
            23,
            "I like trying new things rather than sticking to routine",
            Creative,
        ),
        (
            24,
            "I like using physical activity to unwind and express myself",
            BodilyKinesthetic,
        ),
        (
            25,
            "Charts, data, and statistics are easy for me to make sense of",
            LogicalMathematical,
        ),
        (
            26,
            "I enjoy humming tunes or playing an instrument",
            Musical,
        ),
        (
            27,
            "I find it easy to build rapport with people I have just met",
            Interpersonal,
        ),
        (
            28,
            "I am good at drawing, design, or arranging a space",
            Spatial,
        ),
        (
            29,
            "When my emotions run high, I can manage them fairly well",
            Intrapersonal,
        ),
        (
            30,
            "Being outdoors leaves me feeling especially relaxed and happy",
            Naturalist,
        ),
        (
            31,
            "In a discussion or debate, I can state my position clearly",
            Linguistic,
        ),
        (
            32,
            "I enjoy visiting museums, galleries, and other art venues",
            Aesthetic,
        ),
        (
            33,
            "My imagination is vivid, and my ideas often run far ahead of what is practical",
            Creative,
        ),
        (
            34,
            "Picking up a new sport comes fairly easily to me",
            BodilyKinesthetic,
        ),
        (
            35,
            "I habitually reason through the causes and effects behind things",
            LogicalMathematical,
        ),
        (
            36,
            "Certain melodies linger in my head for a long time",
            Musical,
        ),
        (
            37,
            "Friends often come to me for advice or to confide in me",
            Interpersonal,
        ),
        (
            38,
            "I read maps and floor plans quickly, grasping the spatial layout",
            Spatial,
        ),
        (
            39,
            "I enjoy solitude and draw energy and inspiration from it",
            Intrapersonal,
        ),
        (
            40,
            "I can easily recognize different kinds of plants and animals",
            Naturalist,
        ),
    ];

    table
        .into_iter()
        .map(|(id, text, dimension)| Question::new(QuestionId::new(id), text, dimension))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_bank_is_valid_and_complete() {
        let bank = QuestionBank::builtin();
        assert_eq!(bank.len(), DIMENSION_COUNT * QUESTIONS_PER_DIMENSION);
        for dimension in Dimension::ALL {
            assert_eq!(bank.questions_for(dimension).count(), QUESTIONS_PER_DIMENSION);
        }
    }

    #[test]
    fn builtin_ids_are_one_through_forty() {
        let bank = QuestionBank::builtin();
        for (i, question) in bank.questions().iter().enumerate() {
            assert_eq!(question.id(), QuestionId::new(u16::try_from(i + 1).unwrap()));
        }
    }

    #[test]
    fn lookup_by_id_and_index_agree() {
        let bank = QuestionBank::builtin();
        let by_index = bank.by_index(4).unwrap();
        let by_id = bank.get(by_index.id()).unwrap();
        assert_eq!(by_index, by_id);
        assert!(bank.contains(QuestionId::new(40)));
        assert!(!bank.contains(QuestionId::new(41)));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut questions = QuestionBank::builtin().questions().to_vec();
        let dup = questions[0].clone();
        questions[1] = Question::new(dup.id(), "duplicate", questions[1].dimension());
        let err = QuestionBank::new(questions).unwrap_err();
        assert!(matches!(err, QuestionBankError::DuplicateId(_)));
    }

    #[test]
    fn rejects_unbalanced_dimensions() {
        // Swap one question's dimension so two counts go off by one.
        let mut questions = QuestionBank::builtin().questions().to_vec();
        let first = &questions[0];
        questions[0] = Question::new(first.id(), first.text().to_owned(), Dimension::Linguistic);
        let err = QuestionBank::new(questions).unwrap_err();
        assert!(matches!(err, QuestionBankError::DimensionCount { .. }));
    }

    #[test]
    fn rejects_empty_bank_and_blank_text() {
        assert!(matches!(
            QuestionBank::new(Vec::new()),
            Err(QuestionBankError::Empty)
        ));

        let mut questions = QuestionBank::builtin().questions().to_vec();
        questions[3] = Question::new(questions[3].id(), "  ", questions[3].dimension());
        assert!(matches!(
            QuestionBank::new(questions),
            Err(QuestionBankError::EmptyText(_))
        ));
    }
}
