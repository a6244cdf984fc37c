mod answers;
mod choice;
mod dimension;
mod ids;
mod question;

pub use answers::AnswerSheet;
pub use choice::{OptionScore, OptionScoreError, ResponseOption, RESPONSE_OPTIONS};
pub use dimension::{Dimension, DimensionError, DIMENSION_COUNT};
pub use ids::QuestionId;
pub use question::{Question, QuestionBank, QuestionBankError, QUESTIONS_PER_DIMENSION};
