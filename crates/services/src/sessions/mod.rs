mod progress;
mod service;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::SessionProgress;
pub use service::QuizSession;
pub use view::{DimensionScoreItem, ResultsService, ResultsView, SUMMARY_GROUP_SIZE};
pub use workflow::{QuizFlowService, StepOutcome};
