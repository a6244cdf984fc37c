#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod sessions;

pub use talent_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, ResultsError, SessionError};
pub use sessions::{
    DimensionScoreItem, QuizFlowService, QuizSession, ResultsService, ResultsView,
    SessionProgress, StepOutcome,
};
