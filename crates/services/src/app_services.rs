use std::sync::Arc;

use storage::repository::Storage;

use crate::error::AppServicesError;
use crate::sessions::{QuizFlowService, ResultsService};
use crate::Clock;

/// Assembles the app-facing services over one storage namespace.
#[derive(Clone)]
pub struct AppServices {
    quiz_flow: Arc<QuizFlowService>,
    results: Arc<ResultsService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock))
    }

    /// Build services over already constructed repositories.
    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock) -> Self {
        let quiz_flow = Arc::new(QuizFlowService::new(
            clock,
            Arc::clone(&storage.progress),
            Arc::clone(&storage.results),
        ));
        let results = Arc::new(ResultsService::new(Arc::clone(&storage.results)));
        Self { quiz_flow, results }
    }

    #[must_use]
    pub fn quiz_flow(&self) -> Arc<QuizFlowService> {
        Arc::clone(&self.quiz_flow)
    }

    #[must_use]
    pub fn results(&self) -> Arc<ResultsService> {
        Arc::clone(&self.results)
    }
}
