use std::sync::Arc;

use dnsbench_domain::DomainError;

use crate::ports::{RunRecord, RunRepository};

pub struct GetRunUseCase {
    repository: Arc<dyn RunRepository>,
}

impl GetRunUseCase {
    pub fn new(repository: Arc<dyn RunRepository>) -> Self {
        Self { repository }
    }

    /// `GET /results/{id}` (§4.8): full run including summaries and analyses.
    pub async fn execute(&self, run_id: &str) -> Result<RunRecord, DomainError> {
        self.repository.get_run(run_id).await
    }
}
