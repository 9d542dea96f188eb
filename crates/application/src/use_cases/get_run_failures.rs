use std::sync::Arc;

use dnsbench_domain::{DomainError, FailureAnalysis};

use crate::ports::RunRepository;

pub struct GetRunFailuresUseCase {
    repository: Arc<dyn RunRepository>,
}

impl GetRunFailuresUseCase {
    pub fn new(repository: Arc<dyn RunRepository>) -> Self {
        Self { repository }
    }

    /// `GET /results/{id}/failures` (§4.8).
    pub async fn execute(&self, run_id: &str) -> Result<Vec<FailureAnalysis>, DomainError> {
        self.repository.get_failures(run_id).await
    }
}
