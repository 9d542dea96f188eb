use std::sync::Arc;

use dnsbench_domain::DomainError;

use crate::ports::{RunListPage, RunRepository};

pub struct ListRunsUseCase {
    repository: Arc<dyn RunRepository>,
}

impl ListRunsUseCase {
    pub fn new(repository: Arc<dyn RunRepository>) -> Self {
        Self { repository }
    }

    /// `GET /results?limit&offset` (§4.8), ordered by `started_at desc`.
    pub async fn execute(&self, limit: u32, offset: u32) -> Result<RunListPage, DomainError> {
        self.repository.list_runs(limit, offset).await
    }
}
