use std::sync::Arc;

use dnsbench_domain::{DomainError, ProbeResult};

use crate::ports::RunRepository;

pub struct GetRunDomainsUseCase {
    repository: Arc<dyn RunRepository>,
}

impl GetRunDomainsUseCase {
    pub fn new(repository: Arc<dyn RunRepository>) -> Self {
        Self { repository }
    }

    /// `GET /results/{id}/domains` (§4.8): every probe recorded for the run.
    pub async fn execute(&self, run_id: &str) -> Result<Vec<ProbeResult>, DomainError> {
        self.repository.get_probes(run_id).await
    }
}
