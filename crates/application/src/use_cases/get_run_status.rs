use std::sync::Arc;

use dnsbench_domain::DomainError;

use crate::ports::{RunRegistry, RunSnapshot};

pub struct GetRunStatusUseCase {
    registry: Arc<dyn RunRegistry>,
}

impl GetRunStatusUseCase {
    pub fn new(registry: Arc<dyn RunRegistry>) -> Self {
        Self { registry }
    }

    /// `GET /benchmark/{id}/status` (§4.8): reads the in-memory registry, not the
    /// store, so it reflects progress for runs still in flight.
    pub async fn execute(&self, run_id: &str) -> Result<RunSnapshot, DomainError> {
        self.registry.observe(run_id).await
    }
}
