use std::sync::Arc;

use dnsbench_domain::DomainError;

use crate::ports::RunRegistry;

pub struct CancelRunUseCase {
    registry: Arc<dyn RunRegistry>,
}

impl CancelRunUseCase {
    pub fn new(registry: Arc<dyn RunRegistry>) -> Self {
        Self { registry }
    }

    /// §4.4/§4.2: sets the cancellation flag and transitions the run. In-flight
    /// probes are allowed to finish or time out; the scheduler persists whatever
    /// it has accumulated.
    pub async fn execute(&self, run_id: &str) -> Result<(), DomainError> {
        self.registry.cancel(run_id).await
    }
}
