use std::sync::Arc;

use dnsbench_domain::DomainError;

use crate::ports::RunRepository;
use crate::services::aggregator;

/// CLI `reaggregate` subcommand: re-derives `ServerSummary`/`FailureAnalysis` rows
/// from a run's stored probes and replaces them. Exercises the determinism
/// property in §8 directly against durable data, e.g. after an aggregator bugfix.
pub struct ReaggregateRunUseCase {
    repository: Arc<dyn RunRepository>,
}

impl ReaggregateRunUseCase {
    pub fn new(repository: Arc<dyn RunRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, run_id: &str) -> Result<(), DomainError> {
        let record = self.repository.get_run(run_id).await?;
        let (summaries, analyses) = aggregator::summarize(run_id, &record.probes);
        self.repository.persist_run(&record.run, &summaries, &record.probes, &analyses).await
    }
}
