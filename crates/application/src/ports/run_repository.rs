use async_trait::async_trait;
use dnsbench_domain::{DomainError, FailureAnalysis, ProbeResult, Run, ServerSummary};

/// A fully assembled run, as read back from the store (§4.6).
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub run: Run,
    pub summaries: Vec<ServerSummary>,
    pub probes: Vec<ProbeResult>,
    pub analyses: Vec<FailureAnalysis>,
}

#[derive(Debug, Clone)]
pub struct RunListPage {
    pub runs: Vec<Run>,
    pub total: u64,
}

/// C6. Durable, single-writer-per-run store with relational access.
#[async_trait]
pub trait RunRepository: Send + Sync {
    /// Atomic: every row for the run becomes visible, or none does. Re-persisting
    /// an existing `run.id` is an idempotent replace.
    async fn persist_run(
        &self,
        run: &Run,
        summaries: &[ServerSummary],
        probes: &[ProbeResult],
        analyses: &[FailureAnalysis],
    ) -> Result<(), DomainError>;

    async fn get_run(&self, run_id: &str) -> Result<RunRecord, DomainError>;

    async fn list_runs(&self, limit: u32, offset: u32) -> Result<RunListPage, DomainError>;

    async fn get_probes(&self, run_id: &str) -> Result<Vec<ProbeResult>, DomainError>;

    async fn get_failures(&self, run_id: &str) -> Result<Vec<FailureAnalysis>, DomainError>;
}
