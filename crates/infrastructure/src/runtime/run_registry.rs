use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use dnsbench_application::ports::{RunRegistry, RunSnapshot};
use dnsbench_domain::{DomainError, RunStatus};
use tokio_util::sync::CancellationToken;

struct TrackedRun {
    status: RunStatus,
    total_probes: u32,
    completed_count: u32,
    cancellation: CancellationToken,
    running_since: Option<Instant>,
    terminal_since: Option<Instant>,
    wallclock_exceeded: bool,
}

/// C4. In-memory registry of runs not yet evicted, guarded per-entry by
/// `DashMap`'s internal sharded locks — safe concurrent read plus single-writer
/// per run (§5 "shared resources" (b)).
#[derive(Default)]
pub struct InMemoryRunRegistry {
    runs: DashMap<String, TrackedRun>,
}

impl InMemoryRunRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RunRegistry for InMemoryRunRegistry {
    async fn create(&self, run_id: &str, total_probes: u32) -> CancellationToken {
        let token = CancellationToken::new();
        self.runs.insert(
            run_id.to_string(),
            TrackedRun {
                status: RunStatus::Pending,
                total_probes,
                completed_count: 0,
                cancellation: token.clone(),
                running_since: None,
                terminal_since: None,
                wallclock_exceeded: false,
            },
        );
        token
    }

    async fn transition(&self, run_id: &str, next: RunStatus) -> Result<(), DomainError> {
        let mut entry = self.runs.get_mut(run_id).ok_or_else(|| DomainError::RunNotFound(run_id.to_string()))?;
        if !entry.status.can_transition_to(next) {
            return Err(DomainError::InvalidStatusTransition { from: entry.status.as_str().into(), to: next.as_str().into() });
        }
        entry.status = next;
        if next == RunStatus::Running {
            entry.running_since = Some(Instant::now());
        }
        if next.is_terminal() {
            entry.terminal_since = Some(Instant::now());
        }
        Ok(())
    }

    async fn advance_progress(&self, run_id: &str) -> Result<u32, DomainError> {
        let mut entry = self.runs.get_mut(run_id).ok_or_else(|| DomainError::RunNotFound(run_id.to_string()))?;
        entry.completed_count += 1;
        Ok(entry.completed_count)
    }

    async fn cancel(&self, run_id: &str) -> Result<(), DomainError> {
        let entry = self.runs.get(run_id).ok_or_else(|| DomainError::RunNotFound(run_id.to_string()))?;
        entry.cancellation.cancel();
        Ok(())
    }

    async fn observe(&self, run_id: &str) -> Result<RunSnapshot, DomainError> {
        let entry = self.runs.get(run_id).ok_or_else(|| DomainError::RunNotFound(run_id.to_string()))?;
        Ok(RunSnapshot {
            run_id: run_id.to_string(),
            status: entry.status,
            completed_count: entry.completed_count,
            total_probes: entry.total_probes,
            wallclock_exceeded: entry.wallclock_exceeded,
        })
    }

    async fn evict_expired(&self, retention: Duration) {
        self.runs.retain(|_, run| match run.terminal_since {
            Some(since) => since.elapsed() < retention,
            None => true,
        });
    }

    async fn running_overdue(&self, cap: Duration) -> Vec<String> {
        self.runs
            .iter()
            .filter(|entry| entry.value().status == RunStatus::Running)
            .filter(|entry| entry.value().running_since.is_some_and(|since| since.elapsed() > cap))
            .map(|entry| entry.key().clone())
            .collect()
    }

    async fn mark_wallclock_exceeded(&self, run_id: &str) -> Result<(), DomainError> {
        let mut entry = self.runs.get_mut(run_id).ok_or_else(|| DomainError::RunNotFound(run_id.to_string()))?;
        entry.wallclock_exceeded = true;
        entry.cancellation.cancel();
        Ok(())
    }
}
