use std::sync::Arc;
use std::time::Duration;

use dnsbench_application::ports::RunRegistry;
use tracing::{info, warn};

/// Periodic safety-cap sweep (§5): any run still `running` past
/// `wallclock_cap_secs` is force-failed with reason `run_wallclock_exceeded`,
/// independent of each probe's own `query_timeout_ms`.
pub struct WallclockGuardJob {
    registry: Arc<dyn RunRegistry>,
    wallclock_cap_secs: u64,
    interval_secs: u64,
}

impl WallclockGuardJob {
    pub fn new(registry: Arc<dyn RunRegistry>, wallclock_cap_secs: u64) -> Self {
        Self { registry, wallclock_cap_secs, interval_secs: 30 }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(wallclock_cap_secs = self.wallclock_cap_secs, "starting wallclock guard job");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            loop {
                interval.tick().await;
                self.sweep_once().await;
            }
        });
    }

    async fn sweep_once(&self) {
        let cap = Duration::from_secs(self.wallclock_cap_secs);
        for run_id in self.registry.running_overdue(cap).await {
            match self.registry.mark_wallclock_exceeded(&run_id).await {
                Ok(()) => warn!(run_id = %run_id, cap_secs = self.wallclock_cap_secs, "run exceeded wallclock cap, forcing failure"),
                Err(err) => warn!(run_id = %run_id, error = %err, "failed to mark run as wallclock-exceeded"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use dnsbench_application::ports::RunSnapshot;
    use dnsbench_domain::{DomainError, RunStatus};
    use tokio::sync::Mutex;
    use tokio_util::sync::CancellationToken;

    #[derive(Default)]
    struct StubRegistry {
        overdue: Mutex<Vec<String>>,
        marked: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl RunRegistry for StubRegistry {
        async fn create(&self, _run_id: &str, _total_probes: u32) -> CancellationToken {
            CancellationToken::new()
        }

        async fn transition(&self, _run_id: &str, _next: RunStatus) -> Result<(), DomainError> {
            Ok(())
        }

        async fn advance_progress(&self, _run_id: &str) -> Result<u32, DomainError> {
            Ok(0)
        }

        async fn cancel(&self, _run_id: &str) -> Result<(), DomainError> {
            Ok(())
        }

        async fn observe(&self, run_id: &str) -> Result<RunSnapshot, DomainError> {
            Ok(RunSnapshot { run_id: run_id.to_string(), status: RunStatus::Running, completed_count: 0, total_probes: 1, wallclock_exceeded: false })
        }

        async fn evict_expired(&self, _retention: Duration) {}

        async fn running_overdue(&self, _cap: Duration) -> Vec<String> {
            self.overdue.lock().await.clone()
        }

        async fn mark_wallclock_exceeded(&self, run_id: &str) -> Result<(), DomainError> {
            self.marked.lock().await.push(run_id.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn sweep_marks_every_overdue_run() {
        let registry = Arc::new(StubRegistry { overdue: Mutex::new(vec!["run1".into(), "run2".into()]), marked: Mutex::new(Vec::new()) });
        let job = WallclockGuardJob::new(registry.clone(), 600);
        job.sweep_once().await;
        assert_eq!(*registry.marked.lock().await, vec!["run1".to_string(), "run2".to_string()]);
    }
}
