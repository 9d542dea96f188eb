use crate::{RunRegistryEvictionJob, WallclockGuardJob};
use std::sync::Arc;
use tracing::info;

pub struct JobRunner {
    wallclock_guard: Option<WallclockGuardJob>,
    run_registry_eviction: Option<RunRegistryEvictionJob>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self { wallclock_guard: None, run_registry_eviction: None }
    }

    pub fn with_wallclock_guard(mut self, job: WallclockGuardJob) -> Self {
        self.wallclock_guard = Some(job);
        self
    }

    pub fn with_run_registry_eviction(mut self, job: RunRegistryEvictionJob) -> Self {
        self.run_registry_eviction = Some(job);
        self
    }

    pub async fn start(self) {
        info!("starting background job runner");

        if let Some(job) = self.wallclock_guard {
            Arc::new(job).start().await;
        }

        if let Some(job) = self.run_registry_eviction {
            Arc::new(job).start().await;
        }

        info!("all background jobs started");
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
