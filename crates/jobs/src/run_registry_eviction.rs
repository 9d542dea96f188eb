use std::sync::Arc;
use std::time::Duration;

use dnsbench_application::ports::RunRegistry;
use tracing::info;

/// Periodic sweep that drops terminal runs from the in-memory registry once
/// they age past the retention window (§4.4). The durable record stays in the
/// result store; this only trims bookkeeping that is no longer needed for
/// progress/cancellation.
pub struct RunRegistryEvictionJob {
    registry: Arc<dyn RunRegistry>,
    retention_secs: u64,
    interval_secs: u64,
}

impl RunRegistryEvictionJob {
    pub fn new(registry: Arc<dyn RunRegistry>, retention_secs: u64) -> Self {
        Self { registry, retention_secs, interval_secs: 60 }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(retention_secs = self.retention_secs, "starting run registry eviction job");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            loop {
                interval.tick().await;
                self.registry.evict_expired(Duration::from_secs(self.retention_secs)).await;
            }
        });
    }
}
