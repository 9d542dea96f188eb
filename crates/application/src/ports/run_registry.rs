use async_trait::async_trait;
use dnsbench_domain::{DomainError, RunStatus};
use tokio_util::sync::CancellationToken;

/// A point-in-time view of a tracked run (§4.4 `observe`).
#[derive(Debug, Clone)]
pub struct RunSnapshot {
    pub run_id: String,
    pub status: RunStatus,
    pub completed_count: u32,
    pub total_probes: u32,
    /// Set by `mark_wallclock_exceeded` (§5); distinguishes an operator-initiated
    /// `cancel` from the engine's own safety-cap trip once the scheduler observes
    /// the cancellation token firing.
    pub wallclock_exceeded: bool,
}

/// C4. Tracks runs that are not yet terminal: lifecycle, progress counters, and
/// cooperative cancellation. Terminal runs are evicted from the registry after a
/// retention window (§4.4) — their durable form is C6, not this registry.
#[async_trait]
pub trait RunRegistry: Send + Sync {
    /// Registers a new run as `pending` and hands back a cancellation token the
    /// scheduler must honor for the run's lifetime.
    async fn create(&self, run_id: &str, total_probes: u32) -> CancellationToken;

    async fn transition(&self, run_id: &str, next: RunStatus) -> Result<(), DomainError>;

    /// Advances the progress counter; returns the new `completed_count`.
    async fn advance_progress(&self, run_id: &str) -> Result<u32, DomainError>;

    /// Signals cancellation and transitions the run toward termination. Does not
    /// wait for in-flight probes to stop.
    async fn cancel(&self, run_id: &str) -> Result<(), DomainError>;

    async fn observe(&self, run_id: &str) -> Result<RunSnapshot, DomainError>;

    /// Drops registry bookkeeping for a run that has reached a terminal status and
    /// aged past the retention window. A no-op for runs already evicted.
    async fn evict_expired(&self, retention: std::time::Duration);

    /// Run ids currently `running` whose time since entering that status exceeds
    /// `cap` (§5 wall-clock safety cap, independent of any per-probe timeout).
    async fn running_overdue(&self, cap: std::time::Duration) -> Vec<String>;

    /// Cancels the run and flags it as wallclock-exceeded so the scheduler
    /// finishes it as `failed` with reason `run_wallclock_exceeded` rather than
    /// `cancelled` (§5, §7 fatal engine errors).
    async fn mark_wallclock_exceeded(&self, run_id: &str) -> Result<(), DomainError>;
}
