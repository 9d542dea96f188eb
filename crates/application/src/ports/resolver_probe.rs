use async_trait::async_trait;
use dnsbench_domain::{ProbeResult, Resolver};

/// C1. One A-record lookup against one server with a deadline.
///
/// Implementations must construct a resolver handle scoped to exactly `resolver`
/// for the duration of the call — never mutate a process-wide resolver's server
/// list. Concurrent calls to `probe` must not share mutable per-query state.
#[async_trait]
pub trait ResolverProbe: Send + Sync {
    /// Issues exactly one attempt. Never returns `Err`: every outcome, including a
    /// timeout or network failure, is reported as a `ProbeResult` with `success =
    /// false` and the matching `error_kind` — probe-level failure is data, not an
    /// engine error.
    async fn probe(&self, run_id: &str, resolver: &Resolver, domain: &str, timeout_ms: u32) -> ProbeResult;
}
