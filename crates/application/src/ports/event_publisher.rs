use async_trait::async_trait;
use dnsbench_domain::{ErrorKind, ResponseCode, ServerSummary, TimingSource};
use serde::Serialize;

/// Wire shape for the resolvers/domains snapshot carried by `run_started` (§4.5).
#[derive(Debug, Clone, Serialize)]
pub struct RunStartedResolver {
    pub address: String,
    pub display_name: String,
}

/// C5 event kinds (§4.5). Serialized as `{"type": ..., "payload": ...}` at the wire
/// boundary (§6); this enum is the in-process representation shared by the
/// scheduler (producer) and the WebSocket relay (consumer).
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum BenchmarkEvent {
    RunStarted {
        run_id: String,
        total_probes: u32,
        resolvers: Vec<RunStartedResolver>,
        domains: Vec<String>,
    },
    ProbeResult {
        run_id: String,
        resolver_address: String,
        resolver_display_name: String,
        domain: String,
        success: bool,
        elapsed_ms: f64,
        timing_source: TimingSource,
        error_kind: Option<ErrorKind>,
        response_code: Option<ResponseCode>,
        resolved_ip: Option<String>,
        completed_count: u32,
        total_probes: u32,
    },
    /// Coalesced: emitted at most once per resolver per probe completion.
    ServerProgress {
        run_id: String,
        resolver_address: String,
        running_avg_ms: Option<f64>,
        successful: u32,
        total: u32,
        in_flight: bool,
    },
    RunComplete {
        run_id: String,
        duration_ms: f64,
        summaries: Vec<ServerSummary>,
    },
    RunCancelled {
        run_id: String,
    },
    RunError {
        run_id: String,
        message: String,
    },
}

impl BenchmarkEvent {
    pub fn run_id(&self) -> &str {
        match self {
            BenchmarkEvent::RunStarted { run_id, .. }
            | BenchmarkEvent::ProbeResult { run_id, .. }
            | BenchmarkEvent::ServerProgress { run_id, .. }
            | BenchmarkEvent::RunComplete { run_id, .. }
            | BenchmarkEvent::RunCancelled { run_id }
            | BenchmarkEvent::RunError { run_id, .. } => run_id,
        }
    }

    /// The event stream for a run terminates in exactly one of these (§8).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BenchmarkEvent::RunComplete { .. }
                | BenchmarkEvent::RunCancelled { .. }
                | BenchmarkEvent::RunError { .. }
        )
    }
}

/// A live subscription to one run's event stream. Dropping the handle unsubscribes.
#[async_trait]
pub trait EventSubscription: Send {
    /// Awaits the next event. Returns `None` once the terminal event has been
    /// delivered and the stream is exhausted, or if this subscriber fell behind and
    /// was disconnected (per §4.5, this never drops the terminal event itself).
    async fn recv(&mut self) -> Option<BenchmarkEvent>;
}

/// C5. Per-run pub/sub. Delivery is best-effort, at-most-once per subscriber, in
/// the publisher's emission order per `run_id`. A slow subscriber may miss
/// intermediate events but is always delivered the terminal one.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: BenchmarkEvent);

    async fn subscribe(&self, run_id: &str) -> Box<dyn EventSubscription>;
}
