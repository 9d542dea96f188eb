use dnsbench_application::ports::RunRecord;
use dnsbench_domain::{FailureAnalysis, ProbeResult, Run, ServerSummary};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RunListResponse {
    pub results: Vec<Run>,
    pub total: u64,
}

/// `GET /results/{id}` success shape (§4.8): "Run + summaries + analyses".
#[derive(Debug, Serialize)]
pub struct RunDetailResponse {
    #[serde(flatten)]
    pub run: Run,
    pub summaries: Vec<ServerSummary>,
    pub analyses: Vec<FailureAnalysis>,
}

impl From<RunRecord> for RunDetailResponse {
    fn from(record: RunRecord) -> Self {
        Self { run: record.run, summaries: record.summaries, analyses: record.analyses }
    }
}

#[derive(Debug, Serialize)]
pub struct ProbesResponse {
    pub probes: Vec<ProbeResult>,
}

#[derive(Debug, Serialize)]
pub struct FailuresResponse {
    pub analyses: Vec<FailureAnalysis>,
}
