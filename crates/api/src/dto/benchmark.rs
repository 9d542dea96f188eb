use dnsbench_domain::{Resolver, RunKind, TestProfile};
use serde::{Deserialize, Serialize};

/// Body of `POST /benchmark/start` (§4.8). `kind` is parsed with
/// `RunKind::from_str`; the remaining fields are optional, per-field overrides of
/// the defaults that kind would otherwise imply.
#[derive(Debug, Deserialize)]
pub struct StartRunBody {
    pub kind: String,
    #[serde(default)]
    pub resolvers: Option<Vec<Resolver>>,
    #[serde(default)]
    pub domains: Option<Vec<String>>,
    #[serde(default)]
    pub profile_overrides: Option<TestProfile>,
}

#[derive(Debug, Serialize)]
pub struct StartRunResponse {
    pub run_id: String,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RunStatusResponse {
    pub status: &'static str,
    pub completed_count: u32,
    pub total_probes: u32,
}

#[derive(Debug, Serialize)]
pub struct CancelRunResponse {
    pub status: &'static str,
}
