use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingPrecision {
    HighPrecision,
    Fallback,
    Mixed,
}

impl TimingPrecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimingPrecision::HighPrecision => "high_precision",
            TimingPrecision::Fallback => "fallback",
            TimingPrecision::Mixed => "mixed",
        }
    }
}

/// Per-(run, resolver) statistics, derived entirely from the run's `ProbeResult`s (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSummary {
    pub run_id: String,
    pub resolver_address: String,
    pub display_name: String,
    pub total: u32,
    pub successful: u32,
    pub failed: u32,
    pub success_rate_pct: f64,
    pub avg_ms: Option<f64>,
    pub min_ms: Option<f64>,
    pub max_ms: Option<f64>,
    pub median_ms: Option<f64>,
    pub timing_precision: TimingPrecision,
}
