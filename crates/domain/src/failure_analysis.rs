use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePattern {
    ConsistentTimeout,
    ConsistentNxdomain,
    MixedErrors,
    ServerSpecific,
}

impl FailurePattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailurePattern::ConsistentTimeout => "consistent_timeout",
            FailurePattern::ConsistentNxdomain => "consistent_nxdomain",
            FailurePattern::MixedErrors => "mixed_errors",
            FailurePattern::ServerSpecific => "server_specific",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpstreamHint {
    LikelyUpstreamBlocked,
    LikelyLocalIssue,
    Unknown,
}

impl UpstreamHint {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpstreamHint::LikelyUpstreamBlocked => "likely_upstream_blocked",
            UpstreamHint::LikelyLocalIssue => "likely_local_issue",
            UpstreamHint::Unknown => "unknown",
        }
    }
}

/// One per (run, domain) where at least one probe failed (§3). Purely derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureAnalysis {
    pub run_id: String,
    pub domain: String,
    pub failed_on_all_resolvers: bool,
    pub failure_pattern: FailurePattern,
    pub upstream_hint: UpstreamHint,
}
