use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingSource {
    HighPrecision,
    Fallback,
}

impl TimingSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimingSource::HighPrecision => "high_precision",
            TimingSource::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseCode {
    NoError,
    Nxdomain,
    Servfail,
    Timeout,
    Refused,
    Other,
}

impl ResponseCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::Nxdomain => "NXDOMAIN",
            ResponseCode::Servfail => "SERVFAIL",
            ResponseCode::Timeout => "TIMEOUT",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::Other => "OTHER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    None,
    DnsTimeout,
    NoData,
    NxDomain,
    ServerFail,
    Refused,
    Network,
    Unknown,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::None => "none",
            ErrorKind::DnsTimeout => "DNS_TIMEOUT",
            ErrorKind::NoData => "NO_DATA",
            ErrorKind::NxDomain => "NX_DOMAIN",
            ErrorKind::ServerFail => "SERVER_FAIL",
            ErrorKind::Refused => "REFUSED",
            ErrorKind::Network => "NETWORK",
            ErrorKind::Unknown => "UNKNOWN",
        }
    }
}

/// One (run, resolver, domain) probe outcome, after retries (§3).
///
/// Invariant: `success == (error_kind == None && response_code == NoError &&
/// resolved_ip.is_some())`. Enforced by the constructors below, not by external
/// callers setting fields directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeResult {
    pub run_id: String,
    pub resolver_address: String,
    pub resolver_display_name: String,
    pub domain: String,
    pub success: bool,
    pub elapsed_ms: f64,
    pub timing_source: TimingSource,
    pub response_code: ResponseCode,
    pub error_kind: ErrorKind,
    pub resolved_ip: Option<String>,
    pub raw_summary: Option<String>,
    pub observed_at: DateTime<Utc>,
}

impl ProbeResult {
    pub fn success(
        run_id: impl Into<String>,
        resolver_address: impl Into<String>,
        resolver_display_name: impl Into<String>,
        domain: impl Into<String>,
        elapsed_ms: f64,
        timing_source: TimingSource,
        resolved_ip: String,
        raw_summary: Option<String>,
    ) -> Self {
        Self {
            run_id: run_id.into(),
            resolver_address: resolver_address.into(),
            resolver_display_name: resolver_display_name.into(),
            domain: domain.into(),
            success: true,
            elapsed_ms,
            timing_source,
            response_code: ResponseCode::NoError,
            error_kind: ErrorKind::None,
            resolved_ip: Some(resolved_ip),
            raw_summary,
            observed_at: Utc::now(),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn failure(
        run_id: impl Into<String>,
        resolver_address: impl Into<String>,
        resolver_display_name: impl Into<String>,
        domain: impl Into<String>,
        elapsed_ms: f64,
        timing_source: TimingSource,
        response_code: ResponseCode,
        error_kind: ErrorKind,
        raw_summary: Option<String>,
    ) -> Self {
        debug_assert_ne!(error_kind, ErrorKind::None, "failure() requires a real error_kind");
        Self {
            run_id: run_id.into(),
            resolver_address: resolver_address.into(),
            resolver_display_name: resolver_display_name.into(),
            domain: domain.into(),
            success: false,
            elapsed_ms,
            timing_source,
            response_code,
            error_kind,
            resolved_ip: None,
            raw_summary,
            observed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_invariant_holds() {
        let p = ProbeResult::success(
            "run1", "1.1.1.1", "Cloudflare", "example.com", 12.5,
            TimingSource::HighPrecision, "93.184.216.34".into(), None,
        );
        assert!(p.success);
        assert_eq!(p.error_kind, ErrorKind::None);
        assert_eq!(p.response_code, ResponseCode::NoError);
        assert!(p.resolved_ip.is_some());
    }

    #[test]
    fn failure_invariant_holds() {
        let p = ProbeResult::failure(
            "run1", "192.0.2.1", "Unreachable", "example.com", 1500.0,
            TimingSource::HighPrecision, ResponseCode::Timeout, ErrorKind::DnsTimeout, None,
        );
        assert!(!p.success);
        assert!(p.resolved_ip.is_none());
    }
}
