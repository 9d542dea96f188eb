use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainCounts {
    pub quick: u32,
    pub full: u32,
    pub custom: u32,
}

impl Default for DomainCounts {
    fn default() -> Self {
        Self {
            quick: 15,
            full: 75,
            custom: 50,
        }
    }
}

/// §3: persisted and surfaced but not yet wired to probe behavior — the scheduler
/// and prober ignore these flags (Open Question in spec.md §9, resolved in
/// SPEC_FULL.md §8.1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryTypesSettings {
    pub cached: bool,
    pub uncached: bool,
    pub dotcom: bool,
}

impl Default for QueryTypesSettings {
    fn default() -> Self {
        Self {
            cached: true,
            uncached: true,
            dotcom: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceSettings {
    pub max_concurrent_servers: u32,
    pub query_timeout_ms: u32,
    pub max_retries: u32,
    pub inter_query_delay_ms: u32,
}

impl Default for PerformanceSettings {
    fn default() -> Self {
        Self {
            max_concurrent_servers: 4,
            query_timeout_ms: 3000,
            max_retries: 1,
            inter_query_delay_ms: 50,
        }
    }
}

impl PerformanceSettings {
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(1..=10).contains(&self.max_concurrent_servers) {
            return Err(DomainError::InvalidTestProfile {
                field: "max_concurrent_servers".into(),
                reason: "must be in 1..=10".into(),
            });
        }
        if !(1000..=10000).contains(&self.query_timeout_ms) {
            return Err(DomainError::InvalidTestProfile {
                field: "query_timeout_ms".into(),
                reason: "must be in 1000..=10000".into(),
            });
        }
        if self.max_retries > 5 {
            return Err(DomainError::InvalidTestProfile {
                field: "max_retries".into(),
                reason: "must be in 0..=5".into(),
            });
        }
        if self.inter_query_delay_ms > 1000 {
            return Err(DomainError::InvalidTestProfile {
                field: "inter_query_delay_ms".into(),
                reason: "must be in 0..=1000".into(),
            });
        }
        Ok(())
    }
}

/// §3: also persisted and surfaced without affecting scheduler behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSettings {
    pub detect_nxdomain_redirection: bool,
    pub detect_malware_blocking: bool,
    pub test_dnssec: bool,
    pub min_reliability_pct: u32,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            detect_nxdomain_redirection: true,
            detect_malware_blocking: false,
            test_dnssec: false,
            min_reliability_pct: 90,
        }
    }
}

impl AnalysisSettings {
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(50..=100).contains(&self.min_reliability_pct) {
            return Err(DomainError::InvalidTestProfile {
                field: "min_reliability_pct".into(),
                reason: "must be in 50..=100".into(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TestProfile {
    pub domain_counts: DomainCounts,
    pub query_types: QueryTypesSettings,
    pub performance: PerformanceSettings,
    pub analysis: AnalysisSettings,
}

impl TestProfile {
    pub fn validate(&self) -> Result<(), DomainError> {
        self.performance.validate()?;
        self.analysis.validate()?;
        Ok(())
    }
}
