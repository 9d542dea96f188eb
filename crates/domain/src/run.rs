use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain_list::RunKind;
use crate::errors::DomainError;
use crate::resolver::Resolver;
use crate::test_profile::TestProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Pending,
    Running,
    Completed,
    Cancelled,
    Failed,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Pending => "pending",
            RunStatus::Running => "running",
            RunStatus::Completed => "completed",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunStatus::Completed | RunStatus::Cancelled | RunStatus::Failed
        )
    }

    /// Allowed edges per spec.md §4.4.
    pub fn can_transition_to(&self, next: RunStatus) -> bool {
        matches!(
            (self, next),
            (RunStatus::Pending, RunStatus::Running)
                | (RunStatus::Pending, RunStatus::Cancelled)
                | (RunStatus::Pending, RunStatus::Failed)
                | (RunStatus::Running, RunStatus::Completed)
                | (RunStatus::Running, RunStatus::Cancelled)
                | (RunStatus::Running, RunStatus::Failed)
        )
    }
}

/// A batch of probes over a chosen (resolvers × domains) matrix, executed under one
/// `TestProfile` (§3). Runs are immutable once terminal; resolver/domain snapshots are
/// taken at start so later configuration edits never mutate historical runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    pub id: String,
    pub kind: RunKind,
    pub status: RunStatus,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub resolvers: Vec<Resolver>,
    pub domains: Vec<String>,
    pub profile: TestProfile,
}

impl Run {
    pub fn new(id: String, kind: RunKind, resolvers: Vec<Resolver>, domains: Vec<String>, profile: TestProfile) -> Self {
        Self {
            id,
            kind,
            status: RunStatus::Pending,
            started_at: Utc::now(),
            completed_at: None,
            resolvers,
            domains,
            profile,
        }
    }

    pub fn total_probes(&self) -> usize {
        self.resolvers.len() * self.domains.len()
    }

    pub fn transition(&mut self, next: RunStatus) -> Result<(), DomainError> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::InvalidStatusTransition {
                from: self.status.as_str().into(),
                to: next.as_str().into(),
            });
        }
        self.status = next;
        if next.is_terminal() {
            self.completed_at = Some(Utc::now());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ResolverOrigin;
    use std::net::IpAddr;
    use std::str::FromStr;

    fn sample_run() -> Run {
        let resolvers = vec![Resolver::new(
            "r1",
            IpAddr::from_str("8.8.8.8").unwrap(),
            "Google",
            "Google",
            ResolverOrigin::BuiltInPublic,
        )];
        Run::new(
            "run1".into(),
            RunKind::Custom,
            resolvers,
            vec!["example.com".into()],
            TestProfile::default(),
        )
    }

    #[test]
    fn total_probes_is_cartesian_product() {
        let run = sample_run();
        assert_eq!(run.total_probes(), 1);
    }

    #[test]
    fn valid_transitions_succeed() {
        let mut run = sample_run();
        assert!(run.transition(RunStatus::Running).is_ok());
        assert!(run.transition(RunStatus::Completed).is_ok());
        assert!(run.completed_at.is_some());
    }

    #[test]
    fn invalid_transition_rejected() {
        let mut run = sample_run();
        assert!(run.transition(RunStatus::Completed).is_err());
    }
}
