#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use dnsbench_application::ports::{
    BenchmarkEvent, DnsHintProvider, EventPublisher, EventSubscription, LocalResolversStore, NetworkPolicyStore,
    PublicResolversStore, ResolverProbe, RunListPage, RunRecord, RunRegistry, RunRepository, RunSnapshot, TestProfileStore,
};
use dnsbench_domain::config::{LocalResolversDocument, NetworkPolicy, PublicResolversDocument};
use dnsbench_domain::{DomainError, FailureAnalysis, ProbeResult, Resolver, Run, RunStatus, TestProfile, TimingSource};
use tokio::sync::{broadcast, Mutex};
use tokio_util::sync::CancellationToken;

#[derive(Clone)]
pub struct MockResolverProbe {
    pub always_succeed: bool,
}

#[async_trait]
impl ResolverProbe for MockResolverProbe {
    async fn probe(&self, run_id: &str, resolver: &Resolver, domain: &str, _timeout_ms: u32) -> ProbeResult {
        if self.always_succeed {
            ProbeResult::success(run_id, resolver.address.to_string(), resolver.display_name.clone(), domain, 5.0, TimingSource::HighPrecision, "93.184.216.34".into(), None)
        } else {
            ProbeResult::failure(
                run_id,
                resolver.address.to_string(),
                resolver.display_name.clone(),
                domain,
                1000.0,
                TimingSource::HighPrecision,
                dnsbench_domain::ResponseCode::Timeout,
                dnsbench_domain::ErrorKind::DnsTimeout,
                None,
            )
        }
    }
}

struct RegistryEntry {
    status: RunStatus,
    total_probes: u32,
    completed_count: u32,
    cancellation: CancellationToken,
    wallclock_exceeded: bool,
}

#[derive(Default)]
pub struct MockRunRegistry {
    entries: Mutex<HashMap<String, RegistryEntry>>,
}

#[async_trait]
impl RunRegistry for MockRunRegistry {
    async fn create(&self, run_id: &str, total_probes: u32) -> CancellationToken {
        let token = CancellationToken::new();
        self.entries.lock().await.insert(
            run_id.to_string(),
            RegistryEntry { status: RunStatus::Pending, total_probes, completed_count: 0, cancellation: token.clone(), wallclock_exceeded: false },
        );
        token
    }

    async fn transition(&self, run_id: &str, next: RunStatus) -> Result<(), DomainError> {
        let mut entries = self.entries.lock().await;
        let entry = entries.get_mut(run_id).ok_or_else(|| DomainError::RunNotFound(run_id.to_string()))?;
        entry.status = next;
        Ok(())
    }

    async fn advance_progress(&self, run_id: &str) -> Result<u32, DomainError> {
        let mut entries = self.entries.lock().await;
        let entry = entries.get_mut(run_id).ok_or_else(|| DomainError::RunNotFound(run_id.to_string()))?;
        entry.completed_count += 1;
        Ok(entry.completed_count)
    }

    async fn cancel(&self, run_id: &str) -> Result<(), DomainError> {
        let entries = self.entries.lock().await;
        let entry = entries.get(run_id).ok_or_else(|| DomainError::RunNotFound(run_id.to_string()))?;
        entry.cancellation.cancel();
        Ok(())
    }

    async fn observe(&self, run_id: &str) -> Result<RunSnapshot, DomainError> {
        let entries = self.entries.lock().await;
        let entry = entries.get(run_id).ok_or_else(|| DomainError::RunNotFound(run_id.to_string()))?;
        Ok(RunSnapshot {
            run_id: run_id.to_string(),
            status: entry.status,
            completed_count: entry.completed_count,
            total_probes: entry.total_probes,
            wallclock_exceeded: entry.wallclock_exceeded,
        })
    }

    async fn evict_expired(&self, _retention: std::time::Duration) {}

    async fn running_overdue(&self, _cap: std::time::Duration) -> Vec<String> {
        Vec::new()
    }

    async fn mark_wallclock_exceeded(&self, run_id: &str) -> Result<(), DomainError> {
        let mut entries = self.entries.lock().await;
        let entry = entries.get_mut(run_id).ok_or_else(|| DomainError::RunNotFound(run_id.to_string()))?;
        entry.wallclock_exceeded = true;
        entry.cancellation.cancel();
        Ok(())
    }
}

#[derive(Default)]
pub struct MockRunRepository {
    runs: Mutex<HashMap<String, RunRecord>>,
}

#[async_trait]
impl RunRepository for MockRunRepository {
    async fn persist_run(
        &self,
        run: &Run,
        summaries: &[dnsbench_domain::ServerSummary],
        probes: &[ProbeResult],
        analyses: &[FailureAnalysis],
    ) -> Result<(), DomainError> {
        self.runs.lock().await.insert(
            run.id.clone(),
            RunRecord { run: run.clone(), summaries: summaries.to_vec(), probes: probes.to_vec(), analyses: analyses.to_vec() },
        );
        Ok(())
    }

    async fn get_run(&self, run_id: &str) -> Result<RunRecord, DomainError> {
        self.runs.lock().await.get(run_id).cloned().ok_or_else(|| DomainError::RunNotFound(run_id.to_string()))
    }

    async fn list_runs(&self, limit: u32, offset: u32) -> Result<RunListPage, DomainError> {
        let runs = self.runs.lock().await;
        let mut all: Vec<Run> = runs.values().map(|r| r.run.clone()).collect();
        all.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        let total = all.len() as u64;
        let page = all.into_iter().skip(offset as usize).take(limit as usize).collect();
        Ok(RunListPage { runs: page, total })
    }

    async fn get_probes(&self, run_id: &str) -> Result<Vec<ProbeResult>, DomainError> {
        Ok(self.get_run(run_id).await?.probes)
    }

    async fn get_failures(&self, run_id: &str) -> Result<Vec<FailureAnalysis>, DomainError> {
        Ok(self.get_run(run_id).await?.analyses)
    }
}

pub struct MockEventSubscription {
    receiver: broadcast::Receiver<BenchmarkEvent>,
}

#[async_trait]
impl EventSubscription for MockEventSubscription {
    async fn recv(&mut self) -> Option<BenchmarkEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

pub struct MockEventPublisher {
    sender: broadcast::Sender<BenchmarkEvent>,
}

impl Default for MockEventPublisher {
    fn default() -> Self {
        let (sender, _) = broadcast::channel(256);
        Self { sender }
    }
}

#[async_trait]
impl EventPublisher for MockEventPublisher {
    async fn publish(&self, event: BenchmarkEvent) {
        let _ = self.sender.send(event);
    }

    async fn subscribe(&self, _run_id: &str) -> Box<dyn EventSubscription> {
        Box::new(MockEventSubscription { receiver: self.sender.subscribe() })
    }
}

pub struct MockLocalResolversStore(pub Mutex<LocalResolversDocument>);

impl Default for MockLocalResolversStore {
    fn default() -> Self {
        Self(Mutex::new(LocalResolversDocument::default()))
    }
}

#[async_trait]
impl LocalResolversStore for MockLocalResolversStore {
    async fn get(&self) -> Result<LocalResolversDocument, DomainError> {
        Ok(self.0.lock().await.clone())
    }

    async fn put(&self, doc: LocalResolversDocument) -> Result<LocalResolversDocument, DomainError> {
        doc.validate()?;
        *self.0.lock().await = doc.clone();
        Ok(doc)
    }
}

pub struct MockPublicResolversStore(pub Mutex<PublicResolversDocument>);

impl Default for MockPublicResolversStore {
    fn default() -> Self {
        Self(Mutex::new(PublicResolversDocument::default()))
    }
}

#[async_trait]
impl PublicResolversStore for MockPublicResolversStore {
    async fn get(&self) -> Result<PublicResolversDocument, DomainError> {
        Ok(self.0.lock().await.clone())
    }

    async fn put(&self, doc: PublicResolversDocument) -> Result<PublicResolversDocument, DomainError> {
        doc.validate()?;
        *self.0.lock().await = doc.clone();
        Ok(doc)
    }
}

pub struct MockTestProfileStore(pub Mutex<TestProfile>);

impl Default for MockTestProfileStore {
    fn default() -> Self {
        Self(Mutex::new(TestProfile::default()))
    }
}

#[async_trait]
impl TestProfileStore for MockTestProfileStore {
    async fn get(&self) -> Result<TestProfile, DomainError> {
        Ok(self.0.lock().await.clone())
    }

    async fn put(&self, profile: TestProfile) -> Result<TestProfile, DomainError> {
        profile.validate()?;
        *self.0.lock().await = profile.clone();
        Ok(profile)
    }
}

pub struct MockNetworkPolicyStore(pub Mutex<NetworkPolicy>);

impl Default for MockNetworkPolicyStore {
    fn default() -> Self {
        Self(Mutex::new(NetworkPolicy::default()))
    }
}

#[async_trait]
impl NetworkPolicyStore for MockNetworkPolicyStore {
    async fn get(&self) -> Result<NetworkPolicy, DomainError> {
        Ok(self.0.lock().await.clone())
    }

    async fn put(&self, policy: NetworkPolicy) -> Result<NetworkPolicy, DomainError> {
        *self.0.lock().await = policy.clone();
        Ok(policy)
    }
}

#[derive(Default)]
pub struct MockDnsHintProvider {
    pub hint: Vec<String>,
}

#[async_trait]
impl DnsHintProvider for MockDnsHintProvider {
    async fn current_resolvers(&self) -> Vec<String> {
        self.hint.clone()
    }
}

pub fn arc<T>(value: T) -> Arc<T> {
    Arc::new(value)
}
