use std::sync::Arc;

use dnsbench_domain::{default_domain_pool, DomainError, DomainList, Resolver, Run, RunKind, TestProfile};

use crate::ports::{EventPublisher, LocalResolversStore, PublicResolversStore, ResolverProbe, RunRegistry, RunRepository, TestProfileStore};
use crate::services::{resolver_selection, scheduler};

#[derive(Debug)]
pub struct StartRunRequest {
    pub kind: RunKind,
    pub resolvers: Option<Vec<Resolver>>,
    pub domains: Option<Vec<String>>,
    pub profile_overrides: Option<TestProfile>,
}

pub struct StartRunUseCase {
    probe: Arc<dyn ResolverProbe>,
    registry: Arc<dyn RunRegistry>,
    events: Arc<dyn EventPublisher>,
    repository: Arc<dyn RunRepository>,
    local_resolvers: Arc<dyn LocalResolversStore>,
    public_resolvers: Arc<dyn PublicResolversStore>,
    test_profile: Arc<dyn TestProfileStore>,
}

impl StartRunUseCase {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        probe: Arc<dyn ResolverProbe>,
        registry: Arc<dyn RunRegistry>,
        events: Arc<dyn EventPublisher>,
        repository: Arc<dyn RunRepository>,
        local_resolvers: Arc<dyn LocalResolversStore>,
        public_resolvers: Arc<dyn PublicResolversStore>,
        test_profile: Arc<dyn TestProfileStore>,
    ) -> Self {
        Self { probe, registry, events, repository, local_resolvers, public_resolvers, test_profile }
    }

    /// C2 `run(resolvers, domains, profile) -> run_id`: validates, snapshots
    /// inputs, registers the run, and spawns the scheduler. Returns as soon as
    /// the run is registered — the scheduler drives it to completion in the
    /// background.
    pub async fn execute(&self, request: StartRunRequest) -> Result<String, DomainError> {
        let profile = match request.profile_overrides {
            Some(p) => p,
            None => self.test_profile.get().await?,
        };
        profile.validate()?;

        let resolvers = self.resolve_resolvers(request.kind, request.resolvers).await?;
        let resolvers: Vec<Resolver> = resolvers.into_iter().filter(|r| r.validate_for_benchmark().is_ok()).collect();
        if resolvers.is_empty() {
            return Err(DomainError::EmptyResolverList);
        }

        let domains = self.resolve_domains(request.kind, request.domains, &profile)?;

        let run_id = generate_run_id();
        let run = Run::new(run_id.clone(), request.kind, resolvers, domains, profile);

        let cancellation = self.registry.create(&run.id, run.total_probes() as u32).await;

        tokio::spawn(scheduler::execute(
            run,
            cancellation,
            self.probe.clone(),
            self.registry.clone(),
            self.events.clone(),
            self.repository.clone(),
        ));

        Ok(run_id)
    }

    async fn resolve_resolvers(&self, kind: RunKind, explicit: Option<Vec<Resolver>>) -> Result<Vec<Resolver>, DomainError> {
        match explicit {
            Some(resolvers) => Ok(resolvers),
            None => match kind {
                RunKind::Custom => Err(DomainError::EmptyResolverList),
                _ => {
                    let local = self.local_resolvers.get().await?.enabled_resolvers();
                    let public = self.public_resolvers.get().await?.enabled_resolvers();
                    resolver_selection::default_resolvers_for(kind, &local, &public)
                }
            },
        }
    }

    fn resolve_domains(&self, kind: RunKind, explicit: Option<Vec<String>>, profile: &TestProfile) -> Result<Vec<String>, DomainError> {
        let domains = match explicit {
            Some(domains) => domains,
            None if kind == RunKind::Custom => return Err(DomainError::EmptyDomainList),
            None => {
                let count = match kind {
                    RunKind::Quick => profile.domain_counts.quick,
                    RunKind::Full => profile.domain_counts.full,
                    RunKind::Custom => unreachable!("custom runs require an explicit domain list"),
                } as usize;
                default_domain_pool().iter().cycle().take(count).map(|s| s.to_string()).collect()
            }
        };
        let list = DomainList::new(domains);
        list.validate(kind)?;
        Ok(list.0)
    }
}

/// Opaque run id (§3): not a database auto-increment, so history remains stable
/// across store migrations. No external id-generation crate in the dependency
/// tree, so this mirrors the timestamp+entropy scheme used elsewhere for
/// transaction ids rather than pulling one in for a single call site.
fn generate_run_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    format!("run-{millis:x}-{:08x}", fastrand::u32(..))
}
