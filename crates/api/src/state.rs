use std::sync::Arc;

use dnsbench_application::ports::EventPublisher;
use dnsbench_application::use_cases::{
    CancelRunUseCase, ExportRunUseCase, GetDnsHintUseCase, GetRunDomainsUseCase, GetRunFailuresUseCase,
    GetRunStatusUseCase, GetRunUseCase, ListRunsUseCase, LocalResolverSettingsUseCase, NetworkPolicySettingsUseCase,
    PublicResolverSettingsUseCase, StartRunUseCase, TestProfileSettingsUseCase,
};

#[derive(Clone)]
pub struct BenchmarkUseCases {
    pub start_run: Arc<StartRunUseCase>,
    pub cancel_run: Arc<CancelRunUseCase>,
    pub get_status: Arc<GetRunStatusUseCase>,
}

#[derive(Clone)]
pub struct ResultUseCases {
    pub list_runs: Arc<ListRunsUseCase>,
    pub get_run: Arc<GetRunUseCase>,
    pub get_domains: Arc<GetRunDomainsUseCase>,
    pub get_failures: Arc<GetRunFailuresUseCase>,
    pub export_run: Arc<ExportRunUseCase>,
}

#[derive(Clone)]
pub struct SettingsUseCases {
    pub local_resolvers: Arc<LocalResolverSettingsUseCase>,
    pub public_resolvers: Arc<PublicResolverSettingsUseCase>,
    pub test_profile: Arc<TestProfileSettingsUseCase>,
    pub network_policy: Arc<NetworkPolicySettingsUseCase>,
}

#[derive(Clone)]
pub struct AppState {
    pub benchmark: BenchmarkUseCases,
    pub results: ResultUseCases,
    pub settings: SettingsUseCases,
    pub dns_hint: Arc<GetDnsHintUseCase>,
    pub events: Arc<dyn EventPublisher>,
}
