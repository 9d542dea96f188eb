pub mod cancel_run;
pub mod export_run;
pub mod get_dns_hint;
pub mod get_run;
pub mod get_run_domains;
pub mod get_run_failures;
pub mod get_run_status;
pub mod list_runs;
pub mod reaggregate_run;
pub mod settings;
pub mod start_run;

pub use cancel_run::CancelRunUseCase;
pub use export_run::{ExportFormat, ExportRunUseCase, ExportedRun};
pub use get_dns_hint::GetDnsHintUseCase;
pub use get_run::GetRunUseCase;
pub use get_run_domains::GetRunDomainsUseCase;
pub use get_run_failures::GetRunFailuresUseCase;
pub use get_run_status::GetRunStatusUseCase;
pub use list_runs::ListRunsUseCase;
pub use reaggregate_run::ReaggregateRunUseCase;
pub use settings::{LocalResolverSettingsUseCase, NetworkPolicySettingsUseCase, PublicResolverSettingsUseCase, TestProfileSettingsUseCase};
pub use start_run::{StartRunRequest, StartRunUseCase};
