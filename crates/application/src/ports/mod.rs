pub mod config_store;
pub mod dns_hint;
pub mod event_publisher;
pub mod resolver_probe;
pub mod run_registry;
pub mod run_repository;

pub use config_store::{LocalResolversStore, NetworkPolicyStore, PublicResolversStore, TestProfileStore};
pub use dns_hint::DnsHintProvider;
pub use event_publisher::{BenchmarkEvent, EventPublisher, EventSubscription, RunStartedResolver};
pub use resolver_probe::ResolverProbe;
pub use run_registry::{RunRegistry, RunSnapshot};
pub use run_repository::{RunListPage, RunRecord, RunRepository};
