pub mod run_registry_eviction;
pub mod runner;
pub mod wallclock_guard;

pub use run_registry_eviction::RunRegistryEvictionJob;
pub use runner::JobRunner;
pub use wallclock_guard::WallclockGuardJob;
