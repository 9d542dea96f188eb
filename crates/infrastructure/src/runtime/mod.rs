pub mod event_bus;
pub mod run_registry;

pub use event_bus::BroadcastEventBus;
pub use run_registry::InMemoryRunRegistry;
