pub mod database;
pub mod errors;
pub mod logging;
pub mod network_policy;
pub mod resolvers_doc;
pub mod root;
pub mod runtime;
pub mod server;

pub use database::DatabaseConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use network_policy::NetworkPolicy;
pub use resolvers_doc::{LocalResolverEntry, LocalResolversDocument, PublicResolversDocument};
pub use root::{AppConfig, CliOverrides};
pub use runtime::RuntimeConfig;
pub use server::ServerConfig;
