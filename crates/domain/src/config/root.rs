use serde::{Deserialize, Serialize};

use super::database::DatabaseConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::runtime::RuntimeConfig;
use super::server::ServerConfig;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub runtime: RuntimeConfig,
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub bind_address: Option<String>,
    pub web_port: Option<u16>,
    pub database_path: Option<String>,
    pub log_level: Option<String>,
    pub config_dir: Option<String>,
}

impl AppConfig {
    pub fn load(path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("dnsbench.toml").exists() {
            Self::from_file("dnsbench.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(port) = overrides.web_port {
            self.server.web_port = port;
        }
        if let Some(db) = overrides.database_path {
            self.database.path = db;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(dir) = overrides.config_dir {
            self.runtime.config_dir = dir;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.web_port == 0 {
            return Err(ConfigError::Validation("web_port cannot be 0".to_string()));
        }
        if self.database.pool_max_connections == 0 {
            return Err(ConfigError::Validation(
                "database.pool_max_connections must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    /// `HOST_IP`-equivalent environment seeding of the network policy's IP-origin
    /// allowance (§6). Returns `None` when unset.
    pub fn host_ip_hint() -> Option<String> {
        std::env::var("HOST_IP").ok()
    }

    /// Selects operator-visible defaults by environment (§6): production gets a
    /// tighter nominal rate-limit threshold than development. The core engine itself
    /// does not otherwise depend on this flag.
    pub fn rate_limit_threshold_per_15min() -> u32 {
        match std::env::var("NODE_ENV").as_deref() {
            Ok("production") => 100,
            _ => 1000,
        }
    }
}
