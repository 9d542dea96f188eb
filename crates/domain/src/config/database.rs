use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    pub busy_timeout_secs: u64,
    pub pool_max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "./data/dnsbench.sqlite3".to_string(),
            busy_timeout_secs: 5,
            pool_max_connections: 4,
        }
    }
}
