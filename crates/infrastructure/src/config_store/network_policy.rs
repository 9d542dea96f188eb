use async_trait::async_trait;
use dnsbench_application::ports::NetworkPolicyStore;
use dnsbench_domain::config::NetworkPolicy;
use dnsbench_domain::DomainError;
use tokio::sync::Mutex;

use super::json_file::{read_or_default, write_atomic};

const FILE_NAME: &str = "network_policy.json";

pub struct JsonNetworkPolicyStore {
    dir: String,
    write_lock: Mutex<()>,
}

impl JsonNetworkPolicyStore {
    pub fn new(dir: impl Into<String>) -> Self {
        Self { dir: dir.into(), write_lock: Mutex::new(()) }
    }
}

#[async_trait]
impl NetworkPolicyStore for JsonNetworkPolicyStore {
    async fn get(&self) -> Result<NetworkPolicy, DomainError> {
        read_or_default(&self.dir, FILE_NAME).await
    }

    async fn put(&self, policy: NetworkPolicy) -> Result<NetworkPolicy, DomainError> {
        let _guard = self.write_lock.lock().await;
        write_atomic(&self.dir, FILE_NAME, &policy).await?;
        Ok(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonNetworkPolicyStore::new(dir.path().to_str().unwrap().to_string());
        let mut policy = NetworkPolicy::default();
        policy.custom_origins.push("https://example.com".into());
        store.put(policy).await.unwrap();
        let loaded = store.get().await.unwrap();
        assert_eq!(loaded.custom_origins, vec!["https://example.com".to_string()]);
    }
}
