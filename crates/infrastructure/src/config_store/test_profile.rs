use async_trait::async_trait;
use dnsbench_application::ports::TestProfileStore;
use dnsbench_domain::{DomainError, TestProfile};
use tokio::sync::Mutex;

use super::json_file::{read_or_default, write_atomic};

const FILE_NAME: &str = "test_profile.json";

pub struct JsonTestProfileStore {
    dir: String,
    write_lock: Mutex<()>,
}

impl JsonTestProfileStore {
    pub fn new(dir: impl Into<String>) -> Self {
        Self { dir: dir.into(), write_lock: Mutex::new(()) }
    }
}

#[async_trait]
impl TestProfileStore for JsonTestProfileStore {
    async fn get(&self) -> Result<TestProfile, DomainError> {
        read_or_default(&self.dir, FILE_NAME).await
    }

    async fn put(&self, profile: TestProfile) -> Result<TestProfile, DomainError> {
        profile.validate()?;
        let _guard = self.write_lock.lock().await;
        write_atomic(&self.dir, FILE_NAME, &profile).await?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_rejects_invalid_profile() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonTestProfileStore::new(dir.path().to_str().unwrap().to_string());
        let mut profile = TestProfile::default();
        profile.performance.query_timeout_ms = 1;
        assert!(store.put(profile).await.is_err());
    }

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonTestProfileStore::new(dir.path().to_str().unwrap().to_string());
        let mut profile = TestProfile::default();
        profile.performance.max_concurrent_servers = 8;
        store.put(profile).await.unwrap();
        let loaded = store.get().await.unwrap();
        assert_eq!(loaded.performance.max_concurrent_servers, 8);
    }
}
