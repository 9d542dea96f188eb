use async_trait::async_trait;
use dnsbench_application::ports::LocalResolversStore;
use dnsbench_domain::config::LocalResolversDocument;
use dnsbench_domain::DomainError;
use tokio::sync::Mutex;

use super::json_file::{read_or_default, write_atomic};

const FILE_NAME: &str = "local_resolvers.json";

/// C7. Single JSON document under the runtime's config directory (§4.7). The
/// mutex serializes concurrent `put` calls; reads never block on it.
pub struct JsonLocalResolversStore {
    dir: String,
    write_lock: Mutex<()>,
}

impl JsonLocalResolversStore {
    pub fn new(dir: impl Into<String>) -> Self {
        Self { dir: dir.into(), write_lock: Mutex::new(()) }
    }
}

#[async_trait]
impl LocalResolversStore for JsonLocalResolversStore {
    async fn get(&self) -> Result<LocalResolversDocument, DomainError> {
        read_or_default(&self.dir, FILE_NAME).await
    }

    async fn put(&self, doc: LocalResolversDocument) -> Result<LocalResolversDocument, DomainError> {
        doc.validate()?;
        let _guard = self.write_lock.lock().await;
        write_atomic(&self.dir, FILE_NAME, &doc).await?;
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnsbench_domain::config::LocalResolverEntry;

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonLocalResolversStore::new(dir.path().to_str().unwrap().to_string());

        let doc = LocalResolversDocument { servers: vec![LocalResolverEntry { address: "192.168.1.1".into(), enabled: true }] };
        store.put(doc).await.unwrap();

        let loaded = store.get().await.unwrap();
        assert_eq!(loaded.servers.len(), 1);
    }

    #[tokio::test]
    async fn get_on_missing_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonLocalResolversStore::new(dir.path().to_str().unwrap().to_string());
        let loaded = store.get().await.unwrap();
        assert!(loaded.servers.is_empty());
    }
}
