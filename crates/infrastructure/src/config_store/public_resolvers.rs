use async_trait::async_trait;
use dnsbench_application::ports::PublicResolversStore;
use dnsbench_domain::config::PublicResolversDocument;
use dnsbench_domain::DomainError;
use tokio::sync::Mutex;

use super::json_file::{read_or_default, write_atomic};

const FILE_NAME: &str = "public_resolvers.json";

pub struct JsonPublicResolversStore {
    dir: String,
    write_lock: Mutex<()>,
}

impl JsonPublicResolversStore {
    pub fn new(dir: impl Into<String>) -> Self {
        Self { dir: dir.into(), write_lock: Mutex::new(()) }
    }
}

#[async_trait]
impl PublicResolversStore for JsonPublicResolversStore {
    async fn get(&self) -> Result<PublicResolversDocument, DomainError> {
        read_or_default(&self.dir, FILE_NAME).await
    }

    async fn put(&self, doc: PublicResolversDocument) -> Result<PublicResolversDocument, DomainError> {
        let _guard = self.write_lock.lock().await;
        let current = self.get().await?;
        let next = PublicResolversDocument::apply_update(&current, doc)?;
        write_atomic(&self.dir, FILE_NAME, &next).await?;
        Ok(next)
    }
}
