use async_trait::async_trait;
use dnsbench_domain::config::{LocalResolversDocument, NetworkPolicy, PublicResolversDocument};
use dnsbench_domain::{DomainError, TestProfile};

/// C7. Each document is loadable at process start and replaceable via the surface
/// in §4.8. Implementations must rewrite atomically (write-to-temp + rename or
/// equivalent) and serialize mutations per document — the ports below are intentionally
/// separate traits rather than one "config store" trait, because each document has an
/// independent replace-invariant (§4.7) and is mutated by a different settings route.
#[async_trait]
pub trait LocalResolversStore: Send + Sync {
    async fn get(&self) -> Result<LocalResolversDocument, DomainError>;
    async fn put(&self, doc: LocalResolversDocument) -> Result<LocalResolversDocument, DomainError>;
}

#[async_trait]
pub trait PublicResolversStore: Send + Sync {
    async fn get(&self) -> Result<PublicResolversDocument, DomainError>;
    async fn put(&self, doc: PublicResolversDocument) -> Result<PublicResolversDocument, DomainError>;
}

#[async_trait]
pub trait TestProfileStore: Send + Sync {
    async fn get(&self) -> Result<TestProfile, DomainError>;
    async fn put(&self, profile: TestProfile) -> Result<TestProfile, DomainError>;
}

#[async_trait]
pub trait NetworkPolicyStore: Send + Sync {
    async fn get(&self) -> Result<NetworkPolicy, DomainError>;
    async fn put(&self, policy: NetworkPolicy) -> Result<NetworkPolicy, DomainError>;
}
