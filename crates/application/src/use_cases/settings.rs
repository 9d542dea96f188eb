use std::sync::Arc;

use dnsbench_domain::config::{LocalResolversDocument, NetworkPolicy, PublicResolversDocument};
use dnsbench_domain::{DomainError, TestProfile};

use crate::ports::{LocalResolversStore, NetworkPolicyStore, PublicResolversStore, TestProfileStore};

/// `GET/PUT /settings/local-dns` (§4.8).
pub struct LocalResolverSettingsUseCase {
    store: Arc<dyn LocalResolversStore>,
}

impl LocalResolverSettingsUseCase {
    pub fn new(store: Arc<dyn LocalResolversStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self) -> Result<LocalResolversDocument, DomainError> {
        self.store.get().await
    }

    pub async fn replace(&self, doc: LocalResolversDocument) -> Result<LocalResolversDocument, DomainError> {
        doc.validate()?;
        self.store.put(doc).await
    }
}

/// `GET/PUT /settings/public-dns` (§4.8).
pub struct PublicResolverSettingsUseCase {
    store: Arc<dyn PublicResolversStore>,
}

impl PublicResolverSettingsUseCase {
    pub fn new(store: Arc<dyn PublicResolversStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self) -> Result<PublicResolversDocument, DomainError> {
        self.store.get().await
    }

    pub async fn replace(&self, doc: PublicResolversDocument) -> Result<PublicResolversDocument, DomainError> {
        let current = self.store.get().await?;
        let next = PublicResolversDocument::apply_update(&current, doc)?;
        self.store.put(next).await
    }
}

/// `GET/PUT /settings/test-config` (§4.8).
pub struct TestProfileSettingsUseCase {
    store: Arc<dyn TestProfileStore>,
}

impl TestProfileSettingsUseCase {
    pub fn new(store: Arc<dyn TestProfileStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self) -> Result<TestProfile, DomainError> {
        self.store.get().await
    }

    pub async fn replace(&self, profile: TestProfile) -> Result<TestProfile, DomainError> {
        profile.validate()?;
        self.store.put(profile).await
    }
}

/// `GET/PUT /settings/network-policy` (§4.8).
pub struct NetworkPolicySettingsUseCase {
    store: Arc<dyn NetworkPolicyStore>,
}

impl NetworkPolicySettingsUseCase {
    pub fn new(store: Arc<dyn NetworkPolicyStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self) -> Result<NetworkPolicy, DomainError> {
        self.store.get().await
    }

    pub async fn replace(&self, policy: NetworkPolicy) -> Result<NetworkPolicy, DomainError> {
        self.store.put(policy).await
    }
}
