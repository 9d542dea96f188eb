use async_trait::async_trait;

/// Best-effort hint of the host's configured default resolvers (§4.8
/// `GET /dns/current`). Never authoritative, never blocks on failure — an
/// implementation that cannot read host configuration just returns an empty list.
#[async_trait]
pub trait DnsHintProvider: Send + Sync {
    async fn current_resolvers(&self) -> Vec<String>;
}
