use std::sync::Arc;

use crate::ports::DnsHintProvider;

/// `GET /dns/current` (§4.8): best-effort only, never authoritative, never fails
/// the request — an empty list means the hint could not be determined.
pub struct GetDnsHintUseCase {
    provider: Arc<dyn DnsHintProvider>,
}

impl GetDnsHintUseCase {
    pub fn new(provider: Arc<dyn DnsHintProvider>) -> Self {
        Self { provider }
    }

    pub async fn execute(&self) -> Vec<String> {
        self.provider.current_resolvers().await
    }
}
