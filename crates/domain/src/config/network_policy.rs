use serde::{Deserialize, Serialize};

/// §4.7/§4.8: decides whether a caller's `Origin` header is accepted. Localhost is
/// always permitted regardless of this document's contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkPolicy {
    pub allow_ip_access: bool,
    pub allow_hostname_access: bool,
    pub custom_origins: Vec<String>,
}

impl Default for NetworkPolicy {
    fn default() -> Self {
        Self {
            allow_ip_access: true,
            allow_hostname_access: true,
            custom_origins: Vec::new(),
        }
    }
}
