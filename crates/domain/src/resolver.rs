use std::net::IpAddr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolverOrigin {
    BuiltInPublic,
    CustomPublic,
    Local,
}

impl ResolverOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolverOrigin::BuiltInPublic => "built_in_public",
            ResolverOrigin::CustomPublic => "custom_public",
            ResolverOrigin::Local => "local",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolver {
    pub id: String,
    pub address: IpAddr,
    pub display_name: String,
    pub provider_label: String,
    pub origin: ResolverOrigin,
    pub enabled: bool,
    pub is_primary: bool,
}

impl Resolver {
    pub fn new(
        id: impl Into<String>,
        address: IpAddr,
        display_name: impl Into<String>,
        provider_label: impl Into<String>,
        origin: ResolverOrigin,
    ) -> Self {
        Self {
            id: id.into(),
            address,
            display_name: display_name.into(),
            provider_label: provider_label.into(),
            origin,
            enabled: true,
            is_primary: false,
        }
    }

    /// Resolvers bound for a live benchmark run must parse and must not be loopback.
    /// Loopback entries may still be *configured* (§3) — this check only gates the
    /// benchmark path, not storage.
    pub fn validate_for_benchmark(&self) -> Result<(), DomainError> {
        if self.address.is_loopback() {
            return Err(DomainError::LoopbackResolver(self.address.to_string()));
        }
        Ok(())
    }

    pub fn parse_address(raw: &str) -> Result<IpAddr, DomainError> {
        IpAddr::from_str(raw.trim())
            .map_err(|_| DomainError::InvalidResolverAddress(raw.to_string()))
    }
}

/// The five built-in public resolvers, always present in `public_resolvers` (§4.7).
/// Default enablement: Cloudflare/Google/Quad9 enabled, OpenDNS/Level3 disabled.
pub fn built_in_public_resolvers() -> Vec<Resolver> {
    vec![
        enabled_builtin("cloudflare-1", "1.1.1.1", "Cloudflare", "Cloudflare", true),
        enabled_builtin("cloudflare-2", "1.0.0.1", "Cloudflare (secondary)", "Cloudflare", true),
        enabled_builtin("google-1", "8.8.8.8", "Google", "Google", true),
        enabled_builtin("google-2", "8.8.4.4", "Google (secondary)", "Google", true),
        enabled_builtin("quad9-1", "9.9.9.9", "Quad9", "Quad9", true),
        enabled_builtin("quad9-2", "149.112.112.112", "Quad9 (secondary)", "Quad9", true),
        enabled_builtin("opendns-1", "208.67.222.222", "OpenDNS", "OpenDNS", false),
        enabled_builtin("opendns-2", "208.67.220.220", "OpenDNS (secondary)", "OpenDNS", false),
        enabled_builtin("level3-1", "4.2.2.1", "Level3", "Level3", false),
        enabled_builtin("level3-2", "4.2.2.2", "Level3 (secondary)", "Level3", false),
    ]
}

fn enabled_builtin(id: &str, addr: &str, name: &str, provider: &str, enabled: bool) -> Resolver {
    let mut r = Resolver::new(
        id,
        IpAddr::from_str(addr).expect("built-in address literal is valid"),
        name,
        provider,
        ResolverOrigin::BuiltInPublic,
    );
    r.enabled = enabled;
    r
}

pub const MAX_LOCAL_RESOLVERS: usize = 10;
pub const MAX_PUBLIC_RESOLVERS: usize = 20;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_ins_have_correct_default_enablement() {
        let builtins = built_in_public_resolvers();
        assert_eq!(builtins.len(), 10);
        let enabled: Vec<_> = builtins
            .iter()
            .filter(|r| r.enabled)
            .map(|r| r.provider_label.as_str())
            .collect();
        assert!(enabled.contains(&"Cloudflare"));
        assert!(enabled.contains(&"Google"));
        assert!(enabled.contains(&"Quad9"));
        assert!(!builtins
            .iter()
            .any(|r| r.provider_label == "OpenDNS" && r.enabled));
        assert!(!builtins
            .iter()
            .any(|r| r.provider_label == "Level3" && r.enabled));
    }

    #[test]
    fn loopback_rejected_for_benchmark() {
        let r = Resolver::new(
            "x",
            IpAddr::from_str("127.0.0.1").unwrap(),
            "local",
            "local",
            ResolverOrigin::Local,
        );
        assert!(r.validate_for_benchmark().is_err());
    }

    #[test]
    fn parse_address_rejects_garbage() {
        assert!(Resolver::parse_address("not-an-ip").is_err());
        assert!(Resolver::parse_address("1.1.1.1").is_ok());
        assert!(Resolver::parse_address("2606:4700:4700::1111").is_ok());
    }
}
