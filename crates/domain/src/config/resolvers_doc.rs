use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::resolver::{built_in_public_resolvers, Resolver, ResolverOrigin, MAX_LOCAL_RESOLVERS, MAX_PUBLIC_RESOLVERS};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocalResolverEntry {
    pub address: String,
    pub enabled: bool,
}

/// §4.7 `local_resolvers` document: `{ servers: [{address, enabled}] }`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct LocalResolversDocument {
    pub servers: Vec<LocalResolverEntry>,
}

impl LocalResolversDocument {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.servers.len() > MAX_LOCAL_RESOLVERS {
            return Err(DomainError::TooManyLocalResolvers(MAX_LOCAL_RESOLVERS));
        }
        for entry in &self.servers {
            if entry.enabled {
                Resolver::parse_address(&entry.address)?;
            }
        }
        Ok(())
    }

    pub fn enabled_resolvers(&self) -> Vec<Resolver> {
        self.servers
            .iter()
            .filter(|e| e.enabled)
            .filter_map(|e| {
                Resolver::parse_address(&e.address).ok().map(|addr| {
                    let mut r = Resolver::new(
                        format!("local-{}", e.address),
                        addr,
                        e.address.clone(),
                        "Local".to_string(),
                        ResolverOrigin::Local,
                    );
                    r.is_primary = true;
                    r
                })
            })
            .collect()
    }
}

/// §4.7 `public_resolvers` document: `{ servers: [Resolver] }`. Built-in entries are
/// always present (may be toggled/renamed, never deleted); custom entries carry
/// `origin = custom_public` and are deletable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PublicResolversDocument {
    pub servers: Vec<Resolver>,
}

impl Default for PublicResolversDocument {
    fn default() -> Self {
        Self {
            servers: built_in_public_resolvers(),
        }
    }
}

impl PublicResolversDocument {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.servers.len() > MAX_PUBLIC_RESOLVERS {
            return Err(DomainError::TooManyPublicResolvers(MAX_PUBLIC_RESOLVERS));
        }
        for required in built_in_public_resolvers() {
            if !self.servers.iter().any(|s| s.id == required.id) {
                return Err(DomainError::CannotDeleteBuiltIn(required.id));
            }
        }
        Ok(())
    }

    /// Replaces `next` while rejecting removal of any built-in entry; built-ins may
    /// still be toggled/renamed by `next`.
    pub fn apply_update(current: &Self, next: Self) -> Result<Self, DomainError> {
        let builtin_ids: Vec<String> = current
            .servers
            .iter()
            .filter(|r| r.origin == ResolverOrigin::BuiltInPublic)
            .map(|r| r.id.clone())
            .collect();
        for id in &builtin_ids {
            if !next.servers.iter().any(|s| &s.id == id) {
                return Err(DomainError::CannotDeleteBuiltIn(id.clone()));
            }
        }
        next.validate()?;
        Ok(next)
    }

    pub fn enabled_resolvers(&self) -> Vec<Resolver> {
        self.servers.iter().filter(|r| r.enabled).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_contains_all_builtins_enabled_per_spec() {
        let doc = PublicResolversDocument::default();
        assert!(doc.validate().is_ok());
        assert_eq!(doc.enabled_resolvers().iter().filter(|r| r.provider_label == "Cloudflare").count(), 2);
    }

    #[test]
    fn removing_a_builtin_is_rejected() {
        let current = PublicResolversDocument::default();
        let mut next = current.clone();
        next.servers.retain(|r| r.id != "cloudflare-1");
        assert!(PublicResolversDocument::apply_update(&current, next).is_err());
    }

    #[test]
    fn local_resolvers_reject_invalid_address_when_enabled() {
        let doc = LocalResolversDocument {
            servers: vec![LocalResolverEntry { address: "nope".into(), enabled: true }],
        };
        assert!(doc.validate().is_err());
    }
}
