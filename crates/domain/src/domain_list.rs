use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunKind {
    Quick,
    Full,
    Custom,
}

impl RunKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunKind::Quick => "quick",
            RunKind::Full => "full",
            RunKind::Custom => "custom",
        }
    }

    /// Cardinality bound for this profile's domain list (§3).
    pub fn cardinality_bound(&self) -> (usize, usize) {
        match self {
            RunKind::Quick => (5, 50),
            RunKind::Full => (10, 200),
            RunKind::Custom => (1, 500),
        }
    }
}

impl std::str::FromStr for RunKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quick" => Ok(RunKind::Quick),
            "full" => Ok(RunKind::Full),
            "custom" => Ok(RunKind::Custom),
            other => Err(DomainError::UnknownRunKind(other.to_string())),
        }
    }
}

/// An ordered list of probe-target domain names. The engine treats entries as opaque
/// strings; the only normalization applied is case-folding for equality (§3).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DomainList(pub Vec<String>);

impl DomainList {
    pub fn new(domains: Vec<String>) -> Self {
        Self(domains)
    }

    /// The lower half of `kind.cardinality_bound()` governs `TestProfile.domain_counts`
    /// (the size the engine auto-fills from `default_domain_pool` when the operator
    /// submits a run without an explicit list); it is not enforced here. An explicit
    /// list only has to be non-empty and within the upper bound — spec.md §3 says the
    /// engine treats it as opaque strings, and an operator naming fewer domains than
    /// the profile's usual count is not itself invalid.
    pub fn validate(&self, kind: RunKind) -> Result<(), DomainError> {
        if self.0.is_empty() {
            return Err(DomainError::EmptyDomainList);
        }
        let (_, max) = kind.cardinality_bound();
        if self.0.len() > max {
            return Err(DomainError::DomainListTooLarge(self.0.len()));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

/// Curated pool of well-known, high-uptime domains used to fill `quick`/`full`
/// default domain lists (§3 `domain_counts`) when the operator submits a run
/// without an explicit domain list. `custom` runs always require an explicit list.
pub fn default_domain_pool() -> &'static [&'static str] {
    &[
        "google.com", "youtube.com", "facebook.com", "amazon.com", "wikipedia.org",
        "twitter.com", "instagram.com", "github.com", "microsoft.com", "apple.com",
        "netflix.com", "reddit.com", "linkedin.com", "cloudflare.com", "yahoo.com",
        "bing.com", "stackoverflow.com", "adobe.com", "dropbox.com", "spotify.com",
        "zoom.us", "salesforce.com", "slack.com", "paypal.com", "ebay.com",
        "wordpress.com", "mozilla.org", "gitlab.com", "npmjs.com", "docker.com",
        "digitalocean.com", "heroku.com", "vercel.com", "cloudflare-dns.com", "akamai.com",
        "fastly.com", "oracle.com", "ibm.com", "intel.com", "nvidia.com",
        "samsung.com", "sony.com", "bbc.co.uk", "nytimes.com", "cnn.com",
        "theguardian.com", "medium.com", "quora.com", "pinterest.com", "tumblr.com",
        "discord.com", "twitch.tv", "steampowered.com", "epicgames.com", "ea.com",
        "ubisoft.com", "blizzard.com", "riotgames.com", "mojang.com", "unity.com",
        "atlassian.com", "jetbrains.com", "docker.io", "kubernetes.io", "rust-lang.org",
        "python.org", "nodejs.org", "golang.org", "w3.org", "ietf.org",
        "icann.org", "iana.org", "debian.org", "ubuntu.com", "redhat.com",
        "suse.com", "archlinux.org", "freebsd.org", "openssl.org", "letsencrypt.org",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_list() {
        let list = DomainList::new(vec![]);
        assert!(matches!(
            list.validate(RunKind::Custom),
            Err(DomainError::EmptyDomainList)
        ));
    }

    #[test]
    fn rejects_over_bound_for_quick() {
        let list = DomainList::new((0..60).map(|i| format!("d{i}.example")).collect());
        assert!(matches!(
            list.validate(RunKind::Quick),
            Err(DomainError::DomainListTooLarge(60))
        ));
    }

    #[test]
    fn accepts_within_bound() {
        let list = DomainList::new(vec!["example.com".to_string(), "github.com".to_string()]);
        assert!(list.validate(RunKind::Quick).is_ok());
    }

    #[test]
    fn default_pool_has_no_duplicates() {
        let pool = default_domain_pool();
        let mut sorted = pool.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), pool.len());
    }
}
