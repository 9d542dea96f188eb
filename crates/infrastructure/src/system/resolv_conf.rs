use async_trait::async_trait;
use dnsbench_application::ports::DnsHintProvider;
use tokio::fs;
use tracing::debug;

/// Best-effort reader of the host's configured default resolvers (§4.8
/// `GET /dns/current`). Linux/BSD-only; never authoritative and never fails the
/// request on read error.
pub struct ResolvConfHintProvider {
    path: String,
}

impl ResolvConfHintProvider {
    pub fn new() -> Self {
        Self { path: "/etc/resolv.conf".to_string() }
    }

    #[cfg(test)]
    pub fn with_path(path: String) -> Self {
        Self { path }
    }
}

impl Default for ResolvConfHintProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsHintProvider for ResolvConfHintProvider {
    async fn current_resolvers(&self) -> Vec<String> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) => {
                debug!(path = %self.path, error = %e, "could not read resolv.conf, reporting no hint");
                return Vec::new();
            }
        };

        parse_nameservers(&contents)
    }
}

fn parse_nameservers(contents: &str) -> Vec<String> {
    contents
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.starts_with('#') || line.is_empty() {
                return None;
            }
            let mut fields = line.split_whitespace();
            if fields.next()? != "nameserver" {
                return None;
            }
            fields.next().map(str::to_string)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn parses_nameserver_lines_and_ignores_comments() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# comment\nnameserver 1.1.1.1\nnameserver 8.8.8.8\nsearch example.com").unwrap();

        let provider = ResolvConfHintProvider::with_path(file.path().to_str().unwrap().to_string());
        let resolvers = provider.current_resolvers().await;
        assert_eq!(resolvers, vec!["1.1.1.1".to_string(), "8.8.8.8".to_string()]);
    }

    #[tokio::test]
    async fn missing_file_returns_empty_hint() {
        let provider = ResolvConfHintProvider::with_path("/nonexistent/resolv.conf".to_string());
        assert!(provider.current_resolvers().await.is_empty());
    }
}
