use std::net::SocketAddr;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dnsbench_application::ports::ResolverProbe;
use dnsbench_domain::{ErrorKind, ProbeResult, Resolver, ResponseCode, TimingSource};
use hickory_resolver::config::{NameServerConfig, Protocol, ResolverConfig, ResolverOpts};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::proto::ProtoErrorKind;
use hickory_resolver::{ResolveError, ResolveErrorKind, Resolver as HickoryResolver};
use tracing::debug;

/// C1. Each call builds a resolver scoped to exactly one server (§4.1 design
/// rule (a), §9 "global resolver mutation" redesign note) — no shared mutable
/// resolver state between concurrent probes.
pub struct HickoryResolverProbe;

impl HickoryResolverProbe {
    pub fn new() -> Self {
        Self
    }

    fn build_resolver(resolver_addr: SocketAddr, timeout_ms: u32) -> HickoryResolver<TokioConnectionProvider> {
        let mut config = ResolverConfig::new();
        config.add_name_server(NameServerConfig::new(resolver_addr, Protocol::Udp));

        let mut opts = ResolverOpts::default();
        opts.timeout = Duration::from_millis(timeout_ms as u64);
        // Retries are owned by the scheduler (§4.1): one attempt per probe call.
        opts.attempts = 1;

        HickoryResolver::builder_with_config(config, TokioConnectionProvider::default())
            .with_options(opts)
            .build()
    }
}

impl Default for HickoryResolverProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResolverProbe for HickoryResolverProbe {
    async fn probe(&self, run_id: &str, resolver: &Resolver, domain: &str, timeout_ms: u32) -> ProbeResult {
        let resolver_addr = SocketAddr::new(resolver.address, 53);
        let handle = Self::build_resolver(resolver_addr, timeout_ms);

        let deadline = Duration::from_millis(timeout_ms as u64);
        let started = Instant::now();
        let outcome = tokio::time::timeout(deadline, handle.ipv4_lookup(domain)).await;
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        let resolver_address = resolver.address.to_string();
        let resolver_display_name = resolver.display_name.clone();

        match outcome {
            Err(_elapsed) => {
                debug!(run_id, %resolver_address, domain, "probe deadline exceeded");
                ProbeResult::failure(
                    run_id,
                    resolver_address,
                    resolver_display_name,
                    domain,
                    timeout_ms as f64,
                    TimingSource::HighPrecision,
                    ResponseCode::Timeout,
                    ErrorKind::DnsTimeout,
                    None,
                )
            }
            Ok(Ok(lookup)) => match lookup.iter().next() {
                Some(record) => ProbeResult::success(
                    run_id,
                    resolver_address,
                    resolver_display_name,
                    domain,
                    elapsed_ms,
                    TimingSource::HighPrecision,
                    record.0.to_string(),
                    Some(format!("{} A record(s)", lookup.iter().count())),
                ),
                None => ProbeResult::failure(
                    run_id,
                    resolver_address,
                    resolver_display_name,
                    domain,
                    elapsed_ms,
                    TimingSource::HighPrecision,
                    ResponseCode::NoError,
                    ErrorKind::NoData,
                    None,
                ),
            },
            Ok(Err(err)) => {
                let (response_code, error_kind) = classify(&err);
                ProbeResult::failure(
                    run_id,
                    resolver_address,
                    resolver_display_name,
                    domain,
                    elapsed_ms,
                    TimingSource::HighPrecision,
                    response_code,
                    error_kind,
                    Some(err.to_string()),
                )
            }
        }
    }
}

fn classify(err: &ResolveError) -> (ResponseCode, ErrorKind) {
    match err.kind() {
        ResolveErrorKind::Timeout => (ResponseCode::Timeout, ErrorKind::DnsTimeout),
        ResolveErrorKind::NoRecordsFound { response_code, .. } => {
            let code_str = response_code.to_string();
            if code_str.eq_ignore_ascii_case("NXDOMAIN") {
                (ResponseCode::Nxdomain, ErrorKind::NxDomain)
            } else if code_str.eq_ignore_ascii_case("SERVFAIL") {
                (ResponseCode::Servfail, ErrorKind::ServerFail)
            } else if code_str.eq_ignore_ascii_case("REFUSED") {
                (ResponseCode::Refused, ErrorKind::Refused)
            } else {
                (ResponseCode::NoError, ErrorKind::NoData)
            }
        }
        ResolveErrorKind::Proto(proto_err) => match proto_err.kind() {
            ProtoErrorKind::Timeout => (ResponseCode::Timeout, ErrorKind::DnsTimeout),
            ProtoErrorKind::Io(_) => (ResponseCode::Other, ErrorKind::Network),
            _ => (ResponseCode::Other, ErrorKind::Unknown),
        },
        _ => (ResponseCode::Other, ErrorKind::Unknown),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolver_target_uses_standard_dns_port() {
        let addr = SocketAddr::new("1.1.1.1".parse().unwrap(), 53);
        assert_eq!(addr.port(), 53);
    }
}
