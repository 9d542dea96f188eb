use std::net::IpAddr;
use std::str::FromStr;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use dnsbench_domain::config::NetworkPolicy;
use serde_json::json;
use tracing::warn;

use crate::state::AppState;

/// §4.8 network policy enforcement: every request's `Origin` header is checked
/// against the current `network_policy` document before the handler runs.
/// Requests without an `Origin` header (direct server-to-server calls, curl, the
/// CLI) are not browser-originated cross-origin requests and are let through
/// unconditionally — there is nothing for this policy to adjudicate.
pub async fn enforce_network_policy(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let origin = request.headers().get(axum::http::header::ORIGIN).and_then(|v| v.to_str().ok()).map(str::to_string);

    let Some(origin) = origin else {
        return next.run(request).await;
    };

    let policy = match state.settings.network_policy.get().await {
        Ok(policy) => policy,
        Err(err) => {
            warn!(error = %err, "failed to load network policy, rejecting request");
            return rejected("network policy unavailable");
        }
    };

    match origin_host(&origin) {
        Some(host) if is_allowed(&policy, &host) => next.run(request).await,
        _ => {
            warn!(origin = %origin, "rejected request by network policy");
            rejected("origin not permitted")
        }
    }
}

fn is_allowed(policy: &NetworkPolicy, host: &str) -> bool {
    if is_localhost(host) {
        return true;
    }
    if policy.custom_origins.iter().any(|o| o == host) {
        return true;
    }
    match IpAddr::from_str(host) {
        Ok(_) => policy.allow_ip_access,
        Err(_) => policy.allow_hostname_access,
    }
}

fn is_localhost(host: &str) -> bool {
    if host.eq_ignore_ascii_case("localhost") {
        return true;
    }
    IpAddr::from_str(host).map(|ip| ip.is_loopback()).unwrap_or(false)
}

/// Extracts the bare host from an `Origin` header value (`scheme://host[:port]`),
/// stripping brackets from IPv6 literals.
fn origin_host(origin: &str) -> Option<String> {
    let rest = origin.split("://").nth(1).unwrap_or(origin);
    if let Some(bracketed) = rest.strip_prefix('[') {
        return bracketed.split(']').next().map(str::to_string);
    }
    let host = rest.split(':').next().unwrap_or(rest);
    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}

fn rejected(message: &str) -> Response {
    (StatusCode::FORBIDDEN, Json(json!({ "code": "origin_not_permitted", "message": message }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_scheme_and_port() {
        assert_eq!(origin_host("https://example.com:8443").as_deref(), Some("example.com"));
        assert_eq!(origin_host("http://192.168.1.5").as_deref(), Some("192.168.1.5"));
    }

    #[test]
    fn strips_ipv6_brackets() {
        assert_eq!(origin_host("http://[::1]:3000").as_deref(), Some("::1"));
    }

    #[test]
    fn localhost_always_allowed() {
        let policy = NetworkPolicy { allow_ip_access: false, allow_hostname_access: false, custom_origins: vec![] };
        assert!(is_allowed(&policy, "localhost"));
        assert!(is_allowed(&policy, "127.0.0.1"));
        assert!(is_allowed(&policy, "::1"));
    }

    #[test]
    fn ip_origin_gated_by_allow_ip_access() {
        let mut policy = NetworkPolicy { allow_ip_access: false, allow_hostname_access: true, custom_origins: vec![] };
        assert!(!is_allowed(&policy, "203.0.113.9"));
        policy.allow_ip_access = true;
        assert!(is_allowed(&policy, "203.0.113.9"));
    }

    #[test]
    fn custom_origin_always_allowed() {
        let policy = NetworkPolicy { allow_ip_access: false, allow_hostname_access: false, custom_origins: vec!["bench.internal".to_string()] };
        assert!(is_allowed(&policy, "bench.internal"));
    }
}
