use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::middleware::enforce_network_policy;
use crate::state::AppState;
use crate::ws;

/// Builds the full router (§4.8). `/health` is exempt from network-policy
/// enforcement so liveness probes never depend on the policy document loading.
pub fn create_api_routes(state: AppState) -> Router {
    let policy_gated = Router::new()
        .route("/dns/current", get(handlers::get_dns_current))
        .route("/settings/local-dns", get(handlers::get_local_resolvers).put(handlers::put_local_resolvers))
        .route("/settings/public-dns", get(handlers::get_public_resolvers).put(handlers::put_public_resolvers))
        .route("/settings/test-config", get(handlers::get_test_profile).put(handlers::put_test_profile))
        .route("/settings/network-policy", get(handlers::get_network_policy).put(handlers::put_network_policy))
        .route("/benchmark/start", post(handlers::start_benchmark))
        .route("/benchmark/{id}/status", get(handlers::get_benchmark_status))
        .route("/benchmark/{id}/cancel", post(handlers::cancel_benchmark))
        .route("/results", get(handlers::list_results))
        .route("/results/{id}", get(handlers::get_result))
        .route("/results/{id}/domains", get(handlers::get_result_domains))
        .route("/results/{id}/failures", get(handlers::get_result_failures))
        .route("/results/{id}/export", get(handlers::export_result))
        .route("/ws/benchmark", get(ws::ws_benchmark))
        .layer(middleware::from_fn_with_state(state.clone(), enforce_network_policy));

    Router::new().route("/health", get(handlers::health_check)).merge(policy_gated).with_state(state)
}
