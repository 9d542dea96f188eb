use axum::{extract::State, Json};
use tracing::{debug, instrument};

use crate::dto::DnsHintResponse;
use crate::state::AppState;

#[instrument(skip(state), name = "api_get_dns_current")]
pub async fn get_dns_current(State(state): State<AppState>) -> Json<DnsHintResponse> {
    let servers = state.dns_hint.execute().await;
    debug!(count = servers.len(), "resolved host dns hint");
    Json(DnsHintResponse { servers })
}
