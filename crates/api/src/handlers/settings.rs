use axum::{extract::State, Json};
use dnsbench_domain::config::{LocalResolversDocument, NetworkPolicy, PublicResolversDocument};
use dnsbench_domain::TestProfile;
use tracing::instrument;

use crate::errors::ApiError;
use crate::state::AppState;

#[instrument(skip(state), name = "api_get_local_dns_settings")]
pub async fn get_local_resolvers(State(state): State<AppState>) -> Result<Json<LocalResolversDocument>, ApiError> {
    Ok(Json(state.settings.local_resolvers.get().await?))
}

#[instrument(skip(state, body), name = "api_put_local_dns_settings")]
pub async fn put_local_resolvers(
    State(state): State<AppState>,
    Json(body): Json<LocalResolversDocument>,
) -> Result<Json<LocalResolversDocument>, ApiError> {
    Ok(Json(state.settings.local_resolvers.replace(body).await?))
}

#[instrument(skip(state), name = "api_get_public_dns_settings")]
pub async fn get_public_resolvers(State(state): State<AppState>) -> Result<Json<PublicResolversDocument>, ApiError> {
    Ok(Json(state.settings.public_resolvers.get().await?))
}

#[instrument(skip(state, body), name = "api_put_public_dns_settings")]
pub async fn put_public_resolvers(
    State(state): State<AppState>,
    Json(body): Json<PublicResolversDocument>,
) -> Result<Json<PublicResolversDocument>, ApiError> {
    Ok(Json(state.settings.public_resolvers.replace(body).await?))
}

#[instrument(skip(state), name = "api_get_test_config")]
pub async fn get_test_profile(State(state): State<AppState>) -> Result<Json<TestProfile>, ApiError> {
    Ok(Json(state.settings.test_profile.get().await?))
}

#[instrument(skip(state, body), name = "api_put_test_config")]
pub async fn put_test_profile(
    State(state): State<AppState>,
    Json(body): Json<TestProfile>,
) -> Result<Json<TestProfile>, ApiError> {
    Ok(Json(state.settings.test_profile.replace(body).await?))
}

#[instrument(skip(state), name = "api_get_network_policy")]
pub async fn get_network_policy(State(state): State<AppState>) -> Result<Json<NetworkPolicy>, ApiError> {
    Ok(Json(state.settings.network_policy.get().await?))
}

#[instrument(skip(state, body), name = "api_put_network_policy")]
pub async fn put_network_policy(
    State(state): State<AppState>,
    Json(body): Json<NetworkPolicy>,
) -> Result<Json<NetworkPolicy>, ApiError> {
    Ok(Json(state.settings.network_policy.replace(body).await?))
}
