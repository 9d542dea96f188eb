use axum::Json;
use tracing::instrument;

use crate::dto::HealthResponse;

#[instrument]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}
