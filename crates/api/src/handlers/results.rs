use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use dnsbench_application::use_cases::ExportFormat;
use serde::Deserialize;
use tracing::instrument;

use crate::dto::{FailuresResponse, ProbesResponse, RunDetailResponse, RunListResponse};
use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

fn default_limit() -> u32 {
    50
}

#[instrument(skip(state), name = "api_list_results")]
pub async fn list_results(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<RunListResponse>, ApiError> {
    let page = state.results.list_runs.execute(query.limit, query.offset).await?;
    Ok(Json(RunListResponse { results: page.runs, total: page.total }))
}

#[instrument(skip(state), name = "api_get_result")]
pub async fn get_result(
    State(state): State<AppState>,
    Path(run_id): Path<String>,
) -> Result<Json<RunDetailResponse>, ApiError> {
    let record = state.results.get_run.execute(&run_id).await?;
    Ok(Json(RunDetailResponse::from(record)))
}

#[instrument(skip(state), name = "api_get_result_domains")]
pub async fn get_result_domains(
    State(state): State<AppState>,
    Path(run_id): Path<String>,
) -> Result<Json<ProbesResponse>, ApiError> {
    let probes = state.results.get_domains.execute(&run_id).await?;
    Ok(Json(ProbesResponse { probes }))
}

#[instrument(skip(state), name = "api_get_result_failures")]
pub async fn get_result_failures(
    State(state): State<AppState>,
    Path(run_id): Path<String>,
) -> Result<Json<FailuresResponse>, ApiError> {
    let analyses = state.results.get_failures.execute(&run_id).await?;
    Ok(Json(FailuresResponse { analyses }))
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "json".to_string()
}

/// `GET /results/{id}/export?format=json|csv` (§6): `format` outside the two
/// accepted values falls back to `json` rather than erroring, since the export is
/// a convenience projection, not an input the run's correctness depends on.
#[instrument(skip(state), name = "api_export_result")]
pub async fn export_result(
    State(state): State<AppState>,
    Path(run_id): Path<String>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, ApiError> {
    let format = match query.format.as_str() {
        "csv" => ExportFormat::Csv,
        _ => ExportFormat::Json,
    };
    let exported = state.results.export_run.execute(&run_id, format).await?;
    Ok((StatusCode::OK, [(header::CONTENT_TYPE, exported.content_type)], exported.body).into_response())
}
