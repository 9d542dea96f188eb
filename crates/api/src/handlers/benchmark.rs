use std::str::FromStr;

use axum::{
    extract::{Path, State},
    Json,
};
use dnsbench_application::use_cases::StartRunRequest;
use dnsbench_domain::RunKind;
use tracing::{info, instrument};

use crate::dto::{CancelRunResponse, RunStatusResponse, StartRunBody, StartRunResponse};
use crate::errors::ApiError;
use crate::state::AppState;

#[instrument(skip(state, body), name = "api_start_benchmark")]
pub async fn start_benchmark(
    State(state): State<AppState>,
    Json(body): Json<StartRunBody>,
) -> Result<Json<StartRunResponse>, ApiError> {
    let kind = RunKind::from_str(&body.kind).map_err(ApiError::from)?;
    let request = StartRunRequest { kind, resolvers: body.resolvers, domains: body.domains, profile_overrides: body.profile_overrides };
    let run_id = state.benchmark.start_run.execute(request).await?;
    info!(run_id = %run_id, kind = body.kind, "benchmark run started");
    Ok(Json(StartRunResponse { run_id, status: "started" }))
}

#[instrument(skip(state), name = "api_get_benchmark_status")]
pub async fn get_benchmark_status(
    State(state): State<AppState>,
    Path(run_id): Path<String>,
) -> Result<Json<RunStatusResponse>, ApiError> {
    let snapshot = state.benchmark.get_status.execute(&run_id).await?;
    Ok(Json(RunStatusResponse {
        status: snapshot.status.as_str(),
        completed_count: snapshot.completed_count,
        total_probes: snapshot.total_probes,
    }))
}

#[instrument(skip(state), name = "api_cancel_benchmark")]
pub async fn cancel_benchmark(
    State(state): State<AppState>,
    Path(run_id): Path<String>,
) -> Result<Json<CancelRunResponse>, ApiError> {
    state.benchmark.cancel_run.execute(&run_id).await?;
    Ok(Json(CancelRunResponse { status: "cancelled" }))
}
