use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dnsbench_application::ports::{RunListPage, RunRecord, RunRepository};
use dnsbench_domain::{
    DomainError, ErrorKind, FailureAnalysis, FailurePattern, ProbeResult, ResponseCode, Resolver, Run, RunKind, RunStatus,
    ServerSummary, TestProfile, TimingPrecision, TimingSource, UpstreamHint,
};
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use tracing::{error, instrument};

/// Write-once snapshot of the (resolvers, domains, profile) a run started with
/// (§3: historical runs never reflect later configuration edits), stored as a
/// single JSON blob in the `runs.run_config` column.
#[derive(Debug, Serialize, Deserialize)]
struct RunConfigSnapshot {
    resolvers: Vec<Resolver>,
    domains: Vec<String>,
    profile: TestProfile,
}

pub struct SqliteRunRepository {
    pool: SqlitePool,
}

impl SqliteRunRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RunRepository for SqliteRunRepository {
    #[instrument(skip(self, run, summaries, probes, analyses))]
    async fn persist_run(&self, run: &Run, summaries: &[ServerSummary], probes: &[ProbeResult], analyses: &[FailureAnalysis]) -> Result<(), DomainError> {
        let config = RunConfigSnapshot { resolvers: run.resolvers.clone(), domains: run.domains.clone(), profile: run.profile.clone() };
        let config_json = serde_json::to_string(&config).map_err(|e| DomainError::Store(e.to_string()))?;

        let mut tx = self.pool.begin().await.map_err(|e| DomainError::Store(e.to_string()))?;

        sqlx::query(
            "INSERT INTO runs (run_id, kind, status, total_probes, started_at, finished_at, run_config)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(run_id) DO UPDATE SET
                status = excluded.status, finished_at = excluded.finished_at, run_config = excluded.run_config",
        )
        .bind(&run.id)
        .bind(run.kind.as_str())
        .bind(run.status.as_str())
        .bind(run.total_probes() as i64)
        .bind(run.started_at.to_rfc3339())
        .bind(run.completed_at.map(|t| t.to_rfc3339()))
        .bind(&config_json)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!(error = %e, run_id = %run.id, "failed to upsert run row");
            DomainError::Store(e.to_string())
        })?;

        sqlx::query("DELETE FROM server_summaries WHERE run_id = ?").bind(&run.id).execute(&mut *tx).await.map_err(|e| DomainError::Store(e.to_string()))?;
        sqlx::query("DELETE FROM probe_results WHERE run_id = ?").bind(&run.id).execute(&mut *tx).await.map_err(|e| DomainError::Store(e.to_string()))?;
        sqlx::query("DELETE FROM failure_analyses WHERE run_id = ?").bind(&run.id).execute(&mut *tx).await.map_err(|e| DomainError::Store(e.to_string()))?;

        for (rank, summary) in summaries.iter().enumerate() {
            sqlx::query(
                "INSERT INTO server_summaries
                    (run_id, resolver_address, display_name, total, successful, success_rate_pct, avg_ms, min_ms, max_ms, median_ms, timing_precision, rank)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&summary.run_id)
            .bind(&summary.resolver_address)
            .bind(&summary.display_name)
            .bind(summary.total as i64)
            .bind(summary.successful as i64)
            .bind(summary.success_rate_pct)
            .bind(summary.avg_ms)
            .bind(summary.min_ms)
            .bind(summary.max_ms)
            .bind(summary.median_ms)
            .bind(summary.timing_precision.as_str())
            .bind(rank as i64)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;
        }

        for probe in probes {
            sqlx::query(
                "INSERT INTO probe_results
                    (run_id, resolver_address, domain, success, elapsed_ms, timing_source, response_code, error_kind, resolved_ip, raw_summary, observed_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&probe.run_id)
            .bind(&probe.resolver_address)
            .bind(&probe.domain)
            .bind(probe.success)
            .bind(probe.elapsed_ms)
            .bind(probe.timing_source.as_str())
            .bind(probe.response_code.as_str())
            .bind(probe.error_kind.as_str())
            .bind(&probe.resolved_ip)
            .bind(&probe.raw_summary)
            .bind(probe.observed_at.to_rfc3339())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;
        }

        for analysis in analyses {
            sqlx::query(
                "INSERT INTO failure_analyses (run_id, domain, failed_on_all_resolvers, failure_pattern, upstream_hint)
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(&analysis.run_id)
            .bind(&analysis.domain)
            .bind(analysis.failed_on_all_resolvers)
            .bind(analysis.failure_pattern.as_str())
            .bind(analysis.upstream_hint.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;
        }

        tx.commit().await.map_err(|e| DomainError::Store(e.to_string()))?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_run(&self, run_id: &str) -> Result<RunRecord, DomainError> {
        let run = fetch_run(&self.pool, run_id).await?;
        let summaries = fetch_summaries(&self.pool, run_id).await?;
        let probes = fetch_probes(&self.pool, run_id).await?;
        let analyses = fetch_failures(&self.pool, run_id).await?;
        Ok(RunRecord { run, summaries, probes, analyses })
    }

    #[instrument(skip(self))]
    async fn list_runs(&self, limit: u32, offset: u32) -> Result<RunListPage, DomainError> {
        let rows = sqlx::query("SELECT run_id FROM runs ORDER BY started_at DESC LIMIT ? OFFSET ?")
            .bind(limit as i64)
            .bind(offset as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;

        let mut runs = Vec::with_capacity(rows.len());
        for row in rows {
            let run_id: String = row.get("run_id");
            runs.push(fetch_run(&self.pool, &run_id).await?);
        }

        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM runs").fetch_one(&self.pool).await.map_err(|e| DomainError::Store(e.to_string()))?;

        Ok(RunListPage { runs, total: total.0 as u64 })
    }

    async fn get_probes(&self, run_id: &str) -> Result<Vec<ProbeResult>, DomainError> {
        fetch_probes(&self.pool, run_id).await
    }

    async fn get_failures(&self, run_id: &str) -> Result<Vec<FailureAnalysis>, DomainError> {
        fetch_failures(&self.pool, run_id).await
    }
}

async fn fetch_run(pool: &SqlitePool, run_id: &str) -> Result<Run, DomainError> {
    let row = sqlx::query("SELECT run_id, kind, status, started_at, finished_at, run_config FROM runs WHERE run_id = ?")
        .bind(run_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            error!(error = %e, run_id, "failed to fetch run row");
            DomainError::Store(e.to_string())
        })?
        .ok_or_else(|| DomainError::RunNotFound(run_id.to_string()))?;

    let config_json: String = row.get("run_config");
    let config: RunConfigSnapshot = serde_json::from_str(&config_json).map_err(|e| DomainError::Store(e.to_string()))?;

    let started_at_raw: String = row.get("started_at");
    let started_at = parse_timestamp(&started_at_raw)?;
    let finished_at_raw: Option<String> = row.get("finished_at");
    let completed_at = finished_at_raw.map(|raw| parse_timestamp(&raw)).transpose()?;

    let kind_raw: String = row.get("kind");
    let kind = RunKind::from_str(&kind_raw)?;
    let status_raw: String = row.get("status");
    let status = parse_run_status(&status_raw)?;

    Ok(Run { id: run_id.to_string(), kind, status, started_at, completed_at, resolvers: config.resolvers, domains: config.domains, profile: config.profile })
}

async fn fetch_summaries(pool: &SqlitePool, run_id: &str) -> Result<Vec<ServerSummary>, DomainError> {
    let rows = sqlx::query(
        "SELECT run_id, resolver_address, display_name, total, successful, success_rate_pct, avg_ms, min_ms, max_ms, median_ms, timing_precision
         FROM server_summaries WHERE run_id = ? ORDER BY rank ASC",
    )
    .bind(run_id)
    .fetch_all(pool)
    .await
    .map_err(|e| DomainError::Store(e.to_string()))?;

    rows.into_iter()
        .map(|row| {
            let total: i64 = row.get("total");
            let successful: i64 = row.get("successful");
            let timing_precision_raw: String = row.get("timing_precision");
            Ok(ServerSummary {
                run_id: row.get("run_id"),
                resolver_address: row.get("resolver_address"),
                display_name: row.get("display_name"),
                total: total as u32,
                successful: successful as u32,
                failed: (total - successful) as u32,
                success_rate_pct: row.get("success_rate_pct"),
                avg_ms: row.get("avg_ms"),
                min_ms: row.get("min_ms"),
                max_ms: row.get("max_ms"),
                median_ms: row.get("median_ms"),
                timing_precision: parse_timing_precision(&timing_precision_raw)?,
            })
        })
        .collect()
}

async fn fetch_probes(pool: &SqlitePool, run_id: &str) -> Result<Vec<ProbeResult>, DomainError> {
    let rows = sqlx::query(
        "SELECT run_id, resolver_address, domain, success, elapsed_ms, timing_source, response_code, error_kind, resolved_ip, raw_summary, observed_at
         FROM probe_results WHERE run_id = ? ORDER BY observed_at ASC",
    )
    .bind(run_id)
    .fetch_all(pool)
    .await
    .map_err(|e| DomainError::Store(e.to_string()))?;

    rows.into_iter()
        .map(|row| {
            let timing_source_raw: String = row.get("timing_source");
            let response_code_raw: String = row.get("response_code");
            let error_kind_raw: String = row.get("error_kind");
            let observed_at_raw: String = row.get("observed_at");
            Ok(ProbeResult {
                run_id: row.get("run_id"),
                resolver_address: row.get("resolver_address"),
                domain: row.get("domain"),
                success: row.get("success"),
                elapsed_ms: row.get("elapsed_ms"),
                timing_source: parse_timing_source(&timing_source_raw)?,
                response_code: parse_response_code(&response_code_raw)?,
                error_kind: parse_error_kind(&error_kind_raw)?,
                resolved_ip: row.get("resolved_ip"),
                raw_summary: row.get("raw_summary"),
                observed_at: parse_timestamp(&observed_at_raw)?,
            })
        })
        .collect()
}

async fn fetch_failures(pool: &SqlitePool, run_id: &str) -> Result<Vec<FailureAnalysis>, DomainError> {
    let rows = sqlx::query("SELECT run_id, domain, failed_on_all_resolvers, failure_pattern, upstream_hint FROM failure_analyses WHERE run_id = ?")
        .bind(run_id)
        .fetch_all(pool)
        .await
        .map_err(|e| DomainError::Store(e.to_string()))?;

    rows.into_iter()
        .map(|row| {
            let pattern_raw: String = row.get("failure_pattern");
            let hint_raw: String = row.get("upstream_hint");
            Ok(FailureAnalysis {
                run_id: row.get("run_id"),
                domain: row.get("domain"),
                failed_on_all_resolvers: row.get("failed_on_all_resolvers"),
                failure_pattern: parse_failure_pattern(&pattern_raw)?,
                upstream_hint: parse_upstream_hint(&hint_raw)?,
            })
        })
        .collect()
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DomainError> {
    DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc)).map_err(|e| DomainError::Store(e.to_string()))
}

fn parse_run_status(raw: &str) -> Result<RunStatus, DomainError> {
    match raw {
        "pending" => Ok(RunStatus::Pending),
        "running" => Ok(RunStatus::Running),
        "completed" => Ok(RunStatus::Completed),
        "cancelled" => Ok(RunStatus::Cancelled),
        "failed" => Ok(RunStatus::Failed),
        other => Err(DomainError::Store(format!("unknown run status in store: {other}"))),
    }
}

fn parse_timing_source(raw: &str) -> Result<TimingSource, DomainError> {
    match raw {
        "high_precision" => Ok(TimingSource::HighPrecision),
        "fallback" => Ok(TimingSource::Fallback),
        other => Err(DomainError::Store(format!("unknown timing source in store: {other}"))),
    }
}

fn parse_timing_precision(raw: &str) -> Result<TimingPrecision, DomainError> {
    match raw {
        "high_precision" => Ok(TimingPrecision::HighPrecision),
        "fallback" => Ok(TimingPrecision::Fallback),
        "mixed" => Ok(TimingPrecision::Mixed),
        other => Err(DomainError::Store(format!("unknown timing precision in store: {other}"))),
    }
}

fn parse_response_code(raw: &str) -> Result<ResponseCode, DomainError> {
    match raw {
        "NOERROR" => Ok(ResponseCode::NoError),
        "NXDOMAIN" => Ok(ResponseCode::Nxdomain),
        "SERVFAIL" => Ok(ResponseCode::Servfail),
        "TIMEOUT" => Ok(ResponseCode::Timeout),
        "REFUSED" => Ok(ResponseCode::Refused),
        "OTHER" => Ok(ResponseCode::Other),
        other => Err(DomainError::Store(format!("unknown response code in store: {other}"))),
    }
}

fn parse_error_kind(raw: &str) -> Result<ErrorKind, DomainError> {
    match raw {
        "none" => Ok(ErrorKind::None),
        "DNS_TIMEOUT" => Ok(ErrorKind::DnsTimeout),
        "NO_DATA" => Ok(ErrorKind::NoData),
        "NX_DOMAIN" => Ok(ErrorKind::NxDomain),
        "SERVER_FAIL" => Ok(ErrorKind::ServerFail),
        "REFUSED" => Ok(ErrorKind::Refused),
        "NETWORK" => Ok(ErrorKind::Network),
        "UNKNOWN" => Ok(ErrorKind::Unknown),
        other => Err(DomainError::Store(format!("unknown error kind in store: {other}"))),
    }
}

fn parse_failure_pattern(raw: &str) -> Result<FailurePattern, DomainError> {
    match raw {
        "consistent_timeout" => Ok(FailurePattern::ConsistentTimeout),
        "consistent_nxdomain" => Ok(FailurePattern::ConsistentNxdomain),
        "mixed_errors" => Ok(FailurePattern::MixedErrors),
        "server_specific" => Ok(FailurePattern::ServerSpecific),
        other => Err(DomainError::Store(format!("unknown failure pattern in store: {other}"))),
    }
}

fn parse_upstream_hint(raw: &str) -> Result<UpstreamHint, DomainError> {
    match raw {
        "likely_upstream_blocked" => Ok(UpstreamHint::LikelyUpstreamBlocked),
        "likely_local_issue" => Ok(UpstreamHint::LikelyLocalIssue),
        "unknown" => Ok(UpstreamHint::Unknown),
        other => Err(DomainError::Store(format!("unknown upstream hint in store: {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnsbench_domain::{Resolver, ResolverOrigin};
    use std::net::IpAddr;
    use std::str::FromStr as _;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePool::connect(":memory:").await.unwrap();
        sqlx::migrate::Migrator::new(std::path::Path::new("./migrations")).await.unwrap().run(&pool).await.unwrap();
        pool
    }

    fn sample_run() -> Run {
        let resolver = Resolver::new("r1", IpAddr::from_str("8.8.8.8").unwrap(), "Google", "Google", ResolverOrigin::BuiltInPublic);
        let mut run = Run::new("run-test".into(), RunKind::Custom, vec![resolver], vec!["example.com".into()], TestProfile::default());
        run.transition(RunStatus::Running).unwrap();
        run.transition(RunStatus::Completed).unwrap();
        run
    }

    #[tokio::test]
    async fn persist_then_get_round_trips_a_run() {
        let pool = test_pool().await;
        let repo = SqliteRunRepository::new(pool);
        let run = sample_run();
        let probe = ProbeResult::success("run-test", "8.8.8.8", "Google", "example.com", 12.0, TimingSource::HighPrecision, "93.184.216.34".into(), None);
        let summary = ServerSummary {
            run_id: "run-test".into(),
            resolver_address: "8.8.8.8".into(),
            display_name: "Google".into(),
            total: 1,
            successful: 1,
            failed: 0,
            success_rate_pct: 100.0,
            avg_ms: Some(12.0),
            min_ms: Some(12.0),
            max_ms: Some(12.0),
            median_ms: Some(12.0),
            timing_precision: TimingPrecision::HighPrecision,
        };

        repo.persist_run(&run, &[summary], &[probe], &[]).await.unwrap();

        let record = repo.get_run("run-test").await.unwrap();
        assert_eq!(record.run.status, RunStatus::Completed);
        assert_eq!(record.probes.len(), 1);
        assert_eq!(record.summaries.len(), 1);
    }

    #[tokio::test]
    async fn get_run_on_missing_id_is_not_found() {
        let pool = test_pool().await;
        let repo = SqliteRunRepository::new(pool);
        assert!(matches!(repo.get_run("nope").await, Err(DomainError::RunNotFound(_))));
    }

    #[tokio::test]
    async fn list_runs_reports_total_count() {
        let pool = test_pool().await;
        let repo = SqliteRunRepository::new(pool);
        repo.persist_run(&sample_run(), &[], &[], &[]).await.unwrap();
        let page = repo.list_runs(10, 0).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.runs.len(), 1);
    }
}
