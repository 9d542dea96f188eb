use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use dnsbench_domain::{ProbeResult, Resolver, Run, RunStatus};
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::ports::{BenchmarkEvent, EventPublisher, ResolverProbe, RunRegistry, RunRepository, RunStartedResolver};
use crate::services::aggregator;

/// C2. Fans out `(resolver, domain)` probes for one run and drives it to a
/// terminal state. Runs as its own task, spawned by the `start_run` use case; the
/// caller does not await this function directly (`run(...) -> run_id` returns
/// immediately per §4.2).
pub async fn execute(
    mut run: Run,
    cancellation: CancellationToken,
    probe: Arc<dyn ResolverProbe>,
    registry: Arc<dyn RunRegistry>,
    events: Arc<dyn EventPublisher>,
    repository: Arc<dyn RunRepository>,
) {
    let run_id = run.id.clone();

    if let Err(err) = registry.transition(&run_id, RunStatus::Running).await {
        warn!(run_id = %run_id, error = %err, "failed to transition run to running");
        return;
    }
    if let Err(err) = run.transition(RunStatus::Running) {
        warn!(run_id = %run_id, error = %err, "failed to transition run struct to running");
        return;
    }

    let total_probes = run.total_probes() as u32;
    events
        .publish(BenchmarkEvent::RunStarted {
            run_id: run_id.clone(),
            total_probes,
            resolvers: run
                .resolvers
                .iter()
                .map(|r| RunStartedResolver { address: r.address.to_string(), display_name: r.display_name.clone() })
                .collect(),
            domains: run.domains.clone(),
        })
        .await;

    let started_at = Instant::now();
    let semaphore = Arc::new(Semaphore::new(run.profile.performance.max_concurrent_servers as usize));
    let completed = Arc::new(AtomicU32::new(0));
    let probes = Arc::new(tokio::sync::Mutex::new(Vec::<ProbeResult>::new()));

    let mut handles = Vec::with_capacity(run.resolvers.len());
    for resolver in run.resolvers.clone() {
        let semaphore = semaphore.clone();
        let cancellation = cancellation.clone();
        let probe = probe.clone();
        let registry = registry.clone();
        let events = events.clone();
        let probes = probes.clone();
        let completed = completed.clone();
        let domains = run.domains.clone();
        let run_id = run_id.clone();
        let profile = run.profile.clone();

        handles.push(tokio::spawn(async move {
            let _permit = match semaphore.acquire().await {
                Ok(permit) => permit,
                Err(_) => return,
            };
            run_server_worker(
                run_id,
                resolver,
                domains,
                profile.performance.query_timeout_ms,
                profile.performance.max_retries,
                profile.performance.inter_query_delay_ms,
                total_probes,
                cancellation,
                probe,
                registry,
                events,
                probes,
                completed,
            )
            .await;
        }));
    }

    for handle in handles {
        let _ = handle.await;
    }

    let final_probes = Arc::try_unwrap(probes).map(|m| m.into_inner()).unwrap_or_default();
    let (summaries, analyses) = aggregator::summarize(&run_id, &final_probes);

    let mut finished = run;
    let wallclock_exceeded = registry.observe(&run_id).await.map(|s| s.wallclock_exceeded).unwrap_or(false);
    let target_status = if wallclock_exceeded {
        RunStatus::Failed
    } else if cancellation.is_cancelled() {
        RunStatus::Cancelled
    } else {
        RunStatus::Completed
    };

    if let Err(err) = finished.transition(target_status) {
        warn!(run_id = %run_id, error = %err, "failed to transition run struct to terminal status");
    }

    match repository.persist_run(&finished, &summaries, &final_probes, &analyses).await {
        Ok(()) => {
            if let Err(err) = registry.transition(&run_id, target_status).await {
                warn!(run_id = %run_id, error = %err, "failed to transition run to terminal status");
            }
            match target_status {
                RunStatus::Cancelled => {
                    events.publish(BenchmarkEvent::RunCancelled { run_id: run_id.clone() }).await;
                }
                RunStatus::Failed => {
                    events
                        .publish(BenchmarkEvent::RunError { run_id: run_id.clone(), message: "run_wallclock_exceeded".to_string() })
                        .await;
                }
                _ => {
                    events
                        .publish(BenchmarkEvent::RunComplete {
                            run_id: run_id.clone(),
                            duration_ms: started_at.elapsed().as_secs_f64() * 1000.0,
                            summaries,
                        })
                        .await;
                }
            }
            info!(run_id = %run_id, status = ?target_status, probes = final_probes.len(), "run finished");
        }
        Err(err) => {
            warn!(run_id = %run_id, error = %err, "failed to persist run, marking failed");
            let _ = registry.transition(&run_id, RunStatus::Failed).await;
            events
                .publish(BenchmarkEvent::RunError { run_id: run_id.clone(), message: err.to_string() })
                .await;
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_server_worker(
    run_id: String,
    resolver: Resolver,
    domains: Vec<String>,
    query_timeout_ms: u32,
    max_retries: u32,
    inter_query_delay_ms: u32,
    total_probes: u32,
    cancellation: CancellationToken,
    probe: Arc<dyn ResolverProbe>,
    registry: Arc<dyn RunRegistry>,
    events: Arc<dyn EventPublisher>,
    probes: Arc<tokio::sync::Mutex<Vec<ProbeResult>>>,
    completed: Arc<AtomicU32>,
) {
    let mut running_sum_ms = 0.0;
    let mut running_successful = 0u32;
    let mut running_total = 0u32;

    for domain in domains {
        if cancellation.is_cancelled() {
            break;
        }

        let mut attempt_result = probe.probe(&run_id, &resolver, &domain, query_timeout_ms).await;
        let mut attempts_left = max_retries;
        while !attempt_result.success && attempts_left > 0 && !cancellation.is_cancelled() {
            attempts_left -= 1;
            if inter_query_delay_ms > 0 {
                sleep_or_cancel(Duration::from_millis(inter_query_delay_ms as u64), &cancellation).await;
            }
            attempt_result = probe.probe(&run_id, &resolver, &domain, query_timeout_ms).await;
        }

        running_total += 1;
        if attempt_result.success {
            running_successful += 1;
            running_sum_ms += attempt_result.elapsed_ms;
        }

        let completed_count = completed.fetch_add(1, Ordering::SeqCst) + 1;

        events
            .publish(BenchmarkEvent::ProbeResult {
                run_id: run_id.clone(),
                resolver_address: attempt_result.resolver_address.clone(),
                resolver_display_name: attempt_result.resolver_display_name.clone(),
                domain: attempt_result.domain.clone(),
                success: attempt_result.success,
                elapsed_ms: attempt_result.elapsed_ms,
                timing_source: attempt_result.timing_source,
                error_kind: if attempt_result.success { None } else { Some(attempt_result.error_kind) },
                response_code: if attempt_result.success { None } else { Some(attempt_result.response_code) },
                resolved_ip: attempt_result.resolved_ip.clone(),
                completed_count,
                total_probes,
            })
            .await;

        events
            .publish(BenchmarkEvent::ServerProgress {
                run_id: run_id.clone(),
                resolver_address: resolver.address.to_string(),
                running_avg_ms: if running_successful > 0 { Some(running_sum_ms / running_successful as f64) } else { None },
                successful: running_successful,
                total: running_total,
                in_flight: true,
            })
            .await;

        let _ = registry.advance_progress(&run_id).await;
        probes.lock().await.push(attempt_result);

        if inter_query_delay_ms > 0 {
            sleep_or_cancel(Duration::from_millis(inter_query_delay_ms as u64), &cancellation).await;
        }
    }

    events
        .publish(BenchmarkEvent::ServerProgress {
            run_id,
            resolver_address: resolver.address.to_string(),
            running_avg_ms: if running_successful > 0 { Some(running_sum_ms / running_successful as f64) } else { None },
            successful: running_successful,
            total: running_total,
            in_flight: false,
        })
        .await;
}

async fn sleep_or_cancel(duration: Duration, cancellation: &CancellationToken) {
    tokio::select! {
        _ = tokio::time::sleep(duration) => {}
        _ = cancellation.cancelled() => {}
    }
}
