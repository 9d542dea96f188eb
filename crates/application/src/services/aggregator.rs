use std::cmp::Ordering;
use std::collections::HashMap;

use dnsbench_domain::{ErrorKind, FailureAnalysis, FailurePattern, ProbeResult, ServerSummary, TimingPrecision, UpstreamHint};

/// C3. Pure function of a run's probes (§4.3): must be re-runnable on stored data
/// to reproduce byte-identical output.
pub fn summarize(run_id: &str, probes: &[ProbeResult]) -> (Vec<ServerSummary>, Vec<FailureAnalysis>) {
    let mut summaries = per_server_summaries(run_id, probes);
    summaries.sort_by(rank_servers);
    let analyses = failure_analyses(run_id, probes);
    (summaries, analyses)
}

fn per_server_summaries(run_id: &str, probes: &[ProbeResult]) -> Vec<ServerSummary> {
    struct Bucket {
        display_name: String,
        total: u32,
        successful: u32,
        elapsed: Vec<f64>,
        saw_high_precision: bool,
        saw_fallback: bool,
    }

    let mut by_server: Vec<(String, Bucket)> = Vec::new();
    let index_of = |servers: &Vec<(String, Bucket)>, addr: &str| servers.iter().position(|(a, _)| a == addr);

    for probe in probes {
        let idx = match index_of(&by_server, &probe.resolver_address) {
            Some(i) => i,
            None => {
                by_server.push((
                    probe.resolver_address.clone(),
                    Bucket {
                        display_name: probe.resolver_display_name.clone(),
                        total: 0,
                        successful: 0,
                        elapsed: Vec::new(),
                        saw_high_precision: false,
                        saw_fallback: false,
                    },
                ));
                by_server.len() - 1
            }
        };
        let bucket = &mut by_server[idx].1;
        bucket.total += 1;
        match probe.timing_source {
            dnsbench_domain::TimingSource::HighPrecision => bucket.saw_high_precision = true,
            dnsbench_domain::TimingSource::Fallback => bucket.saw_fallback = true,
        }
        if probe.success {
            bucket.successful += 1;
            bucket.elapsed.push(probe.elapsed_ms);
        }
    }

    by_server
        .into_iter()
        .map(|(resolver_address, bucket)| {
            let failed = bucket.total - bucket.successful;
            let success_rate_pct = if bucket.total == 0 {
                0.0
            } else {
                100.0 * bucket.successful as f64 / bucket.total as f64
            };
            let (avg_ms, min_ms, max_ms, median_ms) = if bucket.successful == 0 {
                (None, None, None, None)
            } else {
                let mut sorted = bucket.elapsed.clone();
                sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
                let sum: f64 = sorted.iter().sum();
                let avg = sum / sorted.len() as f64;
                let min = sorted[0];
                let max = sorted[sorted.len() - 1];
                // Lower-median tie-break for even-sized sets (§4.3).
                let median = sorted[(sorted.len() - 1) / 2];
                (Some(avg), Some(min), Some(max), Some(median))
            };
            let timing_precision = match (bucket.saw_high_precision, bucket.saw_fallback) {
                (true, true) => TimingPrecision::Mixed,
                (true, false) => TimingPrecision::HighPrecision,
                (false, true) => TimingPrecision::Fallback,
                (false, false) => TimingPrecision::HighPrecision,
            };
            ServerSummary {
                run_id: run_id.to_string(),
                resolver_address,
                display_name: bucket.display_name,
                total: bucket.total,
                successful: bucket.successful,
                failed,
                success_rate_pct,
                avg_ms,
                min_ms,
                max_ms,
                median_ms,
                timing_precision,
            }
        })
        .collect()
}

/// Ranking per §4.3: `avg_ms` ascending, then `success_rate_pct` descending, then
/// `median_ms` ascending, then `display_name` ascending. Servers with no successful
/// probes (`avg_ms = None`) sort last regardless of the other fields.
fn rank_servers(a: &ServerSummary, b: &ServerSummary) -> Ordering {
    match (a.avg_ms, b.avg_ms) {
        (None, None) => a.display_name.cmp(&b.display_name),
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a_avg), Some(b_avg)) => a_avg
            .partial_cmp(&b_avg)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.success_rate_pct.partial_cmp(&a.success_rate_pct).unwrap_or(Ordering::Equal))
            .then_with(|| {
                a.median_ms
                    .unwrap_or(f64::MAX)
                    .partial_cmp(&b.median_ms.unwrap_or(f64::MAX))
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| a.display_name.cmp(&b.display_name)),
    }
}

fn failure_analyses(run_id: &str, probes: &[ProbeResult]) -> Vec<FailureAnalysis> {
    let resolver_count = {
        let mut addrs: Vec<&str> = probes.iter().map(|p| p.resolver_address.as_str()).collect();
        addrs.sort_unstable();
        addrs.dedup();
        addrs.len()
    };

    let mut by_domain: HashMap<&str, Vec<&ProbeResult>> = HashMap::new();
    for probe in probes {
        by_domain.entry(probe.domain.as_str()).or_default().push(probe);
    }

    let mut analyses: Vec<FailureAnalysis> = Vec::new();
    let mut domains: Vec<&str> = by_domain.keys().copied().collect();
    domains.sort_unstable();

    for domain in domains {
        let domain_probes = &by_domain[domain];
        let failures: Vec<&&ProbeResult> = domain_probes.iter().filter(|p| !p.success).collect();
        if failures.is_empty() {
            continue;
        }

        let failed_resolvers: usize = {
            let mut addrs: Vec<&str> = failures.iter().map(|p| p.resolver_address.as_str()).collect();
            addrs.sort_unstable();
            addrs.dedup();
            addrs.len()
        };
        let failed_on_all_resolvers = failed_resolvers >= resolver_count && resolver_count > 0;

        let all_timeout = failures.iter().all(|p| p.error_kind == ErrorKind::DnsTimeout);
        let all_nxdomain = failures.iter().all(|p| p.error_kind == ErrorKind::NxDomain);
        let failure_pattern = if all_timeout {
            FailurePattern::ConsistentTimeout
        } else if all_nxdomain {
            FailurePattern::ConsistentNxdomain
        } else if !failed_on_all_resolvers {
            FailurePattern::ServerSpecific
        } else {
            FailurePattern::MixedErrors
        };

        let any_succeeded = domain_probes.iter().any(|p| p.success);
        let upstream_hint = if failed_on_all_resolvers
            && matches!(failure_pattern, FailurePattern::ConsistentNxdomain | FailurePattern::ConsistentTimeout)
        {
            UpstreamHint::LikelyUpstreamBlocked
        } else if any_succeeded {
            UpstreamHint::LikelyLocalIssue
        } else {
            UpstreamHint::Unknown
        };

        analyses.push(FailureAnalysis {
            run_id: run_id.to_string(),
            domain: domain.to_string(),
            failed_on_all_resolvers,
            failure_pattern,
            upstream_hint,
        });
    }

    analyses
}

/// A domain is a *repeat offender* iff it failed on at least two probes across at
/// least two distinct resolvers in the run (§4.3).
pub fn repeat_offenders(probes: &[ProbeResult]) -> Vec<String> {
    let mut by_domain: HashMap<&str, Vec<&str>> = HashMap::new();
    for p in probes.iter().filter(|p| !p.success) {
        by_domain.entry(p.domain.as_str()).or_default().push(p.resolver_address.as_str());
    }
    let mut offenders: Vec<String> = by_domain
        .into_iter()
        .filter(|(_, resolvers)| {
            let mut distinct = resolvers.clone();
            distinct.sort_unstable();
            distinct.dedup();
            resolvers.len() >= 2 && distinct.len() >= 2
        })
        .map(|(domain, _)| domain.to_string())
        .collect();
    offenders.sort();
    offenders
}

/// Run-wide histogram of `error_kind` over failed probes, sorted by count
/// descending then by `error_kind`'s label for determinism (§4.3).
pub fn error_type_breakdown(probes: &[ProbeResult]) -> Vec<(ErrorKind, u32)> {
    let mut counts: HashMap<ErrorKind, u32> = HashMap::new();
    for p in probes.iter().filter(|p| !p.success) {
        *counts.entry(p.error_kind).or_insert(0) += 1;
    }
    let mut rows: Vec<(ErrorKind, u32)> = counts.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));
    rows
}

/// Per-server failure breakdown (§4.3): failed count, failure rate, and the set of
/// domains that failed on that server.
pub struct ServerFailureBreakdown {
    pub resolver_address: String,
    pub failed_count: u32,
    pub failure_rate_pct: f64,
    pub failed_domains: Vec<String>,
}

pub fn per_server_failure_breakdown(probes: &[ProbeResult]) -> Vec<ServerFailureBreakdown> {
    let mut totals: HashMap<&str, u32> = HashMap::new();
    let mut failed: HashMap<&str, Vec<&str>> = HashMap::new();
    for p in probes {
        *totals.entry(p.resolver_address.as_str()).or_insert(0) += 1;
        if !p.success {
            failed.entry(p.resolver_address.as_str()).or_default().push(p.domain.as_str());
        }
    }
    let mut rows: Vec<ServerFailureBreakdown> = totals
        .into_iter()
        .map(|(addr, total)| {
            let mut domains = failed.get(addr).cloned().unwrap_or_default();
            domains.sort_unstable();
            domains.dedup();
            let failed_count = domains.len() as u32;
            ServerFailureBreakdown {
                resolver_address: addr.to_string(),
                failed_count,
                failure_rate_pct: if total == 0 { 0.0 } else { 100.0 * failed_count as f64 / total as f64 },
                failed_domains: domains.into_iter().map(|s| s.to_string()).collect(),
            }
        })
        .collect();
    rows.sort_by(|a, b| a.resolver_address.cmp(&b.resolver_address));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnsbench_domain::{ResponseCode, TimingSource};

    fn success(resolver: &str, domain: &str, ms: f64) -> ProbeResult {
        ProbeResult::success("run1", resolver, resolver, domain, ms, TimingSource::HighPrecision, "93.184.216.34".into(), None)
    }

    fn failure(resolver: &str, domain: &str, kind: ErrorKind, code: ResponseCode) -> ProbeResult {
        ProbeResult::failure("run1", resolver, resolver, domain, 1500.0, TimingSource::HighPrecision, code, kind, None)
    }

    #[test]
    fn happy_path_one_resolver() {
        let probes = vec![success("8.8.8.8", "google.com", 10.0), success("8.8.8.8", "github.com", 20.0)];
        let (summaries, analyses) = summarize("run1", &probes);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].total, 2);
        assert_eq!(summaries[0].successful, 2);
        assert_eq!(summaries[0].success_rate_pct, 100.0);
        assert!(analyses.is_empty());
    }

    #[test]
    fn all_fail_upstream_blocked() {
        let probes = vec![
            failure("1.1.1.1", "bogus.example", ErrorKind::NxDomain, ResponseCode::Nxdomain),
            failure("8.8.8.8", "bogus.example", ErrorKind::NxDomain, ResponseCode::Nxdomain),
            failure("9.9.9.9", "bogus.example", ErrorKind::NxDomain, ResponseCode::Nxdomain),
        ];
        let (_, analyses) = summarize("run1", &probes);
        assert_eq!(analyses.len(), 1);
        assert!(analyses[0].failed_on_all_resolvers);
        assert_eq!(analyses[0].failure_pattern, FailurePattern::ConsistentNxdomain);
        assert_eq!(analyses[0].upstream_hint, UpstreamHint::LikelyUpstreamBlocked);
    }

    #[test]
    fn unreachable_resolver_ranks_last() {
        let probes = vec![
            failure("192.0.2.1", "google.com", ErrorKind::DnsTimeout, ResponseCode::Timeout),
            success("8.8.8.8", "google.com", 15.0),
        ];
        let (summaries, _) = summarize("run1", &probes);
        assert_eq!(summaries.last().unwrap().resolver_address, "192.0.2.1");
        assert_eq!(summaries.last().unwrap().success_rate_pct, 0.0);
        assert!(summaries.last().unwrap().avg_ms.is_none());
    }

    #[test]
    fn ranking_tie_break_by_display_name() {
        let probes = vec![success("b", "d1", 10.0), success("a", "d1", 10.0)];
        let (summaries, _) = summarize("run1", &probes);
        assert_eq!(summaries[0].resolver_address, "a");
        assert_eq!(summaries[1].resolver_address, "b");
    }

    #[test]
    fn repeat_offender_requires_two_distinct_resolvers() {
        let probes = vec![
            failure("a", "flaky.example", ErrorKind::ServerFail, ResponseCode::Servfail),
            failure("b", "flaky.example", ErrorKind::ServerFail, ResponseCode::Servfail),
            failure("a", "only-one-resolver.example", ErrorKind::ServerFail, ResponseCode::Servfail),
        ];
        let offenders = repeat_offenders(&probes);
        assert_eq!(offenders, vec!["flaky.example".to_string()]);
    }

    #[test]
    fn determinism_across_invocations() {
        let probes = vec![success("a", "d1", 10.0), failure("b", "d1", ErrorKind::DnsTimeout, ResponseCode::Timeout)];
        let first = summarize("run1", &probes);
        let second = summarize("run1", &probes);
        assert_eq!(first.0.len(), second.0.len());
        assert_eq!(first.0[0].resolver_address, second.0[0].resolver_address);
    }
}
