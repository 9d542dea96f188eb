use std::sync::Arc;

use dnsbench_domain::DomainError;

use crate::ports::{RunRecord, RunRepository};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

pub struct ExportedRun {
    pub content_type: &'static str,
    pub body: String,
}

pub struct ExportRunUseCase {
    repository: Arc<dyn RunRepository>,
}

impl ExportRunUseCase {
    pub fn new(repository: Arc<dyn RunRepository>) -> Self {
        Self { repository }
    }

    /// §6: JSON export is the full Run object; CSV denormalizes `ServerSummary`
    /// rows, one per resolver, in rank order, CRLF line endings, no BOM.
    pub async fn execute(&self, run_id: &str, format: ExportFormat) -> Result<ExportedRun, DomainError> {
        let record = self.repository.get_run(run_id).await?;
        match format {
            ExportFormat::Json => {
                let body = serde_json::to_string_pretty(&RunExportDocument::from(&record))
                    .map_err(|e| DomainError::Invariant(format!("export serialization failed: {e}")))?;
                Ok(ExportedRun { content_type: "application/json", body })
            }
            ExportFormat::Csv => Ok(ExportedRun { content_type: "text/csv", body: to_csv(&record) }),
        }
    }
}

#[derive(serde::Serialize)]
struct RunExportDocument<'a> {
    run: &'a dnsbench_domain::Run,
    summaries: &'a [dnsbench_domain::ServerSummary],
    probes: &'a [dnsbench_domain::ProbeResult],
    analyses: &'a [dnsbench_domain::FailureAnalysis],
}

impl<'a> From<&'a RunRecord> for RunExportDocument<'a> {
    fn from(record: &'a RunRecord) -> Self {
        Self { run: &record.run, summaries: &record.summaries, probes: &record.probes, analyses: &record.analyses }
    }
}

fn to_csv(record: &RunRecord) -> String {
    let mut out = String::from("rank,server_address,display_name,success_rate_pct,avg_ms,min_ms,max_ms,median_ms,successful,total,timing_precision\r\n");
    for (idx, summary) in record.summaries.iter().enumerate() {
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{},{}\r\n",
            idx + 1,
            summary.resolver_address,
            csv_escape(&summary.display_name),
            summary.success_rate_pct,
            opt(summary.avg_ms),
            opt(summary.min_ms),
            opt(summary.max_ms),
            opt(summary.median_ms),
            summary.successful,
            summary.total,
            summary.timing_precision.as_str(),
        ));
    }
    out
}

fn opt(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
