use super::{Analyzer, ScenarioSummary};
use crate::Result;
use crate::logs::{ScenarioWorkerSet, WorkerMetrics};

/// Combines the workers of one scenario.
///
/// Workers hit the same target concurrently, so their rates add up to the
/// system throughput. Latencies are plain means of the per-worker figures,
/// not weighted by request count.
pub struct WorkerSummaryAnalyzer;

impl Analyzer for WorkerSummaryAnalyzer {
    type Input = ScenarioWorkerSet;
    type Output = ScenarioSummary;

    fn analyze(&self, workers: &ScenarioWorkerSet) -> Result<Self::Output> {
        tracing::debug!("Summarizing {} workers", workers.len());

        if workers.is_empty() {
            return Ok(ScenarioSummary::default());
        }

        let count = workers.len() as f64;

        let total_throughput: f64 = workers.iter().map(|w| w.throughput_per_sec).sum();
        let total_requests: u64 = workers.iter().map(|w| w.request_count).sum();

        let mean = |field: fn(&WorkerMetrics) -> f64| {
            workers.iter().map(field).sum::<f64>() / count
        };

        let fail_rates: Vec<f64> = workers.iter().filter_map(|w| w.fail_rate_percent).collect();
        let mean_fail_rate_percent = if fail_rates.is_empty() {
            None
        } else {
            Some(fail_rates.iter().sum::<f64>() / fail_rates.len() as f64)
        };

        let summary = ScenarioSummary {
            worker_count: workers.len(),
            total_requests,
            total_throughput,
            mean_avg_latency_ms: mean(|w| w.avg_latency_ms),
            mean_median_latency_ms: mean(|w| w.median_latency_ms),
            mean_p95_latency_ms: mean(|w| w.p95_latency_ms),
            mean_fail_rate_percent,
        };

        tracing::debug!(
            "Scenario summary: {:.2} req/s, avg={:.2}ms, p95={:.2}ms",
            summary.total_throughput,
            summary.mean_avg_latency_ms,
            summary.mean_p95_latency_ms
        );

        Ok(summary)
    }
}
