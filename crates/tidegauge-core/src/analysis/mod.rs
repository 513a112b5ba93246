mod rate;
mod summary;

pub use rate::{DEFAULT_SMOOTHING_WINDOW, RateAnalyzer, RatePoint, RateReport, RateSeries};
pub use summary::WorkerSummaryAnalyzer;

use serde::{Deserialize, Serialize};

/// System-wide view of one scenario's workers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub worker_count: usize,
    pub total_requests: u64,
    pub total_throughput: f64,
    pub mean_avg_latency_ms: f64,
    pub mean_median_latency_ms: f64,
    pub mean_p95_latency_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_fail_rate_percent: Option<f64>,
}

pub trait Analyzer {
    type Input: ?Sized;
    type Output;

    fn analyze(&self, input: &Self::Input) -> crate::Result<Self::Output>;
}
