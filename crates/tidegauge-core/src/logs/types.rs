use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Latency figures reported together on a worker's `http_req_duration` line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatencyStats {
    pub avg_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
}

/// Metrics for one worker while its log lines are still being scanned.
///
/// Each summary line fills a different group of fields, so a worker that
/// crashed mid-run may never see all of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialWorkerMetrics {
    pub request_count: Option<u64>,
    pub throughput_per_sec: Option<f64>,
    pub latency: Option<LatencyStats>,
    pub fail_rate_percent: Option<f64>,
}

impl PartialWorkerMetrics {
    /// A record is complete once both throughput and latency were observed
    pub fn is_complete(&self) -> bool {
        self.throughput_per_sec.is_some() && self.latency.is_some()
    }

    /// Freeze the record, or `None` if it never became complete
    pub fn into_complete(self, worker_id: String) -> Option<WorkerMetrics> {
        if !self.is_complete() {
            return None;
        }
        let throughput_per_sec = self.throughput_per_sec?;
        let latency = self.latency?;

        Some(WorkerMetrics {
            worker_id,
            request_count: self.request_count.unwrap_or(0),
            throughput_per_sec,
            avg_latency_ms: latency.avg_ms,
            median_latency_ms: latency.median_ms,
            p95_latency_ms: latency.p95_ms,
            fail_rate_percent: self.fail_rate_percent,
        })
    }
}

/// Final per-worker summary of one load-generating process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerMetrics {
    pub worker_id: String,
    pub request_count: u64,
    pub throughput_per_sec: f64,
    pub avg_latency_ms: f64,
    pub median_latency_ms: f64,
    pub p95_latency_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail_rate_percent: Option<f64>,
}

/// All complete workers found in one scenario's log
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioWorkerSet {
    workers: BTreeMap<String, WorkerMetrics>,
}

impl ScenarioWorkerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, metrics: WorkerMetrics) {
        self.workers.insert(metrics.worker_id.clone(), metrics);
    }

    pub fn get(&self, worker_id: &str) -> Option<&WorkerMetrics> {
        self.workers.get(worker_id)
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Workers ordered by id, numerically for the usual all-digit ids
    pub fn workers(&self) -> Vec<&WorkerMetrics> {
        let mut workers: Vec<_> = self.workers.values().collect();
        workers.sort_by(|a, b| {
            (a.worker_id.len(), &a.worker_id).cmp(&(b.worker_id.len(), &b.worker_id))
        });
        workers
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorkerMetrics> {
        self.workers.values()
    }
}

impl FromIterator<WorkerMetrics> for ScenarioWorkerSet {
    fn from_iter<T: IntoIterator<Item = WorkerMetrics>>(iter: T) -> Self {
        let mut set = Self::new();
        for metrics in iter {
            set.insert(metrics);
        }
        set
    }
}

/// One sentinel event observed in a server log
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestEvent(DateTime<FixedOffset>);

impl RequestEvent {
    pub fn new(at: DateTime<FixedOffset>) -> Self {
        Self(at)
    }

    pub fn at(&self) -> DateTime<FixedOffset> {
        self.0
    }
}
