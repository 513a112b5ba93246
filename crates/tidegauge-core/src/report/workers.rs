use super::{ScenarioInput, palette_color, scan};
use crate::Result;
use crate::analysis::{Analyzer, ScenarioSummary, WorkerSummaryAnalyzer};
use crate::extract::WorkerLogExtractor;
use crate::logs::{ScenarioWorkerSet, WorkerMetrics};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerScenario {
    pub label: String,
    pub color: &'static str,
    pub summary: ScenarioSummary,
    pub workers: Vec<WorkerMetrics>,
}

/// Throughput and latency of several k6 runs side by side
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkerComparison {
    pub scenarios: Vec<WorkerScenario>,
    /// Labels of inputs that produced no complete worker
    pub skipped: Vec<String>,
}

impl WorkerComparison {
    /// Extract and summarize every input file in order
    pub fn build(inputs: &[ScenarioInput], extractor: &WorkerLogExtractor) -> Result<Self> {
        let scanned: Vec<(String, ScenarioWorkerSet)> = inputs
            .iter()
            .map(|input| (input.label.clone(), scan(input, extractor)))
            .collect();

        Self::from_worker_sets(scanned)
    }

    /// Summarize already extracted worker sets, keeping their order
    pub fn from_worker_sets(sets: Vec<(String, ScenarioWorkerSet)>) -> Result<Self> {
        let mut comparison = Self::default();

        for (label, workers) in sets {
            if workers.is_empty() {
                tracing::info!("  -> No usable data found in {}", label);
                comparison.skipped.push(label);
                continue;
            }

            tracing::info!("  -> Found {} completed workers in {}", workers.len(), label);

            let summary = WorkerSummaryAnalyzer.analyze(&workers)?;
            let color = palette_color(comparison.scenarios.len());

            comparison.scenarios.push(WorkerScenario {
                label,
                color,
                summary,
                workers: workers.workers().into_iter().cloned().collect(),
            });
        }

        Ok(comparison)
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.scenarios.iter().map(|s| s.label.as_str()).collect()
    }

    /// Total requests per second, aligned with `labels`
    pub fn throughput(&self) -> Vec<f64> {
        self.series(|s| s.total_throughput)
    }

    pub fn avg_latency(&self) -> Vec<f64> {
        self.series(|s| s.mean_avg_latency_ms)
    }

    pub fn p95_latency(&self) -> Vec<f64> {
        self.series(|s| s.mean_p95_latency_ms)
    }

    fn series(&self, field: fn(&ScenarioSummary) -> f64) -> Vec<f64> {
        self.scenarios.iter().map(|s| field(&s.summary)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{DEFAULT_WORKER_SOURCE, Extractor};
    use std::io::Write;

    fn worker(id: &str, rps: f64, avg: f64, p95: f64) -> WorkerMetrics {
        WorkerMetrics {
            worker_id: id.to_string(),
            request_count: 100,
            throughput_per_sec: rps,
            avg_latency_ms: avg,
            median_latency_ms: avg,
            p95_latency_ms: p95,
            fail_rate_percent: None,
        }
    }

    #[test]
    fn test_series_follow_scenario_order() {
        let fast: ScenarioWorkerSet = vec![worker("1", 100.0, 5.0, 10.0), worker("2", 50.0, 7.0, 20.0)]
            .into_iter()
            .collect();
        let slow: ScenarioWorkerSet = vec![worker("1", 10.0, 500.0, 900.0)].into_iter().collect();

        let comparison = WorkerComparison::from_worker_sets(vec![
            ("slow".to_string(), slow),
            ("empty".to_string(), ScenarioWorkerSet::new()),
            ("fast".to_string(), fast),
        ])
        .unwrap();

        assert_eq!(comparison.labels(), vec!["slow", "fast"]);
        assert_eq!(comparison.skipped, vec!["empty"]);
        assert_eq!(comparison.throughput(), vec![10.0, 150.0]);
        assert_eq!(comparison.avg_latency(), vec![500.0, 6.0]);
        assert_eq!(comparison.p95_latency(), vec![900.0, 15.0]);
        assert_eq!(comparison.scenarios[1].color, palette_color(1));
    }

    #[test]
    fn test_unreadable_file_is_skipped_not_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "k6-worker-1  |      http_reqs......................: 10  2.5/s"
        )
        .unwrap();
        writeln!(
            file,
            "k6-worker-1  |      http_req_duration..............: avg=4ms min=1ms med=3ms max=9ms p(90)=8ms p(95)=9ms"
        )
        .unwrap();

        let inputs = vec![
            ScenarioInput::new("missing", "/no/such/dir/k6-missing.log"),
            ScenarioInput::new("present", file.path()),
        ];
        let extractor = WorkerLogExtractor::new(DEFAULT_WORKER_SOURCE).unwrap();

        let comparison = WorkerComparison::build(&inputs, &extractor).unwrap();

        assert_eq!(comparison.labels(), vec!["present"]);
        assert_eq!(comparison.skipped, vec!["missing"]);
        assert_eq!(comparison.throughput(), vec![2.5]);
        assert!(extractor.extract_file(file.path()).is_ok());
    }
}
