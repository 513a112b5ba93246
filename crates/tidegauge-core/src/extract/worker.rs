use super::Extractor;
use crate::logs::{LatencyStats, PartialWorkerMetrics, ScenarioWorkerSet};
use crate::parse::{parse_duration_ms, strip_ansi};
use crate::{Error, Result};
use regex::{Captures, Regex};
use std::collections::BTreeMap;

/// Container name prefix docker compose gives the k6 workers
pub const DEFAULT_WORKER_SOURCE: &str = "k6";

type Handler = fn(&Captures<'_>, &mut PartialWorkerMetrics) -> Result<()>;

/// One summary line shape and how it fills a worker record
struct LineRule {
    name: &'static str,
    pattern: Regex,
    apply: Handler,
}

/// Collects the end-of-run summary k6 prints for every worker.
///
/// Lines are tried against the rules in order and the first matching rule
/// handles the line: `http_reqs` (request count and rate), `http_req_duration`
/// (avg, median and p95) and `http_req_failed` (failure percentage).
pub struct WorkerLogExtractor {
    rules: Vec<LineRule>,
}

impl WorkerLogExtractor {
    /// Build the line rules for workers named `<source>-worker-<n>`
    pub fn new(source: &str) -> Result<Self> {
        let source = source.trim();
        if source.is_empty() {
            return Err(Error::InvalidConfig(
                "worker source name must not be empty".to_string(),
            ));
        }

        let prefix = format!(r"{}-worker-(\d+)\s+\|\s+", regex::escape(source));

        let rules = vec![
            LineRule {
                name: "throughput",
                pattern: Regex::new(&format!(r"{prefix}http_reqs\.+: (\d+)\s+([\d.]+)/s"))?,
                apply: apply_throughput,
            },
            LineRule {
                name: "latency",
                pattern: Regex::new(&format!(
                    r"{prefix}http_req_duration\.+: avg=([\w.]+) .*? med=([\w.]+) .*? p\(95\)=([\w.]+)"
                ))?,
                apply: apply_latency,
            },
            LineRule {
                name: "fail rate",
                pattern: Regex::new(&format!(r"{prefix}http_req_failed\.+: ([\d.]+)%"))?,
                apply: apply_fail_rate,
            },
        ];

        Ok(Self { rules })
    }

    fn match_line<'l>(&self, line: &'l str) -> Option<(&LineRule, Captures<'l>)> {
        self.rules
            .iter()
            .find_map(|rule| rule.pattern.captures(line).map(|caps| (rule, caps)))
    }
}

impl Extractor for WorkerLogExtractor {
    type Output = ScenarioWorkerSet;

    fn extract_lines<I, S>(&self, lines: I) -> Self::Output
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut partials: BTreeMap<String, PartialWorkerMetrics> = BTreeMap::new();

        for (idx, line) in lines.into_iter().enumerate() {
            let clean = strip_ansi(line.as_ref());

            let Some((rule, caps)) = self.match_line(&clean) else {
                continue;
            };

            let worker_id = caps[1].to_string();
            let record = partials.entry(worker_id.clone()).or_default();

            if let Err(e) = (rule.apply)(&caps, record) {
                tracing::debug!(
                    "Skipping {} line {} for worker {}: {}",
                    rule.name,
                    idx + 1,
                    worker_id,
                    e
                );
            }
        }

        let seen = partials.len();
        let workers: ScenarioWorkerSet = partials
            .into_iter()
            .filter_map(|(worker_id, partial)| partial.into_complete(worker_id))
            .collect();

        if workers.len() < seen {
            tracing::debug!(
                "Dropped {} incomplete worker records",
                seen - workers.len()
            );
        }

        workers
    }
}

fn apply_throughput(caps: &Captures<'_>, record: &mut PartialWorkerMetrics) -> Result<()> {
    let count = caps[2]
        .parse::<u64>()
        .map_err(|_| Error::InvalidNumber(caps[2].to_string()))?;
    let rate = parse_float(&caps[3])?;

    record.request_count = Some(count);
    record.throughput_per_sec = Some(rate);
    Ok(())
}

fn apply_latency(caps: &Captures<'_>, record: &mut PartialWorkerMetrics) -> Result<()> {
    let latency = LatencyStats {
        avg_ms: parse_duration_ms(&caps[2])?,
        median_ms: parse_duration_ms(&caps[3])?,
        p95_ms: parse_duration_ms(&caps[4])?,
    };

    record.latency = Some(latency);
    Ok(())
}

fn apply_fail_rate(caps: &Captures<'_>, record: &mut PartialWorkerMetrics) -> Result<()> {
    record.fail_rate_percent = Some(parse_float(&caps[2])?);
    Ok(())
}

fn parse_float(text: &str) -> Result<f64> {
    text.parse::<f64>()
        .map_err(|_| Error::InvalidNumber(text.to_string()))
}
