use super::Analyzer;
use crate::logs::RequestEvent;
use crate::parse::elapsed_seconds;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_SMOOTHING_WINDOW: usize = 3;

const MICROS_PER_SECOND: i64 = 1_000_000;

/// Requests counted per whole second since the first event.
///
/// Keys are sparse: a second without events has no entry and reads as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateSeries {
    buckets: BTreeMap<u64, u64>,
}

impl RateSeries {
    /// Bucket events by whole seconds elapsed since the earliest one.
    ///
    /// Returns the series together with the seconds between the earliest and
    /// latest event.
    pub fn from_events(events: &[RequestEvent]) -> (Self, f64) {
        let mut sorted = events.to_vec();
        sorted.sort();

        let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
            return (Self::default(), 0.0);
        };

        let start = first.at();
        let duration = elapsed_seconds(last.at(), start);

        let mut buckets = BTreeMap::new();
        for event in &sorted {
            let micros = event
                .at()
                .signed_duration_since(start)
                .num_microseconds()
                .unwrap_or(i64::MAX);
            let second = (micros / MICROS_PER_SECOND) as u64;
            *buckets.entry(second).or_insert(0) += 1;
        }

        (Self { buckets }, duration)
    }

    pub fn get(&self, second: u64) -> u64 {
        self.buckets.get(&second).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.buckets.values().sum()
    }

    pub fn peak(&self) -> u64 {
        self.buckets.values().copied().max().unwrap_or(0)
    }

    /// Present buckets in ascending second order
    pub fn points(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.buckets.iter().map(|(&second, &count)| (second, count))
    }

    /// Trailing moving average over the present buckets.
    ///
    /// The window counts positions in the sorted key list, not wall-clock
    /// seconds; missing seconds are not filled with zeros first. The window
    /// never looks ahead, so the first points average fewer values.
    pub fn smoothed(&self, window: usize) -> Vec<RatePoint> {
        let window = window.max(1);
        let counts: Vec<u64> = self.buckets.values().copied().collect();

        self.points()
            .enumerate()
            .map(|(j, (second, count))| {
                let slice = &counts[j.saturating_sub(window - 1)..=j];
                let rate = slice.iter().sum::<u64>() as f64 / slice.len() as f64;
                RatePoint {
                    second,
                    count,
                    rate,
                }
            })
            .collect()
    }
}

/// One point of a smoothed rate curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatePoint {
    pub second: u64,
    pub count: u64,
    pub rate: f64,
}

/// Request-rate view of one scenario's server log
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateReport {
    pub total_events: usize,
    pub duration_seconds: f64,
    pub average_rps: f64,
    pub peak_rps: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_event: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_event: Option<String>,
    pub window: usize,
    pub series: RateSeries,
    pub smoothed: Vec<RatePoint>,
}

pub struct RateAnalyzer {
    window: usize,
}

impl RateAnalyzer {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

impl Default for RateAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTHING_WINDOW)
    }
}

impl Analyzer for RateAnalyzer {
    type Input = [RequestEvent];
    type Output = RateReport;

    fn analyze(&self, events: &[RequestEvent]) -> Result<Self::Output> {
        if self.window == 0 {
            return Err(Error::Analysis(
                "smoothing window must be at least 1".to_string(),
            ));
        }

        tracing::debug!("Bucketing {} request events", events.len());

        if events.is_empty() {
            return Ok(RateReport {
                window: self.window,
                ..RateReport::default()
            });
        }

        let (series, duration_seconds) = RateSeries::from_events(events);
        let total_events = events.len();

        // Everything landed in the same instant: that is the per-second rate
        let average_rps = if duration_seconds > 0.0 {
            total_events as f64 / duration_seconds
        } else {
            total_events as f64
        };

        let first_event = events.iter().min().map(|e| e.at().to_rfc3339());
        let last_event = events.iter().max().map(|e| e.at().to_rfc3339());

        tracing::debug!(
            "Rate analysis complete: {} events over {:.3}s, avg={:.2} req/s",
            total_events,
            duration_seconds,
            average_rps
        );

        Ok(RateReport {
            total_events,
            duration_seconds,
            average_rps,
            peak_rps: series.peak(),
            first_event,
            last_event,
            window: self.window,
            smoothed: series.smoothed(self.window),
            series,
        })
    }
}
