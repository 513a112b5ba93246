use super::{ScenarioInput, palette_color, scan};
use crate::Result;
use crate::analysis::{Analyzer, RateAnalyzer, RateReport};
use crate::extract::ServerLogExtractor;
use crate::logs::RequestEvent;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateScenario {
    pub label: String,
    pub color: &'static str,
    /// `"<label> (Avg: <n> RPS)"` with the average truncated to an integer
    pub legend: String,
    pub report: RateReport,
}

/// Server-side request rate of several runs over time
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RateComparison {
    pub scenarios: Vec<RateScenario>,
    pub skipped: Vec<String>,
}

impl RateComparison {
    pub fn build(
        inputs: &[ScenarioInput],
        extractor: &ServerLogExtractor,
        analyzer: &RateAnalyzer,
    ) -> Result<Self> {
        let scanned: Vec<(String, Vec<RequestEvent>)> = inputs
            .iter()
            .map(|input| (input.label.clone(), scan(input, extractor)))
            .collect();

        Self::from_events(scanned, analyzer)
    }

    pub fn from_events(
        scenarios: Vec<(String, Vec<RequestEvent>)>,
        analyzer: &RateAnalyzer,
    ) -> Result<Self> {
        let mut comparison = Self::default();

        for (label, events) in scenarios {
            if events.is_empty() {
                tracing::info!("  -> No request data found in {}", label);
                comparison.skipped.push(label);
                continue;
            }

            tracing::info!("  -> Found {} requests in {}", events.len(), label);

            let report = analyzer.analyze(&events)?;
            let legend = format!("{} (Avg: {} RPS)", label, report.average_rps.trunc() as i64);

            comparison.scenarios.push(RateScenario {
                color: palette_color(comparison.scenarios.len()),
                label,
                legend,
                report,
            });
        }

        Ok(comparison)
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Longest run, in whole seconds, across all scenarios
    pub fn max_second(&self) -> u64 {
        self.scenarios
            .iter()
            .filter_map(|s| s.report.smoothed.last().map(|p| p.second))
            .max()
            .unwrap_or(0)
    }
}
