//! Cross-scenario comparisons handed to a renderer.
//!
//! Inputs are processed one after another in the order given. A file that
//! cannot be read counts as a scenario without data: it is logged, left out of
//! the comparison and the remaining files are still processed.

mod server;
mod workers;

pub use server::{RateComparison, RateScenario};
pub use workers::{WorkerComparison, WorkerScenario};

use crate::extract::Extractor;
use serde::Serialize;
use std::path::PathBuf;

/// Line colours for scenarios, reused from the start once exhausted
pub const PALETTE: [&str; 4] = ["#4285f4", "#34a853", "#ea4335", "#fbbc05"];

pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// A log file and the label its scenario is shown under
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioInput {
    pub label: String,
    pub path: PathBuf,
}

impl ScenarioInput {
    pub fn new(label: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }
}

fn scan<E: Extractor>(input: &ScenarioInput, extractor: &E) -> E::Output {
    tracing::info!("Parsing {}...", input.path.display());

    match extractor.extract_file(&input.path) {
        Ok(output) => output,
        Err(e) => {
            tracing::warn!("Error reading file {}: {}", input.path.display(), e);
            Default::default()
        }
    }
}
