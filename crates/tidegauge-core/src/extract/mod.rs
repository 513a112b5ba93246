mod server;
mod worker;

pub use server::{DEFAULT_SENTINEL, ServerLogConfig, ServerLogExtractor};
pub use worker::{DEFAULT_WORKER_SOURCE, WorkerLogExtractor};

use crate::Result;
use crate::logs::LogReader;
use std::path::Path;

/// Turns the lines of one log file into raw records.
///
/// Extraction is a pure function of the input text: every call starts from
/// an empty accumulator and returns it, so scanning the same lines twice
/// yields the same output.
pub trait Extractor {
    type Output: Default;

    fn extract_lines<I, S>(&self, lines: I) -> Self::Output
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>;

    fn extract_str(&self, content: &str) -> Self::Output {
        self.extract_lines(content.lines())
    }

    fn extract_file(&self, path: &Path) -> Result<Self::Output> {
        let lines = LogReader::read_lines(path)?;
        Ok(self.extract_lines(lines))
    }
}
