use super::Extractor;
use crate::logs::RequestEvent;
use crate::parse::{parse_timestamp, strip_ansi};
use crate::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

/// Message the server logs once per request reaching the rate limiter
pub const DEFAULT_SENTINEL: &str = "checking rate limit";

lazy_static! {
    // `<container tag> | {json}`; the tag ends at the first pipe
    static ref JSON_LINE: Regex = Regex::new(r"^.*?\|\s+(\{.*\})$").unwrap();
}

/// Which structured log records count as requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerLogConfig {
    pub sentinel: String,
    pub message_field: String,
    pub time_field: String,
}

impl Default for ServerLogConfig {
    fn default() -> Self {
        Self {
            sentinel: DEFAULT_SENTINEL.to_string(),
            message_field: "msg".to_string(),
            time_field: "time".to_string(),
        }
    }
}

impl ServerLogConfig {
    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    pub fn with_message_field(mut self, field: impl Into<String>) -> Self {
        self.message_field = field.into();
        self
    }

    pub fn with_time_field(mut self, field: impl Into<String>) -> Self {
        self.time_field = field.into();
        self
    }
}

/// Collects the timestamps of sentinel events from JSON service logs.
///
/// The events are returned in file order; sorting is left to the rate
/// analysis.
#[derive(Default)]
pub struct ServerLogExtractor {
    config: ServerLogConfig,
}

impl ServerLogExtractor {
    pub fn new(config: ServerLogConfig) -> Result<Self> {
        if config.message_field.is_empty() || config.time_field.is_empty() {
            return Err(Error::InvalidConfig(
                "message and time field names must not be empty".to_string(),
            ));
        }
        Ok(Self { config })
    }

    fn event_from_line(&self, line: &str) -> Option<RequestEvent> {
        let clean = strip_ansi(line);
        let caps = JSON_LINE.captures(clean.trim_end())?;

        let record: Value = match serde_json::from_str(&caps[1]) {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!("Skipping malformed JSON log line: {}", e);
                return None;
            }
        };

        let message = record.get(&self.config.message_field)?.as_str()?;
        if message != self.config.sentinel {
            return None;
        }

        let time = record.get(&self.config.time_field)?.as_str()?;
        match parse_timestamp(time) {
            Some(at) => Some(RequestEvent::new(at)),
            None => {
                tracing::debug!("Skipping sentinel event with bad timestamp: {}", time);
                None
            }
        }
    }
}

impl Extractor for ServerLogExtractor {
    type Output = Vec<RequestEvent>;

    fn extract_lines<I, S>(&self, lines: I) -> Self::Output
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .filter_map(|line| self.event_from_line(line.as_ref()))
            .collect()
    }
}
