//! Token-level parsers shared by the extractors.

mod ansi;
mod duration;
mod timestamp;

pub use ansi::strip_ansi;
pub use duration::parse_duration_ms;
pub use timestamp::{elapsed_seconds, parse_timestamp};
