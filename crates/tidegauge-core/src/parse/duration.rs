use crate::{Error, Result};

const MICRO_SUFFIXES: [&str; 2] = ["µs", "μs"];

/// Convert a k6 duration token (`1.83s`, `500ms`, `59.58µs`, `1m30s`) to
/// milliseconds.
///
/// An empty token means "not measured" and yields `0.0`. Unit markers are
/// checked from the most specific to the least, so `ms` wins over a bare `s`.
pub fn parse_duration_ms(token: &str) -> Result<f64> {
    let token = token.trim();
    if token.is_empty() {
        return Ok(0.0);
    }

    if let Some(idx) = token.find("ms") {
        return number(&token[..idx], token);
    }

    for suffix in MICRO_SUFFIXES {
        if let Some(idx) = token.find(suffix) {
            return Ok(number(&token[..idx], token)? / 1000.0);
        }
    }

    if token.contains('s') {
        if let Some((minutes, seconds)) = token.split_once('m') {
            let minutes = number(minutes, token)?;
            let seconds = number(seconds.strip_suffix('s').unwrap_or(seconds), token)?;
            return Ok((minutes * 60.0 + seconds) * 1000.0);
        }

        let idx = token.find('s').unwrap_or(token.len());
        return Ok(number(&token[..idx], token)? * 1000.0);
    }

    number(token, token)
}

fn number(text: &str, token: &str) -> Result<f64> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| Error::InvalidDuration(token.to_string()))
}
