use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

const MAX_FRACTION_DIGITS: usize = 6;

/// Parse an RFC3339 timestamp such as `2026-02-17T21:10:17.594995917Z`.
///
/// The fractional seconds are truncated to microseconds before parsing and
/// the embedded offset is kept as-is. A timestamp without any offset is read
/// as UTC. Returns `None` for anything that does not parse.
pub fn parse_timestamp(token: &str) -> Option<DateTime<FixedOffset>> {
    let token = token.trim();
    let token = match token.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+00:00"),
        None => token.to_string(),
    };

    let cleaned = truncate_fraction(&token);

    if let Ok(parsed) = DateTime::parse_from_rfc3339(&cleaned) {
        return Some(parsed);
    }

    // No offset at all
    NaiveDateTime::parse_from_str(&cleaned, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive).fixed_offset())
}

/// Seconds from `start` to `at`, at microsecond resolution
pub fn elapsed_seconds(at: DateTime<FixedOffset>, start: DateTime<FixedOffset>) -> f64 {
    let delta = at.signed_duration_since(start);
    match delta.num_microseconds() {
        Some(micros) => micros as f64 / 1_000_000.0,
        None => delta.num_milliseconds() as f64 / 1_000.0,
    }
}

fn truncate_fraction(token: &str) -> String {
    let Some((main, rest)) = token.split_once('.') else {
        return token.to_string();
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let (fraction, offset) = rest.split_at(digits_end);
    let fraction = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];

    format!("{main}.{fraction}{offset}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_nanoseconds_are_truncated_to_micros() {
        let parsed = parse_timestamp("2026-02-17T21:10:17.594995917Z").unwrap();

        assert_eq!(parsed.year(), 2026);
        assert_eq!(parsed.hour(), 21);
        assert_eq!(parsed.second(), 17);
        assert_eq!(parsed.nanosecond(), 594_995_000);
        assert_eq!(parsed.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_truncation_never_rounds_up() {
        let parsed = parse_timestamp("2026-02-17T21:10:17.999999999Z").unwrap();
        assert_eq!(parsed.second(), 17);
        assert_eq!(parsed.nanosecond(), 999_999_000);
    }

    #[test]
    fn test_offset_is_preserved() {
        let parsed = parse_timestamp("2026-02-17T23:10:17.1234567+02:00").unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 2 * 3600);
        assert_eq!(parsed.nanosecond(), 123_456_000);

        let negative = parse_timestamp("2026-02-17T16:10:17.5-05:00").unwrap();
        assert_eq!(negative.offset().local_minus_utc(), -5 * 3600);
        assert_eq!(negative.nanosecond(), 500_000_000);
    }

    #[test]
    fn test_without_fraction() {
        let parsed = parse_timestamp("2026-02-17T21:10:17Z").unwrap();
        assert_eq!(parsed.nanosecond(), 0);
    }

    #[test]
    fn test_without_offset_reads_as_utc() {
        let parsed = parse_timestamp("2026-02-17T21:10:17.25").unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 0);
        assert_eq!(parsed.nanosecond(), 250_000_000);
    }

    #[test]
    fn test_garbage_is_none() {
        assert!(parse_timestamp("not-a-date").is_none());
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("2026-13-45T99:00:00Z").is_none());
    }

    #[test]
    fn test_elapsed_seconds_across_offsets() {
        let start = parse_timestamp("2026-02-17T21:10:17.100000Z").unwrap();
        let later = parse_timestamp("2026-02-17T23:10:18.600000+02:00").unwrap();

        assert_eq!(elapsed_seconds(later, start), 1.5);
        assert_eq!(elapsed_seconds(start, start), 0.0);
    }
}
