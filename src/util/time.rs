use chrono::{DateTime, FixedOffset};

/// Parse a tracker timestamp. Accepts RFC 3339 and the tracker's
/// `2024-01-15T10:30:00.000+0700` form (offset without a colon).
pub fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .ok()
}

/// `Jan 15, 2024`, or the raw input when it does not parse.
pub fn format_date(s: &str) -> String {
    parse_timestamp(s)
        .map(|dt| dt.format("%b %d, %Y").to_string())
        .unwrap_or_else(|| s.to_string())
}

/// `Jan 15, 2024 10:30`, or the raw input when it does not parse.
pub fn format_date_time(s: &str) -> String {
    parse_timestamp(s)
        .map(|dt| dt.format("%b %d, %Y %H:%M").to_string())
        .unwrap_or_else(|| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tracker_offset_format() {
        let a = parse_timestamp("2024-01-15T10:30:00.000+0700").unwrap();
        let b = parse_timestamp("2024-01-15T03:30:00Z").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn formats_with_fallback() {
        assert_eq!(format_date("2024-01-05T10:30:00.000+0000"), "Jan 05, 2024");
        assert_eq!(format_date_time("2024-01-05T10:30:00.000+0000"), "Jan 05, 2024 10:30");
        assert_eq!(format_date("not a date"), "not a date");
    }
}
