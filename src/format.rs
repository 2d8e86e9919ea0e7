// src/format.rs
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Footer text when the document carries no timestamp.
pub const UNKNOWN_PLACEHOLDER: &str = "unknown";

/// Footer text when a timestamp is present but unparseable.
pub const INVALID_DATE: &str = "Invalid Date";

// Long-form dates also turn up in generated listings.
const NAIVE_DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"];

const NAIVE_DATETIME_FORMATS: [&str; 3] =
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parses the ISO-8601 shapes that show up in `events.json`.
/// Values without an offset are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    NAIVE_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// "2025-08-08T00:00:00Z" -> "August 8, 2025"
pub fn format_date(raw: &str) -> Option<String> {
    parse_timestamp(raw).map(|dt| dt.format("%B %-d, %Y").to_string())
}

pub fn footer_text(last_updated: &str) -> String {
    if last_updated.is_empty() {
        return UNKNOWN_PLACEHOLDER.to_string();
    }
    format_date(last_updated).unwrap_or_else(|| INVALID_DATE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rfc3339() {
        assert_eq!(format_date("2025-08-08T00:00:00Z").as_deref(), Some("August 8, 2025"));
        assert_eq!(format_date("2025-09-01T00:00:00Z").as_deref(), Some("September 1, 2025"));
    }

    #[test]
    fn test_format_offset_is_normalized_to_utc() {
        assert_eq!(format_date("2025-08-08T23:30:00-02:00").as_deref(), Some("August 9, 2025"));
    }

    #[test]
    fn test_format_naive_and_date_only() {
        assert_eq!(format_date("2025-12-24T18:00:00").as_deref(), Some("December 24, 2025"));
        assert_eq!(format_date("2025-01-05").as_deref(), Some("January 5, 2025"));
    }

    #[test]
    fn test_long_form_dates_parse() {
        let expected = format_date("2025-09-05");
        assert!(expected.is_some());
        assert_eq!(format_date("September 5, 2025"), expected);
        assert_eq!(format_date("Sep 5, 2025"), expected);
        assert_eq!(format_date("5 September 2025"), expected);
    }

    #[test]
    fn test_footer_placeholders() {
        assert_eq!(footer_text(""), "unknown");
        assert_eq!(footer_text("next tuesday"), "Invalid Date");
        assert_eq!(footer_text("2025-08-08T00:00:00Z"), "August 8, 2025");
    }

    #[test]
    fn test_unparseable_is_none() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("2025-13-40").is_none());
    }
}
