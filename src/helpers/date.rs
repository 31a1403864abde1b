//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

/// Parse a publication date in any of the formats the CMS and front-matter emit
///
/// # Examples
/// ```ignore
/// parse_date("2025-08-10") // -> Some(2025-08-10)
/// parse_date("2025-08-10T09:30:00.000Z") // -> Some(2025-08-10)
/// ```
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    // RFC 3339 keeps the calendar date the author wrote, not the UTC-shifted one
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

/// Format a date in long US form (like "August 10, 2025")
pub fn full_date(date: &NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Format a date in ISO 8601 / W3C datetime form for XML documents
pub fn date_xml<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}
