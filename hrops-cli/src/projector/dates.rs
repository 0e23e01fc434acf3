//! Sheet date handling
//!
//! The spreadsheet stores dates as `DD/MM/YYYY` strings (timestamps as
//! `DD/MM/YYYY HH:MM:SS`). A string that already looks like a valid
//! day/month/year triple is passed through untouched instead of being
//! reparsed; reparsing ambiguous two-digit pairs is how day/month swaps
//! happen.

use chrono::{DateTime, NaiveDate, Utc};

/// Normalize a raw cell value for display as `DD/MM/YYYY`.
///
/// Idempotent on already-valid slash dates; ISO and RFC3339 inputs are
/// converted; anything unrecognized comes back unchanged.
pub fn format_display_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    if is_slash_date(trimmed) {
        return trimmed.to_string();
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.format("%d/%m/%Y").to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return dt.format("%d/%m/%Y").to_string();
    }

    trimmed.to_string()
}

/// Convert a `DD/MM/YYYY` cell to ISO `YYYY-MM-DD`, if it parses.
pub fn to_iso(raw: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(raw.trim(), "%d/%m/%Y").ok()?;
    Some(date.format("%Y-%m-%d").to_string())
}

/// Render a form date (`YYYY-MM-DD` from a date input) the way the sheet
/// expects it. Empty or unparseable input renders empty.
pub fn format_for_sheet(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if is_slash_date(trimmed) {
        return trimmed.to_string();
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

/// Submission timestamp in the sheet's `DD/MM/YYYY HH:MM:SS` convention.
pub fn sheet_timestamp(now: DateTime<Utc>) -> String {
    now.format("%d/%m/%Y %H:%M:%S").to_string()
}

/// Completion stamp without seconds, as written to actual-date cells.
pub fn sheet_datetime_minutes(now: DateTime<Utc>) -> String {
    now.format("%d/%m/%Y %H:%M").to_string()
}

/// Accepts any day/month in calendar range as "already formatted". The year
/// part is deliberately not validated; sheets carry two- and four-digit
/// years and both must pass through untouched.
fn is_slash_date(s: &str) -> bool {
    let parts: Vec<&str> = s.split(' ').next().unwrap_or(s).split('/').collect();
    if parts.len() != 3 {
        return false;
    }
    let day: u32 = match parts[0].parse() {
        Ok(d) => d,
        Err(_) => return false,
    };
    let month: u32 = match parts[1].parse() {
        Ok(m) => m,
        Err(_) => return false,
    };
    (1..=31).contains(&day) && (1..=12).contains(&month)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_display_date_idempotent_on_valid_slash_dates() {
        assert_eq!(format_display_date("01/02/2024"), "01/02/2024");
        assert_eq!(
            format_display_date(format_display_date("28/12/2023").as_str()),
            "28/12/2023"
        );
    }

    #[test]
    fn test_display_date_does_not_reparse_ambiguous_pairs() {
        // 03/04 could be 3 April or 4 March; it must pass through as-is.
        assert_eq!(format_display_date("03/04/2024"), "03/04/2024");
    }

    #[test]
    fn test_display_date_converts_iso() {
        assert_eq!(format_display_date("2024-02-01"), "01/02/2024");
    }

    #[test]
    fn test_display_date_leaves_garbage_alone() {
        assert_eq!(format_display_date("not a date"), "not a date");
        assert_eq!(format_display_date("45/99/2024"), "45/99/2024");
        assert_eq!(format_display_date(""), "");
    }

    #[test]
    fn test_to_iso_round_trip() {
        assert_eq!(to_iso("01/02/2024").as_deref(), Some("2024-02-01"));
        assert_eq!(format_display_date("2024-02-01"), "01/02/2024");
        assert_eq!(to_iso("banana"), None);
    }

    #[test]
    fn test_sheet_timestamp_format() {
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 9, 5, 3).unwrap();
        assert_eq!(sheet_timestamp(now), "01/02/2024 09:05:03");
        assert_eq!(sheet_datetime_minutes(now), "01/02/2024 09:05");
    }

    #[test]
    fn test_format_for_sheet() {
        assert_eq!(format_for_sheet("2024-03-15"), "15/03/2024");
        assert_eq!(format_for_sheet("15/03/2024"), "15/03/2024");
        assert_eq!(format_for_sheet(""), "");
        assert_eq!(format_for_sheet("nope"), "");
    }
}
