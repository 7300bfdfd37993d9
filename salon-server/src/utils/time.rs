//! Time window helpers
//!
//! All persisted timestamps are UTC epoch milliseconds; these helpers
//! turn calendar concepts (a displayed month, "today") into half-open
//! millisecond windows `[start, end)`.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

/// Parse `YYYY-MM` into the UTC millisecond window covering that month.
pub fn month_range(yyyy_mm: &str) -> Result<(i64, i64), String> {
    let parts: Vec<&str> = yyyy_mm.split('-').collect();
    if parts.len() != 2 {
        return Err("month must be YYYY-MM".to_string());
    }
    let y: i32 = parts[0].parse().map_err(|_| "invalid year".to_string())?;
    let m: u32 = parts[1].parse().map_err(|_| "invalid month".to_string())?;
    if !(1..=12).contains(&m) {
        return Err("month must be 01..12".to_string());
    }

    let start = NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(|| "invalid date".to_string())?;
    let (ny, nm) = if m == 12 { (y + 1, 1) } else { (y, m + 1) };
    let end = NaiveDate::from_ymd_opt(ny, nm, 1).ok_or_else(|| "invalid date".to_string())?;

    Ok((start_of_day_millis(start), start_of_day_millis(end)))
}

/// `YYYY-MM` label of the month containing the given instant.
pub fn month_label(at: DateTime<Utc>) -> String {
    format!("{:04}-{:02}", at.year(), at.month())
}

/// Millisecond window `[00:00, 24:00)` of the UTC day containing `at`.
pub fn day_range(at: DateTime<Utc>) -> (i64, i64) {
    let day = at.date_naive();
    let next = day.succ_opt().unwrap_or(day);
    (start_of_day_millis(day), start_of_day_millis(next))
}

fn start_of_day_millis(day: NaiveDate) -> i64 {
    let midnight = day.and_hms_opt(0, 0, 0).expect("midnight always exists");
    Utc.from_utc_datetime(&midnight).timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_range_covers_whole_month() {
        let (start, end) = month_range("2025-03").expect("valid month");
        let start_dt = Utc.timestamp_millis_opt(start).unwrap();
        let end_dt = Utc.timestamp_millis_opt(end).unwrap();
        assert_eq!(start_dt.to_rfc3339(), "2025-03-01T00:00:00+00:00");
        assert_eq!(end_dt.to_rfc3339(), "2025-04-01T00:00:00+00:00");
    }

    #[test]
    fn month_range_wraps_december() {
        let (_, end) = month_range("2024-12").expect("valid month");
        let end_dt = Utc.timestamp_millis_opt(end).unwrap();
        assert_eq!(end_dt.year(), 2025);
        assert_eq!(end_dt.month(), 1);
    }

    #[test]
    fn month_range_rejects_garbage() {
        assert!(month_range("2025").is_err());
        assert!(month_range("2025-13").is_err());
        assert!(month_range("abcd-ef").is_err());
    }

    #[test]
    fn day_range_is_24_hours() {
        let at = Utc.with_ymd_and_hms(2025, 6, 15, 13, 45, 0).unwrap();
        let (start, end) = day_range(at);
        assert_eq!(end - start, 24 * 60 * 60 * 1000);
        assert!(start <= at.timestamp_millis() && at.timestamp_millis() < end);
    }
}
