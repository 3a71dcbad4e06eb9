/// Kickoff date handling. Every fixture date string in the reconciliation
/// path is parsed here and nowhere else.
use chrono::{Days, NaiveDate, NaiveDateTime};

/// Parse a kickoff instant from the `YYYY-MM-DDTHH:MM:SS` strings the
/// reconciliation engine builds. The fallback provider occasionally omits
/// seconds, so `YYYY-MM-DDTHH:MM` is accepted too.
pub fn parse_kickoff(date: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M"))
        .ok()
}

pub fn day_string(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// The consecutive day strings scanned by the engine's day-by-day fallback,
/// starting at `from`.
pub fn scan_window(from: NaiveDate, days: u32) -> Vec<String> {
    (0..days)
        .filter_map(|i| from.checked_add_days(Days::new(u64::from(i))))
        .map(day_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn parses_full_kickoff_strings() {
        let dt = parse_kickoff("2026-03-01T15:00:00").expect("should parse");
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert_eq!(dt.hour(), 15);
    }

    #[test]
    fn parses_kickoff_without_seconds() {
        assert!(parse_kickoff("2026-03-01T15:00").is_some());
    }

    #[test]
    fn rejects_garbage_dates() {
        assert!(parse_kickoff("").is_none());
        assert!(parse_kickoff("not-a-date").is_none());
        assert!(parse_kickoff("2026-13-40T99:00:00").is_none());
    }

    #[test]
    fn scan_window_covers_consecutive_days() {
        let from = NaiveDate::from_ymd_opt(2026, 2, 27).unwrap();
        assert_eq!(
            scan_window(from, 3),
            vec!["2026-02-27", "2026-02-28", "2026-03-01"]
        );
    }

    #[test]
    fn scan_window_of_zero_days_is_empty() {
        let from = NaiveDate::from_ymd_opt(2026, 2, 27).unwrap();
        assert!(scan_window(from, 0).is_empty());
    }
}
