//! Expiry countdowns and urgency classification

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use larder_core::Clock;

/// Items expiring within this many days are "expiring soon"
pub const EXPIRING_SOON_DAYS: i64 = 3;

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-ish date or date-time into its calendar date
///
/// Date-times keep the date as written; the time of day and any offset are
/// dropped.
pub fn parse_expiry_date(expiry: &str) -> Option<NaiveDate> {
    let expiry = expiry.trim();
    if expiry.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(expiry, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(expiry) {
        return Some(dt.date_naive());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(expiry, fmt).ok())
        .map(|dt| dt.date())
}

/// Whole calendar days from `today` until `expiry`
///
/// Negative once the date has passed. Blank or unparsable input yields
/// `None`.
pub fn days_until(expiry: &str, today: NaiveDate) -> Option<i64> {
    parse_expiry_date(expiry).map(|date| (date - today).num_days())
}

/// [`days_until`] against the clock's current calendar day
pub fn days_until_with(clock: &dyn Clock, expiry: &str) -> Option<i64> {
    days_until(expiry, clock.today())
}

/// Whether an item with `days_left` should be used up first
pub fn is_expiring_soon(days_left: Option<i64>) -> bool {
    matches!(days_left, Some(days) if days <= EXPIRING_SOON_DAYS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use larder_core::ManualClock;

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_boundary() {
        let today = jan(10);
        assert_eq!(days_until("2024-01-13", today), Some(3));
        assert!(is_expiring_soon(days_until("2024-01-13", today)));

        assert_eq!(days_until("2024-01-14", today), Some(4));
        assert!(!is_expiring_soon(days_until("2024-01-14", today)));
    }

    #[test]
    fn test_expired_is_negative() {
        assert_eq!(days_until("2024-01-08", jan(10)), Some(-2));
        assert!(is_expiring_soon(Some(-2)));
    }

    #[test]
    fn test_same_day() {
        assert_eq!(days_until("2024-01-10", jan(10)), Some(0));
    }

    #[test]
    fn test_time_of_day_ignored() {
        let today = jan(10);
        assert_eq!(days_until("2024-01-13T23:59:59Z", today), Some(3));
        assert_eq!(days_until("2024-01-13T00:00:01+09:00", today), Some(3));
        assert_eq!(days_until("2024-01-13T18:30:00", today), Some(3));
        assert_eq!(days_until("2024-01-13 06:15:00", today), Some(3));
        assert_eq!(days_until("2024-01-13T06:15:00.250", today), Some(3));
        assert_eq!(days_until("2024-01-13T10:00", today), Some(3));
        assert_eq!(days_until("2024-01-13 10:00", today), Some(3));
    }

    #[test]
    fn test_unparsable_is_none() {
        let today = jan(10);
        assert_eq!(days_until("", today), None);
        assert_eq!(days_until("   ", today), None);
        assert_eq!(days_until("next tuesday", today), None);
        assert_eq!(days_until("2024-02-30", today), None);
        assert!(!is_expiring_soon(None));
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert_eq!(days_until(" 2024-01-11 ", jan(10)), Some(1));
    }

    #[test]
    fn test_with_clock() {
        let clock = ManualClock::on_date(jan(10));
        assert_eq!(days_until_with(&clock, "2024-01-12"), Some(2));
    }
}
