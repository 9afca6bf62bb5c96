//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Creates a new timestamp by subtracting the specified number of days.
    pub fn minus_days(&self, days: i64) -> Self {
        Self(self.0 - Duration::days(days))
    }

    /// Calendar day (UTC) this timestamp falls on.
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// UTC midnight of the day this timestamp falls on.
    pub fn start_of_day(&self) -> Self {
        Self(Utc.from_utc_datetime(&self.date().and_time(NaiveTime::MIN)))
    }

    /// UTC midnight of the calendar day `days` before today.
    pub fn start_of_day_days_ago(days: i64) -> Self {
        Self::now().minus_days(days).start_of_day()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn fixed(rfc3339: &str) -> Timestamp {
        Timestamp::from_datetime(
            DateTime::parse_from_rfc3339(rfc3339)
                .unwrap()
                .with_timezone(&Utc),
        )
    }

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn minus_days_moves_backwards() {
        let ts = fixed("2024-03-01T10:00:00Z");
        let earlier = ts.minus_days(60);
        assert!(earlier.is_before(&ts));
        assert_eq!(earlier.date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn start_of_day_truncates_to_utc_midnight() {
        let ts = fixed("2024-03-01T17:45:12Z");
        assert_eq!(ts.start_of_day(), fixed("2024-03-01T00:00:00Z"));
    }

    #[test]
    fn start_of_day_days_ago_covers_whole_first_day() {
        let start = Timestamp::start_of_day_days_ago(60);
        let expected_day = Timestamp::now().minus_days(60).date();

        assert_eq!(start.date(), expected_day);
        assert_eq!(start, start.start_of_day());
    }

    #[test]
    fn date_uses_utc_calendar_day() {
        let ts = fixed("2024-01-15T23:59:59Z");
        assert_eq!(ts.date().day(), 15);
    }

    #[test]
    fn timestamp_deserializes_from_json() {
        let ts: Timestamp = serde_json::from_str("\"2024-01-15T10:30:00Z\"").unwrap();
        assert_eq!(ts.as_datetime().year(), 2024);
    }
}
