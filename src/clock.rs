//! Current-date source injected into the tracker so day rollover and backdating can be tested.

use chrono::{Local, NaiveDate, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// Source of the session date and of wall-clock instants used for meal ids.
pub trait Clock {
    /// Calendar date the session considers "today".
    fn today(&self) -> NaiveDate;

    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// Clock backed by the system time; "today" is the local calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock pinned to a date. Each `now_millis` call advances by one millisecond.
#[derive(Debug)]
pub struct FixedClock {
    today: NaiveDate,
    millis: AtomicI64,
}

impl FixedClock {
    /// Pins the clock to midnight UTC of `today`.
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        let millis = today
            .and_hms_opt(0, 0, 0)
            .map_or(0, |dt| dt.and_utc().timestamp_millis());
        Self {
            today,
            millis: AtomicI64::new(millis),
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }

    fn now_millis(&self) -> i64 {
        self.millis.fetch_add(1, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_fixed_clock_is_pinned() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let clock = FixedClock::new(date);
        assert_eq!(clock.today(), date);

        let first = clock.now_millis();
        let second = clock.now_millis();
        assert_eq!(second, first + 1);
        assert_eq!(first, 1_714_521_600_000);
    }
}
