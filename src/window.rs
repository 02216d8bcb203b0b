//! Time-window counting over timestamped records
//!
//! Two window conventions coexist in the platform's metrics and are kept
//! deliberately distinct:
//!
//! - [`Window::RollingHours`] measures fractional elapsed hours, so a
//!   "last 7 days" window is exactly the preceding 168 hours.
//! - [`Window::CalendarDays`] buckets by the whole number of elapsed days,
//!   so membership shifts at each 24-hour boundary relative to `now` rather
//!   than sliding continuously.
//!
//! The two produce different counts near bucket boundaries and are not
//! interchangeable; every call-site picks one explicitly.

use chrono::{DateTime, Utc};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// An aggregation window anchored at a caller-supplied `now`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// Membership iff the fractional hours elapsed since the record is at
    /// most the given length. Records timestamped after `now` count as
    /// elapsed-zero and are included.
    RollingHours(i64),
    /// Membership iff `floor(days elapsed)` is at most the given length.
    CalendarDays(i64),
}

impl Window {
    /// Whether `at` falls inside the current window ending at `now`
    pub fn contains(&self, now: DateTime<Utc>, at: DateTime<Utc>) -> bool {
        match *self {
            Window::RollingHours(hours) => hours_since(now, at) <= hours as f64,
            Window::CalendarDays(days) => whole_days_since(now, at) <= days,
        }
    }

    /// Whether `at` falls inside the immediately preceding window of equal
    /// length: no gap and no overlap with the current one
    pub fn preceding_contains(&self, now: DateTime<Utc>, at: DateTime<Utc>) -> bool {
        match *self {
            Window::RollingHours(hours) => {
                let elapsed = hours_since(now, at);
                elapsed > hours as f64 && elapsed <= (2 * hours) as f64
            }
            Window::CalendarDays(days) => {
                let elapsed = whole_days_since(now, at);
                elapsed > days && elapsed <= 2 * days
            }
        }
    }
}

/// Counts for a window and the immediately preceding window of equal length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowComparison {
    pub current: usize,
    pub previous: usize,
}

/// Count records whose timestamp lies in the half-open range `[start, end)`
pub fn count_in_range<T>(
    records: &[T],
    at: impl Fn(&T) -> DateTime<Utc>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> usize {
    records
        .iter()
        .filter(|r| {
            let t = at(r);
            t >= start && t < end
        })
        .count()
}

/// Count records inside the window ending at `now`
pub fn count_recent<T>(
    records: &[T],
    at: impl Fn(&T) -> DateTime<Utc>,
    now: DateTime<Utc>,
    window: Window,
) -> usize {
    records.iter().filter(|r| window.contains(now, at(r))).count()
}

/// Count the current window and the immediately preceding one in a single pass
pub fn compare_windows<T>(
    records: &[T],
    at: impl Fn(&T) -> DateTime<Utc>,
    now: DateTime<Utc>,
    window: Window,
) -> WindowComparison {
    let mut comparison = WindowComparison {
        current: 0,
        previous: 0,
    };

    for record in records {
        let t = at(record);
        if window.contains(now, t) {
            comparison.current += 1;
        } else if window.preceding_contains(now, t) {
            comparison.previous += 1;
        }
    }

    comparison
}

fn hours_since(now: DateTime<Utc>, at: DateTime<Utc>) -> f64 {
    (now - at).num_milliseconds() as f64 / MILLIS_PER_HOUR
}

fn whole_days_since(now: DateTime<Utc>, at: DateTime<Utc>) -> i64 {
    ((now - at).num_milliseconds() as f64 / MILLIS_PER_DAY).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn range_count_is_half_open() {
        let now = base();
        let stamps = vec![
            now - Duration::hours(2),
            now - Duration::hours(1),
            now, // end is exclusive
        ];
        let count = count_in_range(&stamps, |t| *t, now - Duration::hours(2), now);
        assert_eq!(count, 2);
    }

    #[test]
    fn rolling_hours_uses_fractional_elapsed_time() {
        let now = base();
        let window = Window::RollingHours(24);

        assert!(window.contains(now, now - Duration::hours(24)));
        assert!(!window.contains(now, now - Duration::hours(24) - Duration::minutes(1)));
        // Records slightly in the future still count as current.
        assert!(window.contains(now, now + Duration::minutes(5)));
    }

    #[test]
    fn calendar_days_bucket_by_whole_days() {
        let now = base();
        let window = Window::CalendarDays(7);

        // 7 days and 23 hours elapsed floors to 7 whole days: still current.
        assert!(window.contains(now, now - Duration::days(7) - Duration::hours(23)));
        // The rolling form would already call this previous-window.
        assert!(!Window::RollingHours(7 * 24)
            .contains(now, now - Duration::days(7) - Duration::hours(23)));
        assert!(!window.contains(now, now - Duration::days(8)));
    }

    #[test]
    fn preceding_window_has_no_gap_or_overlap() {
        let now = base();
        let window = Window::CalendarDays(7);

        let in_previous = now - Duration::days(10);
        assert!(!window.contains(now, in_previous));
        assert!(window.preceding_contains(now, in_previous));

        let too_old = now - Duration::days(15);
        assert!(!window.preceding_contains(now, too_old));

        // Exactly 14 whole days elapsed is the tail of the previous window.
        let boundary = now - Duration::days(14);
        assert!(window.preceding_contains(now, boundary));
    }

    #[test]
    fn compare_windows_splits_counts() {
        let now = base();
        let stamps = vec![
            now - Duration::days(1),
            now - Duration::days(3),
            now - Duration::days(9),
            now - Duration::days(12),
            now - Duration::days(20),
        ];

        let cmp = compare_windows(&stamps, |t| *t, now, Window::CalendarDays(7));
        assert_eq!(cmp.current, 2);
        assert_eq!(cmp.previous, 2);
    }
}
