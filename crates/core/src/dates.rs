//! Inclusive date windows and calendar math.
//!
//! Periods, recurrence expansion, and migration all reason about inclusive
//! day ranges. The helpers here are the single place where month lengths
//! and day clamping are decided.

use chrono::{Datelike, Duration, NaiveDate};

/// An inclusive range of calendar days.
///
/// Both endpoints are part of the window. Construction guarantees
/// `start <= end`, so every other operation can assume a well-formed range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    /// Creates a window from inclusive endpoints.
    ///
    /// Returns `None` if `start` is after `end`.
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// First day of the window.
    #[must_use]
    pub const fn start(self) -> NaiveDate {
        self.start
    }

    /// Last day of the window.
    #[must_use]
    pub const fn end(self) -> NaiveDate {
        self.end
    }

    /// Returns true if the given date falls within the window.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days in the window, counting both endpoints.
    #[must_use]
    pub fn day_count(self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Signed day offset of `date` from the start of the window.
    ///
    /// Dates before the start yield negative offsets.
    #[must_use]
    pub fn offset_from_start(self, date: NaiveDate) -> i64 {
        (date - self.start).num_days()
    }

    /// Date at the given day offset from the start, pinned to the window.
    ///
    /// Offsets past the end land on the last day, negative offsets on the
    /// first day.
    #[must_use]
    pub fn date_at_offset(self, offset: i64) -> NaiveDate {
        self.clamp(self.start + Duration::days(offset))
    }

    /// Pins a date into the window.
    #[must_use]
    pub fn clamp(self, date: NaiveDate) -> NaiveDate {
        date.max(self.start).min(self.end)
    }
}

/// Returns the last day of a month.
#[must_use]
pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };

    next_month
        .and_then(|first| first.pred_opt())
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap_or_default())
}

/// Returns the date for a day-of-month, clamped to the month's length.
///
/// A day of 31 in February yields February 28 (or 29 in a leap year).
#[must_use]
pub fn clamp_day_of_month(year: i32, month: u32, day: u32) -> NaiveDate {
    let last = last_day_of_month(year, month);
    NaiveDate::from_ymd_opt(year, month, day.min(last.day())).unwrap_or(last)
}

/// Year and month of the month following the given one.
pub(crate) fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 { (year + 1, 1) } else { (year, month + 1) }
}


/// Property-based tests for date window arithmetic.
#[cfg(test)]
mod props {
    use super::*;
    use proptest::prelude::*;

    /// Strategy to generate valid dates within a reasonable range.
    fn date_strategy() -> impl Strategy<Value = NaiveDate> {
        (2020i32..=2030, 1u32..=12, 1u32..=28)
            .prop_map(|(year, month, day)| NaiveDate::from_ymd_opt(year, month, day).unwrap())
    }

    /// Strategy to generate a window of 1 to 400 days.
    fn window_strategy() -> impl Strategy<Value = DateWindow> {
        date_strategy().prop_flat_map(|start| {
            (Just(start), 0i64..400).prop_map(move |(s, days)| {
                DateWindow::new(s, s + chrono::Duration::days(days)).unwrap()
            })
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// *For any* window and date, the clamped date falls inside the window.
        #[test]
        fn prop_clamp_lands_inside(window in window_strategy(), date in date_strategy()) {
            let clamped = window.clamp(date);
            prop_assert!(window.contains(clamped));
        }

        /// *For any* date already inside the window, clamping is the identity.
        #[test]
        fn prop_clamp_is_identity_inside(window in window_strategy(), offset in 0i64..400) {
            let date = window.start() + chrono::Duration::days(offset);
            if window.contains(date) {
                prop_assert_eq!(window.clamp(date), date);
            }
        }

        /// *For any* in-window date, `date_at_offset(offset_from_start(d))`
        /// returns `d` unchanged.
        #[test]
        fn prop_offset_round_trips(window in window_strategy(), offset in 0i64..400) {
            let date = window.start() + chrono::Duration::days(offset);
            if window.contains(date) {
                let round_tripped = window.date_at_offset(window.offset_from_start(date));
                prop_assert_eq!(round_tripped, date);
            }
        }

        /// *For any* window, the day count matches the number of contained days.
        #[test]
        fn prop_day_count_positive(window in window_strategy()) {
            prop_assert!(window.day_count() >= 1);
            prop_assert_eq!(
                window.day_count(),
                window.offset_from_start(window.end()) + 1
            );
        }

        /// *For any* month, the clamped day never exceeds the month length
        /// and keeps the requested day when it fits.
        #[test]
        fn prop_clamp_day_respects_month_length(
            year in 2020i32..=2030,
            month in 1u32..=12,
            day in 1u32..=31,
        ) {
            let clamped = clamp_day_of_month(year, month, day);
            let last = last_day_of_month(year, month);

            prop_assert_eq!(clamped.month(), month);
            prop_assert!(clamped.day() <= last.day());
            if day <= last.day() {
                prop_assert_eq!(clamped.day(), day);
            } else {
                prop_assert_eq!(clamped.day(), last.day());
            }
        }
    }
}
