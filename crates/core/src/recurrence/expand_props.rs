//! Property-based tests for recurrence expansion.

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::expand::occurrences_in;
use super::types::{RecurrenceRule, Schedule};
use crate::dates::{DateWindow, last_day_of_month};
use crate::wallet::WalletRef;
use moneta_shared::types::AccountId;

const CAP: usize = 1000;

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

/// Strategy to generate valid schedules.
fn schedule_strategy() -> impl Strategy<Value = Schedule> {
    prop_oneof![
        Just(Schedule::Daily),
        (0u8..=6).prop_map(|day_of_week| Schedule::Weekly { day_of_week }),
        (1u32..=31).prop_map(|day_of_month| Schedule::Monthly { day_of_month }),
    ]
}

fn rule_starting(schedule: Schedule, start_date: NaiveDate) -> RecurrenceRule {
    RecurrenceRule::new(
        AccountId::new(),
        "Recurring".to_string(),
        Decimal::new(4500, 2),
        schedule,
        start_date,
        WalletRef::default_wallet(),
    )
}

/// Rule whose start date predates every generated window.
fn rule_with(schedule: Schedule) -> RecurrenceRule {
    rule_starting(schedule, NaiveDate::from_ymd_opt(2019, 1, 1).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* valid rule and window, every occurrence falls inside the
    /// window.
    #[test]
    fn prop_occurrences_inside_window(
        schedule in schedule_strategy(),
        window in window_strategy(),
    ) {
        let dates = occurrences_in(&rule_with(schedule), window, CAP).unwrap();
        for date in dates {
            prop_assert!(window.contains(date), "occurrence {date} escaped {window:?}");
        }
    }

    /// *For any* valid rule and window, occurrences are strictly ascending
    /// (sorted, no duplicates).
    #[test]
    fn prop_occurrences_strictly_ascending(
        schedule in schedule_strategy(),
        window in window_strategy(),
    ) {
        let dates = occurrences_in(&rule_with(schedule), window, CAP).unwrap();
        for pair in dates.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    /// *For any* weekly rule, every occurrence lands on the configured
    /// weekday and consecutive occurrences are exactly 7 days apart.
    #[test]
    fn prop_weekly_occurrences_step_by_seven(
        day_of_week in 0u8..=6,
        window in window_strategy(),
    ) {
        let rule = rule_with(Schedule::Weekly { day_of_week });
        let dates = occurrences_in(&rule, window, CAP).unwrap();

        for date in &dates {
            prop_assert_eq!(
                date.weekday().num_days_from_sunday(),
                u32::from(day_of_week)
            );
        }
        for pair in dates.windows(2) {
            prop_assert_eq!((pair[1] - pair[0]).num_days(), 7);
        }
    }

    /// *For any* daily rule, the occurrence count equals the window length
    /// (up to the cap).
    #[test]
    fn prop_daily_count_matches_window_length(window in window_strategy()) {
        let dates = occurrences_in(&rule_with(Schedule::Daily), window, CAP).unwrap();
        let expected = usize::try_from(window.day_count()).unwrap().min(CAP);
        prop_assert_eq!(dates.len(), expected);
    }

    /// *For any* monthly rule, each calendar month contributes at most one
    /// occurrence, on the requested day clamped to the month's length.
    #[test]
    fn prop_monthly_at_most_one_per_month(
        day_of_month in 1u32..=31,
        window in window_strategy(),
    ) {
        let rule = rule_with(Schedule::Monthly { day_of_month });
        let dates = occurrences_in(&rule, window, CAP).unwrap();

        for pair in dates.windows(2) {
            let months_apart =
                (pair[1].year(), pair[1].month()) != (pair[0].year(), pair[0].month());
            prop_assert!(months_apart, "two occurrences in one month: {pair:?}");
        }
        for date in dates {
            let last = last_day_of_month(date.year(), date.month()).day();
            prop_assert_eq!(date.day(), day_of_month.min(last));
        }
    }

    /// *For any* rule and window, the occurrence count never exceeds the cap.
    #[test]
    fn prop_cap_is_respected(
        schedule in schedule_strategy(),
        window in window_strategy(),
        cap in 0usize..=16,
    ) {
        let dates = occurrences_in(&rule_with(schedule), window, cap).unwrap();
        prop_assert!(dates.len() <= cap);
    }

    /// *For any* rule and window, expansion is deterministic.
    #[test]
    fn prop_expansion_deterministic(
        schedule in schedule_strategy(),
        window in window_strategy(),
    ) {
        let rule = rule_with(schedule);
        let first = occurrences_in(&rule, window, CAP).unwrap();
        let second = occurrences_in(&rule, window, CAP).unwrap();
        prop_assert_eq!(first, second);
    }

    /// *For any* rule, no occurrence falls before the rule's start date,
    /// wherever that date sits relative to the window.
    #[test]
    fn prop_no_occurrence_before_rule_start(
        schedule in schedule_strategy(),
        window in window_strategy(),
        start_date in date_strategy(),
    ) {
        let rule = rule_starting(schedule, start_date);
        let dates = occurrences_in(&rule, window, CAP).unwrap();
        for date in dates {
            prop_assert!(date >= start_date);
            prop_assert!(window.contains(date));
        }
    }

    /// *For any* inactive rule, expansion yields nothing.
    #[test]
    fn prop_inactive_rule_yields_nothing(
        schedule in schedule_strategy(),
        window in window_strategy(),
    ) {
        let mut rule = rule_with(schedule);
        rule.active = false;
        prop_assert!(occurrences_in(&rule, window, CAP).unwrap().is_empty());
    }

    /// *For any* rule with a nonpositive amount, expansion refuses to run.
    #[test]
    fn prop_nonpositive_amount_rejected(
        schedule in schedule_strategy(),
        window in window_strategy(),
        cents in -100_000i64..=0,
    ) {
        let mut rule = rule_with(schedule);
        rule.amount = Decimal::new(cents, 2);
        prop_assert!(occurrences_in(&rule, window, CAP).is_err());
    }
}
