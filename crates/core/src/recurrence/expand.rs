//! Window expansion of recurrence rules.
//!
//! Expansion is pure calendar math: it never looks at wallets, periods, or
//! existing entries. An inactive rule expands to nothing, and no occurrence
//! falls before the rule's start date.

use chrono::{Datelike, Duration, NaiveDate};

use super::error::RuleError;
use super::types::{RecurrenceRule, Schedule};
use crate::dates::{self, DateWindow};

/// Expands a rule into the dates it fires on within the window.
///
/// Dates come back sorted ascending, inside the window, and never before
/// `rule.start_date`. The list is truncated at `max_occurrences`, a guard
/// against runaway windows.
///
/// # Errors
///
/// Returns an error if the rule fails validation. Expansion itself cannot
/// fail.
pub fn occurrences_in(
    rule: &RecurrenceRule,
    window: DateWindow,
    max_occurrences: usize,
) -> Result<Vec<NaiveDate>, RuleError> {
    rule.validate()?;
    if !rule.active {
        return Ok(Vec::new());
    }

    // The rule only exists from its start date onward, so expansion runs
    // over the window narrowed to that date.
    let Some(effective) = effective_window(rule.start_date, window) else {
        return Ok(Vec::new());
    };
    Ok(expand_schedule(rule.schedule, effective, max_occurrences))
}

fn effective_window(start_date: NaiveDate, window: DateWindow) -> Option<DateWindow> {
    DateWindow::new(window.start().max(start_date), window.end())
}

fn expand_schedule(schedule: Schedule, window: DateWindow, cap: usize) -> Vec<NaiveDate> {
    match schedule {
        Schedule::Daily => daily_dates(window, cap),
        Schedule::Weekly { day_of_week } => weekly_dates(window, day_of_week, cap),
        Schedule::Monthly { day_of_month } => monthly_dates(window, day_of_month, cap),
    }
}

fn daily_dates(window: DateWindow, cap: usize) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = window.start();

    while current <= window.end() && dates.len() < cap {
        dates.push(current);
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }

    dates
}

fn weekly_dates(window: DateWindow, day_of_week: u8, cap: usize) -> Vec<NaiveDate> {
    let target = u32::from(day_of_week);
    let start_weekday = window.start().weekday().num_days_from_sunday();
    let lead_days = i64::from((target + 7 - start_weekday) % 7);

    let Some(mut current) = window.start().checked_add_signed(Duration::days(lead_days)) else {
        return Vec::new();
    };

    let mut dates = Vec::new();
    while current <= window.end() && dates.len() < cap {
        dates.push(current);
        match current.checked_add_signed(Duration::days(7)) {
            Some(next) => current = next,
            None => break,
        }
    }

    dates
}

fn monthly_dates(window: DateWindow, day_of_month: u32, cap: usize) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let (mut year, mut month) = (window.start().year(), window.start().month());

    loop {
        let Some(first_of_month) = NaiveDate::from_ymd_opt(year, month, 1) else {
            break;
        };
        if first_of_month > window.end() || dates.len() >= cap {
            break;
        }

        // Clamped to the month's length, so a day-31 rule fires in February.
        let occurrence = dates::clamp_day_of_month(year, month, day_of_month);
        if window.contains(occurrence) {
            dates.push(occurrence);
        }

        (year, month) = dates::next_month(year, month);
    }

    dates
}
