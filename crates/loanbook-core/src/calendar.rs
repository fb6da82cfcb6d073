//! Calendar arithmetic over immutable `NaiveDate` values.
//!
//! `add_business_days` skips weekends only, while `count_business_days`
//! skips weekends and holidays. Projected end dates and schedules therefore
//! disagree whenever a holiday falls inside the installment window.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::holidays::{is_holiday, Holiday};

/// True for Saturday and Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// A weekday that is not a holiday.
pub fn is_business_day(date: NaiveDate, holidays: &[Holiday]) -> bool {
    !is_weekend(date) && !is_holiday(date, holidays)
}

/// Offset by `n` calendar days, saturating at the ends of the chrono range.
pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    let magnitude = Days::new(n.unsigned_abs());
    if n >= 0 {
        date.checked_add_days(magnitude).unwrap_or(NaiveDate::MAX)
    } else {
        date.checked_sub_days(magnitude).unwrap_or(NaiveDate::MIN)
    }
}

/// Walk forward from `start` until `n` weekdays have been passed and return
/// the day on which the count was reached. Holidays are not skipped.
pub fn add_business_days(start: NaiveDate, n: u32) -> NaiveDate {
    let mut current = start;
    let mut counted = 0;
    while counted < n {
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
        if !is_weekend(current) {
            counted += 1;
        }
    }
    current
}

/// Count business days in the inclusive range `[start, end]`.
///
/// Returns 0 when `start > end`.
pub fn count_business_days(start: NaiveDate, end: NaiveDate, holidays: &[Holiday]) -> u32 {
    if start > end {
        return 0;
    }
    start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| is_business_day(*d, holidays))
        .count() as u32
}
