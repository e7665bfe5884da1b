//! Pure calendar-day arithmetic used by the grid, roster, and field engines.
//!
//! All operations mirror ECMAScript `Date` setter normalization: an
//! out-of-range day or month rolls into the adjacent month/year instead of
//! erroring. That rollover is part of the observable contract
//! (`add_months(Jan 31, 1)` lands on Mar 2 or Mar 3 depending on leap year)
//! and must not be "fixed".

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta};

use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    MAX_MONTH,
};

/// Source of the current date and time.
///
/// Everything that needs "now" (today-highlighting, the year segment's jump
/// value, resolution of partially specified field values) takes a `Clock` so
/// tests can pin time.
pub trait Clock {
    /// Current local date and time.
    fn now(&self) -> NaiveDateTime;

    /// Current local date with the time component dropped.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// The default clock, backed by the system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// A clock frozen at a fixed instant. Intended for tests and previews.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Today's date with time components dropped.
pub fn start_of_today(clock: &impl Clock) -> NaiveDate {
    clock.today()
}

pub const fn is_leap_year(year: i32) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: i32, month: u32) -> u32 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Number of days in `date`'s month, leap years included.
pub fn days_in_month_of(date: NaiveDate) -> u32 {
    days_in_month(date.year(), date.month())
}

/// Weekday of the 1st of `date`'s month, 0 = Sunday .. 6 = Saturday.
pub fn first_weekday_of_month(date: NaiveDate) -> u32 {
    first_of_month(date.year(), date.month()).weekday().num_days_from_sunday()
}

/// Whether two dates are the same calendar day.
pub fn is_same_day(a: NaiveDate, b: NaiveDate) -> bool {
    a == b
}

/// Whether two dates fall in the same month of the same year.
pub fn is_same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Whether `date` is today according to `clock`.
pub fn is_today(date: NaiveDate, clock: &impl Clock) -> bool {
    is_same_day(date, clock.today())
}

/// Shifts `date` by `n` months, keeping the day-of-month and rolling
/// forward when the target month is shorter.
pub fn add_months(date: NaiveDate, n: i32) -> NaiveDate {
    from_parts(date.year(), i64::from(date.month0()) + i64::from(n), i64::from(date.day()))
}

/// Shifts `date` by `n` years, keeping month and day. Feb 29 rolls to
/// Mar 1 in a non-leap target year.
pub fn add_years(date: NaiveDate, n: i32) -> NaiveDate {
    from_parts(date.year() + n, i64::from(date.month0()), i64::from(date.day()))
}

/// Replaces the year, leaving month and day untouched (subject to rollover).
pub fn set_year(date: NaiveDate, year: i32) -> NaiveDate {
    from_parts(year, i64::from(date.month0()), i64::from(date.day()))
}

/// Replaces the month (1-based). Values outside `1..=12` roll into
/// adjacent years, as do day-of-month overflows.
pub fn set_month(date: NaiveDate, month: i64) -> NaiveDate {
    from_parts(date.year(), month - 1, i64::from(date.day()))
}

/// Replaces the day-of-month. Day 0 is the last day of the previous
/// month; days past the month's end roll forward.
pub fn set_day(date: NaiveDate, day: i64) -> NaiveDate {
    from_parts(date.year(), i64::from(date.month0()), day)
}

/// Builds a date from a year, a 0-based month offset, and a 1-based day,
/// normalizing both out-of-range months and out-of-range days the way the
/// ECMAScript `Date` constructor does.
pub(crate) fn from_parts(year: i32, month0: i64, day: i64) -> NaiveDate {
    let months = i64::from(year) * 12 + month0;
    let norm_year = months.div_euclid(12);
    let norm_month = months.rem_euclid(12) as u32 + 1;

    // Day 1 of the normalized month always exists; day offsets (including
    // zero and negative ones) are absorbed by plain day arithmetic.
    let first = first_of_month(norm_year as i32, norm_month);
    first
        .checked_add_signed(TimeDelta::days(day - 1))
        .expect("normalized date is within chrono's supported range")
}

pub(crate) fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1)
        .expect("day 1 exists in every month of chrono's supported years")
}
