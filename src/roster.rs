//! Month and year rosters for the month/year selection sub-views.

use chrono::{Datelike, NaiveDate};

use crate::consts::{YEAR_ROSTER_LEN, YEARS_BEFORE_REFERENCE};
use crate::date_math::{first_of_month, is_same_month};

/// One entry of the 12-month roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MonthEntry {
    /// First day of the entry's month in the reference year.
    pub date: NaiveDate,
    /// Whether this is the month of the currently selected date.
    pub selected: bool,
}

/// The twelve months of `reference`'s year, January first, each flagged
/// against the selected date (if any).
pub fn build_month_roster(reference: NaiveDate, selected: Option<NaiveDate>) -> [MonthEntry; 12] {
    std::array::from_fn(|i| {
        let date = first_of_month(reference.year(), i as u32 + 1);
        MonthEntry {
            date,
            selected: selected.is_some_and(|sel| is_same_month(date, sel)),
        }
    })
}

/// Twenty consecutive years, `reference_year - 10 ..= reference_year + 9`.
/// Centered on the reference year only; a selected year outside the
/// window does not recenter it.
pub fn build_year_roster(reference_year: i32) -> [i32; YEAR_ROSTER_LEN] {
    std::array::from_fn(|i| reference_year - YEARS_BEFORE_REFERENCE + i as i32)
}
