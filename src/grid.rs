//! Fixed 6x7 month-grid generation.
//!
//! A grid always holds 42 cells: leading blanks aligning the 1st of the
//! month under its weekday column, one cell per day, and trailing blanks
//! filling out the sixth week. With at most 31 days and at most 6 leading
//! blanks the 42-cell budget can never overflow; the builder asserts it
//! anyway.

use chrono::NaiveDate;

use crate::consts::{GRID_CELLS, GRID_COLUMNS, GRID_WEEKS};
use crate::date_math::{days_in_month_of, first_weekday_of_month, is_same_day, set_day};
use crate::locale::FirstDay;
use crate::range::DateRange;

/// One day cell of a month grid. Blank padding cells are `None` in the
/// surrounding [`Week`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DayCell {
    pub date: NaiveDate,
    /// 1-based day of month, duplicated out of `date` for direct rendering.
    pub day: u32,
    /// Exact-match highlight: the cell is a selected date or a range
    /// endpoint. Interval-body membership is a separate concern, decided
    /// per day by [`crate::range::membership`].
    pub selected: bool,
}

/// One grid row: seven cells, blanks as `None`.
pub type Week = [Option<DayCell>; GRID_COLUMNS];

/// A complete month view: always six weeks of seven cells.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MonthGrid {
    weeks: [Week; GRID_WEEKS],
}

impl MonthGrid {
    pub fn weeks(&self) -> &[Week; GRID_WEEKS] {
        &self.weeks
    }

    /// All 42 cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Option<DayCell>> {
        self.weeks.iter().flatten()
    }

    /// The non-blank day cells in order.
    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells().flatten()
    }
}

/// What the grid builder marks as `selected` on each cell.
#[derive(Debug, Clone, Copy, Default)]
pub enum Selection<'a> {
    /// Nothing is selected.
    #[default]
    None,
    /// A single picked date.
    Single(NaiveDate),
    /// Range endpoints; only the endpoints themselves match.
    Range(&'a DateRange),
}

impl Selection<'_> {
    fn matches(&self, date: NaiveDate) -> bool {
        match *self {
            Self::None => false,
            Self::Single(picked) => is_same_day(date, picked),
            Self::Range(range) => range
                .endpoints()
                .into_iter()
                .flatten()
                .any(|endpoint| is_same_day(date, endpoint)),
        }
    }
}

/// Builds the six-week grid for `reference`'s month.
///
/// `first_day` decides which weekday heads each row and therefore how
/// many leading blanks precede the 1st.
pub fn build_month_grid(
    reference: NaiveDate,
    selection: Selection<'_>,
    first_day: FirstDay,
) -> MonthGrid {
    let days_in_month = days_in_month_of(reference);
    let first_weekday = first_weekday_of_month(reference);

    // Align day 1 under its weekday column for the given week start.
    let offset = if first_day.starts_sunday() { 0 } else { 1 };
    let leading = ((7 + first_weekday - offset) % 7) as usize;

    debug_assert!(leading + days_in_month as usize <= GRID_CELLS);

    let mut weeks = [[None; GRID_COLUMNS]; GRID_WEEKS];

    for day in 1..=days_in_month {
        let date = set_day(reference, i64::from(day));
        let slot = leading + (day as usize - 1);
        weeks[slot / GRID_COLUMNS][slot % GRID_COLUMNS] = Some(DayCell {
            date,
            day,
            selected: selection.matches(date),
        });
    }

    MonthGrid { weeks }
}

/// Which days of a calendar may not be picked. Mirrors the constraint
/// props a calendar component exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DayConstraints {
    pub disable_past: bool,
    pub disable_future: bool,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
}

impl DayConstraints {
    /// Whether `date` is unselectable under these constraints, judged
    /// against the supplied `today`.
    pub fn is_disabled(&self, date: NaiveDate, today: NaiveDate) -> bool {
        (self.disable_past && date < today)
            || (self.disable_future && date > today)
            || self.min_date.is_some_and(|min| date < min)
            || self.max_date.is_some_and(|max| date > max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_math::{add_months, days_in_month};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_grid_is_always_42_cells() {
        let grid = build_month_grid(d(2024, 8, 15), Selection::None, FirstDay::Sunday);
        assert_eq!(grid.weeks().len(), 6);
        assert_eq!(grid.cells().count(), 42);
        for week in grid.weeks() {
            assert_eq!(week.len(), 7);
        }
    }

    #[test]
    fn test_grid_invariant_over_many_months_and_week_starts() {
        // Every month over several years, both week starts: the day cells
        // are exactly 1..=days_in_month, contiguous, inside 42 cells.
        let mut reference = d(2020, 1, 1);
        for _ in 0..48 {
            for first_day in [FirstDay::Sunday, FirstDay::Monday] {
                let grid = build_month_grid(reference, Selection::None, first_day);
                assert_eq!(grid.cells().count(), 42);

                let days: Vec<u32> = grid.days().map(|cell| cell.day).collect();
                let expected: Vec<u32> = (1..=days_in_month_of(reference)).collect();
                assert_eq!(days, expected, "{reference} {first_day:?}");
            }
            reference = add_months(reference, 1);
        }
    }

    #[test]
    fn test_leading_blanks_follow_week_start() {
        // Aug 1 2024 is a Thursday
        let sunday_grid = build_month_grid(d(2024, 8, 1), Selection::None, FirstDay::Sunday);
        let leading = sunday_grid.cells().take_while(|c| c.is_none()).count();
        assert_eq!(leading, 4);

        let monday_grid = build_month_grid(d(2024, 8, 1), Selection::None, FirstDay::Monday);
        let leading = monday_grid.cells().take_while(|c| c.is_none()).count();
        assert_eq!(leading, 3);
    }

    #[test]
    fn test_first_of_month_lands_in_its_weekday_column() {
        // Sep 1 2024 is a Sunday: zero leading blanks Sunday-first,
        // six of them Monday-first.
        let grid = build_month_grid(d(2024, 9, 1), Selection::None, FirstDay::Sunday);
        assert_eq!(grid.weeks()[0][0].map(|c| c.day), Some(1));

        let grid = build_month_grid(d(2024, 9, 1), Selection::None, FirstDay::Monday);
        assert_eq!(grid.weeks()[0][6].map(|c| c.day), Some(1));
    }

    #[test]
    fn test_single_selection_marks_exactly_one_cell() {
        let grid = build_month_grid(
            d(2024, 8, 1),
            Selection::Single(d(2024, 8, 25)),
            FirstDay::Sunday,
        );
        let selected: Vec<u32> = grid.days().filter(|c| c.selected).map(|c| c.day).collect();
        assert_eq!(selected, vec![25]);
    }

    #[test]
    fn test_range_selection_marks_endpoints_only() {
        let range = DateRange::new(Some(d(2024, 8, 5)), Some(d(2024, 8, 10)));
        let grid = build_month_grid(d(2024, 8, 1), Selection::Range(&range), FirstDay::Sunday);
        let selected: Vec<u32> = grid.days().filter(|c| c.selected).map(|c| c.day).collect();
        // Endpoints only; the interval body is range membership, not selection
        assert_eq!(selected, vec![5, 10]);
    }

    #[test]
    fn test_partial_range_marks_present_endpoint() {
        let range = DateRange::new(Some(d(2024, 8, 5)), None);
        let grid = build_month_grid(d(2024, 8, 1), Selection::Range(&range), FirstDay::Sunday);
        let selected: Vec<u32> = grid.days().filter(|c| c.selected).map(|c| c.day).collect();
        assert_eq!(selected, vec![5]);
    }

    #[test]
    fn test_day_cells_carry_their_dates() {
        let grid = build_month_grid(d(2024, 2, 10), Selection::None, FirstDay::Sunday);
        let last = grid.days().last().unwrap();
        assert_eq!(last.date, d(2024, 2, 29), "2024 is a leap year");
        assert_eq!(days_in_month(2024, 2), 29);
    }

    #[test]
    fn test_constraints() {
        let today = d(2024, 8, 25);
        let past_off = DayConstraints {
            disable_past: true,
            ..DayConstraints::default()
        };
        assert!(past_off.is_disabled(d(2024, 8, 24), today));
        assert!(!past_off.is_disabled(today, today));
        assert!(!past_off.is_disabled(d(2024, 8, 26), today));

        let future_off = DayConstraints {
            disable_future: true,
            ..DayConstraints::default()
        };
        assert!(future_off.is_disabled(d(2024, 8, 26), today));
        assert!(!future_off.is_disabled(today, today));

        let bounded = DayConstraints {
            min_date: Some(d(2024, 8, 10)),
            max_date: Some(d(2024, 8, 20)),
            ..DayConstraints::default()
        };
        assert!(bounded.is_disabled(d(2024, 8, 9), today));
        assert!(!bounded.is_disabled(d(2024, 8, 15), today));
        assert!(bounded.is_disabled(d(2024, 8, 21), today));
    }

    #[test]
    fn test_grid_serializes() {
        let grid = build_month_grid(d(2024, 8, 1), Selection::None, FirstDay::Sunday);
        let json = serde_json::to_string(&grid).unwrap();
        let parsed: MonthGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(grid, parsed);
    }
}
