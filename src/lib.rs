//! Calendar computation core for date-picker components.
//!
//! Everything here is pure state-in, data-out: month grids, month/year
//! rosters, range-interval evaluation, and a segmented date-field editing
//! engine. Rendering, event wiring, and widget trees are out of scope;
//! a UI layer consumes the plain structs these modules produce.

mod consts;
mod date_math;
mod field;
mod grid;
mod locale;
mod prelude;
mod range;
mod roster;

pub use consts::*;
pub use date_math::{
    Clock, FixedClock, SystemClock, add_months, add_years, days_in_month, days_in_month_of,
    first_weekday_of_month, is_leap_year, is_same_day, is_same_month, is_today, set_day, set_month,
    set_year, start_of_today,
};
pub use field::{
    EditOp, FieldEngine, FieldValue, Segment, SegmentKey, parse_pattern, render,
};
pub use grid::{DayCell, DayConstraints, MonthGrid, Selection, Week, build_month_grid};
pub use locale::{
    FirstDay, LocaleError, LocaleFormat, WeekInfo, WeekdayLabel, parse_tag, resolve_locale,
};
pub use range::{
    DateRange, DayHighlight, HighlightOptions, HoverState, RangeMembership, RangeSelection,
    day_highlight, membership,
};
pub use roster::{MonthEntry, build_month_roster, build_year_roster};
