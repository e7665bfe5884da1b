use std::time::Duration;

/// Maximum year a segmented field can hold (four digits)
pub const MAX_YEAR: u32 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u32 = 12;

/// Month number for February
pub const FEBRUARY: u32 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u32 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u32; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Number of week rows a month grid always shows
pub const GRID_WEEKS: usize = 6;
/// Number of columns (weekdays) per week row
pub const GRID_COLUMNS: usize = 7;
/// Total cell count of a month grid, blanks included
pub const GRID_CELLS: usize = GRID_WEEKS * GRID_COLUMNS;

/// Years listed before the reference year in a year roster
pub const YEARS_BEFORE_REFERENCE: i32 = 10;
/// Total length of a year roster
pub const YEAR_ROSTER_LEN: usize = 20;

/// Delay before a cleared hover date actually disappears. Keeps the
/// range preview from flickering while the pointer crosses cell gaps.
pub const HOVER_CLEAR_DELAY: Duration = Duration::from_millis(100);

/// Pattern used by segmented fields when none is given
pub const DEFAULT_PATTERN: &str = "MM/DD/YYYY";

/// A known Sunday; weekday label sequences are generated by walking
/// forward from this date
pub(crate) const SUNDAY_ANCHOR: (i32, u32, u32) = (2023, 4, 30);

/// Reference date whose localized rendering is sniffed for the short
/// numeric date pattern (see `LocaleFormat::short_date_pattern`)
pub(crate) const PATTERN_PROBE_DATE: (i32, u32, u32) = (2023, 4, 15);

/// Region subtags whose week starts on Sunday, per the CLDR
/// supplemental week data snapshot. Everything else starts on Monday.
pub(crate) const SUNDAY_FIRST_REGIONS: &[&str] = &[
    "AG", "AS", "BD", "BR", "BS", "BT", "BW", "BZ", "CA", "CO", "DM", "DO", "ET", "GT", "GU",
    "HK", "HN", "ID", "IL", "IN", "JM", "JP", "KE", "KH", "KR", "LA", "MH", "MM", "MO", "MT",
    "MX", "MZ", "NI", "NP", "PA", "PE", "PH", "PK", "PR", "PT", "PY", "SA", "SG", "SV", "TH",
    "TT", "TW", "UM", "US", "VE", "VI", "WS", "YE", "ZA", "ZW",
];
