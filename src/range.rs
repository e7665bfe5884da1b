//! Date-range evaluation and the range-selection interaction protocol.
//!
//! A [`DateRange`] stores its endpoints exactly as the user produced them;
//! chronological ordering is resolved at evaluation time only. Membership
//! and corner-rounding answers are plain data for a renderer to consume.

use std::time::Instant;

use chrono::NaiveDate;

use crate::consts::HOVER_CLEAR_DELAY;
use crate::date_math::is_same_day;

/// A pair of optional endpoints. No ordering invariant is enforced at
/// construction; evaluation normalizes on the fly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub const fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub const fn empty() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// Both endpoints, storage order.
    pub const fn endpoints(&self) -> [Option<NaiveDate>; 2] {
        [self.start, self.end]
    }

    pub const fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}

/// Per-day answer for range highlighting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RangeMembership {
    /// The day lies between the endpoints, endpoints included.
    pub in_range: bool,
    /// The day is the chronologically first endpoint: round the leading
    /// corners of the highlight span.
    pub round_leading: bool,
    /// The day is the chronologically last endpoint: round the trailing
    /// corners.
    pub round_trailing: bool,
}

/// Evaluates `day` against a range whose missing end may be stood in for
/// by a transient `hover` date. With either effective endpoint absent no
/// day is in range.
pub fn membership(range: &DateRange, day: NaiveDate, hover: Option<NaiveDate>) -> RangeMembership {
    let end = range.end.or(hover);
    let (Some(start), Some(end)) = (range.start, end) else {
        return RangeMembership::default();
    };

    // Compare in chronological order regardless of storage order
    let (start, end) = if start <= end { (start, end) } else { (end, start) };

    let in_range = (day > start && day < end) || is_same_day(day, start) || is_same_day(day, end);

    // A single-day range rounds all corners: both flags hold
    RangeMembership {
        in_range,
        round_leading: is_same_day(day, start),
        round_trailing: is_same_day(day, end),
    }
}

/// Display options for day highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HighlightOptions {
    /// Whether today's date receives its own highlight.
    pub highlight_today: bool,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            highlight_today: true,
        }
    }
}

/// Combined per-day highlight state: range membership plus the
/// today-marker, with their corner-rounding precedence resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DayHighlight {
    pub membership: RangeMembership,
    pub is_today: bool,
    /// Today's own full-corner rounding. Suppressed while the day sits
    /// inside a range, where the range-edge rounding takes priority.
    pub round_today: bool,
}

/// Evaluates the complete highlight state of one day.
pub fn day_highlight(
    range: &DateRange,
    day: NaiveDate,
    hover: Option<NaiveDate>,
    today: NaiveDate,
    options: HighlightOptions,
) -> DayHighlight {
    let membership = membership(range, day, hover);
    let is_today = options.highlight_today && is_same_day(day, today);

    DayHighlight {
        membership,
        is_today,
        round_today: is_today && !membership.in_range,
    }
}

/// Click-driven state machine over a [`DateRange`].
///
/// A click either starts a fresh selection or completes a pending one,
/// auto-ordering the endpoints chronologically on completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeSelection {
    range: DateRange,
}

impl RangeSelection {
    pub const fn new(range: DateRange) -> Self {
        Self { range }
    }

    pub const fn range(&self) -> DateRange {
        self.range
    }

    /// Replaces the selection wholesale, e.g. when a bound value changes.
    pub fn set_range(&mut self, range: DateRange) {
        self.range = range;
    }

    /// Applies one day click and returns the resulting range.
    pub fn click(&mut self, date: NaiveDate) -> DateRange {
        self.range = match (self.range.start, self.range.end) {
            // Nothing pending, or a finished pair: start over
            (None, None) | (Some(_), Some(_)) => DateRange::new(Some(date), None),
            (Some(start), None) => ordered(date, start),
            // An end without a start only arises from caller-seeded state;
            // complete it symmetrically
            (None, Some(end)) => ordered(date, end),
        };

        log::trace!("range selection now {:?}", self.range);
        self.range
    }
}

fn ordered(a: NaiveDate, b: NaiveDate) -> DateRange {
    if a < b {
        DateRange::new(Some(a), Some(b))
    } else {
        DateRange::new(Some(b), Some(a))
    }
}

/// Debounced hover tracking for live range previews.
///
/// Leaving a cell does not clear the hover date immediately; it arms a
/// short deadline instead, so crossing the gap between adjacent cells
/// never flickers. Re-entering any cell cancels the pending clear. The
/// caller drives time explicitly through `Instant` arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverState {
    date: Option<NaiveDate>,
    clear_at: Option<Instant>,
}

impl HoverState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer entered the cell for `date`.
    pub fn enter(&mut self, date: NaiveDate) {
        self.date = Some(date);
        self.clear_at = None;
    }

    /// Pointer left the hovered cell; arms the debounce deadline.
    pub fn leave(&mut self, now: Instant) {
        if self.date.is_some() {
            self.clear_at = Some(now + HOVER_CLEAR_DELAY);
        }
    }

    /// The hover date effective at `now`, clearing it if the debounce
    /// deadline has passed.
    pub fn current(&mut self, now: Instant) -> Option<NaiveDate> {
        if self.clear_at.is_some_and(|deadline| now >= deadline) {
            self.date = None;
            self.clear_at = None;
        }
        self.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn jan(day: u32) -> NaiveDate {
        d(2024, 1, day)
    }

    #[test]
    fn test_membership_inside_and_out() {
        let range = DateRange::new(Some(jan(5)), Some(jan(10)));

        let mid = membership(&range, jan(7), None);
        assert!(mid.in_range);
        assert!(!mid.round_leading);
        assert!(!mid.round_trailing);

        assert!(!membership(&range, jan(4), None).in_range);
        assert!(!membership(&range, jan(11), None).in_range);
    }

    #[test]
    fn test_membership_edges_round_their_corners() {
        let range = DateRange::new(Some(jan(5)), Some(jan(10)));

        let leading = membership(&range, jan(5), None);
        assert!(leading.in_range && leading.round_leading && !leading.round_trailing);

        let trailing = membership(&range, jan(10), None);
        assert!(trailing.in_range && trailing.round_trailing && !trailing.round_leading);
    }

    #[test]
    fn test_membership_is_storage_order_independent() {
        let forward = DateRange::new(Some(jan(5)), Some(jan(10)));
        let reversed = DateRange::new(Some(jan(10)), Some(jan(5)));

        for day in 1..=15 {
            assert_eq!(
                membership(&forward, jan(day), None),
                membership(&reversed, jan(day), None),
                "day {day}"
            );
        }
    }

    #[test]
    fn test_membership_single_day_rounds_all_corners() {
        let range = DateRange::new(Some(jan(5)), Some(jan(5)));
        let m = membership(&range, jan(5), None);
        assert!(m.in_range && m.round_leading && m.round_trailing);
    }

    #[test]
    fn test_membership_requires_both_endpoints() {
        let open = DateRange::new(Some(jan(5)), None);
        assert_eq!(membership(&open, jan(5), None), RangeMembership::default());
        assert_eq!(
            membership(&DateRange::empty(), jan(5), None),
            RangeMembership::default()
        );
    }

    #[test]
    fn test_hover_stands_in_for_missing_end() {
        let open = DateRange::new(Some(jan(5)), None);
        let m = membership(&open, jan(7), Some(jan(10)));
        assert!(m.in_range);

        // Hover is irrelevant once the range is complete
        let done = DateRange::new(Some(jan(5)), Some(jan(6)));
        assert!(!membership(&done, jan(7), Some(jan(10))).in_range);
    }

    #[test]
    fn test_today_rounding_yields_to_range_edges() {
        let range = DateRange::new(Some(jan(5)), Some(jan(10)));
        let options = HighlightOptions::default();

        // Today inside a multi-day range: range owns the corners
        let inside = day_highlight(&range, jan(7), None, jan(7), options);
        assert!(inside.is_today && !inside.round_today);

        // Today outside the range keeps its own rounding
        let outside = day_highlight(&range, jan(20), None, jan(20), options);
        assert!(outside.is_today && outside.round_today);

        // Suppression flag wins over everything
        let muted = day_highlight(
            &range,
            jan(20),
            None,
            jan(20),
            HighlightOptions {
                highlight_today: false,
            },
        );
        assert!(!muted.is_today && !muted.round_today);
    }

    #[test]
    fn test_click_protocol_transitions() {
        let mut selection = RangeSelection::default();

        // First click opens a selection
        assert_eq!(selection.click(jan(10)), DateRange::new(Some(jan(10)), None));

        // Second click completes it, auto-ordered
        assert_eq!(
            selection.click(jan(5)),
            DateRange::new(Some(jan(5)), Some(jan(10)))
        );

        // Clicking a finished pair starts over
        assert_eq!(selection.click(jan(20)), DateRange::new(Some(jan(20)), None));
        assert_eq!(
            selection.click(jan(25)),
            DateRange::new(Some(jan(20)), Some(jan(25)))
        );
    }

    #[test]
    fn test_click_protocol_defensive_end_only_state() {
        let mut selection = RangeSelection::new(DateRange::new(None, Some(jan(10))));
        assert_eq!(
            selection.click(jan(15)),
            DateRange::new(Some(jan(10)), Some(jan(15)))
        );
    }

    #[test]
    fn test_hover_debounce_clears_after_deadline() {
        let mut hover = HoverState::new();
        let t0 = Instant::now();

        hover.enter(jan(8));
        assert_eq!(hover.current(t0), Some(jan(8)));

        hover.leave(t0);
        // Still present just before the deadline
        assert_eq!(hover.current(t0 + Duration::from_millis(99)), Some(jan(8)));
        // Gone once it passes
        assert_eq!(hover.current(t0 + Duration::from_millis(100)), None);
    }

    #[test]
    fn test_hover_reenter_cancels_pending_clear() {
        let mut hover = HoverState::new();
        let t0 = Instant::now();

        hover.enter(jan(8));
        hover.leave(t0);
        hover.enter(jan(9));

        // Long after the old deadline the new hover still stands
        assert_eq!(hover.current(t0 + Duration::from_secs(5)), Some(jan(9)));
    }
}
