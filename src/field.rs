//! Segmented date-field editing.
//!
//! A pattern string ("MM/DD/YYYY hh:mm AM") is scanned into fixed-width
//! [`Segment`]s indexing into a shared text buffer. The [`FieldEngine`]
//! owns that buffer plus the active-segment cursor and advances both
//! through discrete keyboard-shaped [`EditOp`]s; the host UI reflects the
//! buffer and selection span back into its input widget. Free-text paste
//! is deliberately unsupported: there is no edit operation for it.
//!
//! Validity is reported as data, never as an error: resolution yields
//! [`FieldValue::Cleared`] for an untouched placeholder buffer,
//! [`FieldValue::Invalid`] for a partially filled one, and a composed
//! date-time otherwise.

use chrono::{Datelike, NaiveDateTime, NaiveTime, Timelike};

use crate::consts::{DEFAULT_PATTERN, MAX_MONTH, MAX_YEAR};
use crate::date_math::{Clock, SystemClock, days_in_month, from_parts};
use crate::prelude::*;

/// The date/time component a segment edits, named by its pattern token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, serde::Serialize, serde::Deserialize)]
pub enum SegmentKey {
    /// `MM`, 1-12
    #[display(fmt = "MM")]
    Month,
    /// `DD`, 1-31, capped by the resolved year/month when both are known
    #[display(fmt = "DD")]
    Day,
    /// `YYYY`, 0-9999
    #[display(fmt = "YYYY")]
    Year,
    /// `HH`, 0-23
    #[display(fmt = "HH")]
    Hour24,
    /// `hh`, 1-12
    #[display(fmt = "hh")]
    Hour12,
    /// `mm`, 0-59
    #[display(fmt = "mm")]
    Minute,
    /// `ss`, 0-59
    #[display(fmt = "ss")]
    Second,
    /// `SSS`, 0-999
    #[display(fmt = "SSS")]
    Millisecond,
    /// `AM`: cycles AM/PM, no numeric value
    #[display(fmt = "AM")]
    AmPm,
}

impl SegmentKey {
    /// Scan order for pattern parsing; longer tokens first.
    pub const ALL: [Self; 9] = [
        Self::Year,
        Self::Millisecond,
        Self::Month,
        Self::Day,
        Self::Hour24,
        Self::Hour12,
        Self::Minute,
        Self::Second,
        Self::AmPm,
    ];

    /// The literal pattern token, doubling as the segment's blank
    /// placeholder text.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Month => "MM",
            Self::Day => "DD",
            Self::Year => "YYYY",
            Self::Hour24 => "HH",
            Self::Hour12 => "hh",
            Self::Minute => "mm",
            Self::Second => "ss",
            Self::Millisecond => "SSS",
            Self::AmPm => "AM",
        }
    }

    pub const fn min_value(self) -> u32 {
        match self {
            Self::Month | Self::Day | Self::Hour12 => 1,
            _ => 0,
        }
    }

    /// Static upper bound. The day segment's effective bound may be
    /// tighter; see `FieldEngine::effective_max`.
    pub const fn max_value(self) -> u32 {
        match self {
            Self::Month => MAX_MONTH,
            Self::Hour12 => 12,
            Self::Day => 31,
            Self::Year => MAX_YEAR,
            Self::Hour24 => 23,
            Self::Minute | Self::Second => 59,
            Self::Millisecond => 999,
            Self::AmPm => 0,
        }
    }

    /// Value a blank segment jumps to on increment/decrement instead of
    /// wrapping. Only the year defines one: the current year.
    pub fn initial_value(self, clock: &impl Clock) -> Option<u32> {
        match self {
            Self::Year => Some(clock.now().year().unsigned_abs()),
            _ => None,
        }
    }
}

/// One fixed-width sub-span of the pattern/buffer, bound to a component.
/// Segments index into the shared string; they do not own text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    pub key: SegmentKey,
    /// Byte offset of the segment's first character.
    pub start: usize,
    /// Byte offset one past the segment's last character.
    pub end: usize,
}

impl Segment {
    pub const fn width(&self) -> usize {
        self.end - self.start
    }
}

/// Scans `pattern` for segment tokens, left to right. Unrecognized
/// characters are fixed literals. A pattern without any token yields an
/// empty list, and the engine degrades to a no-op over the literal text.
pub fn parse_pattern(pattern: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut i = 0;

    while i < pattern.len() {
        match SegmentKey::ALL
            .into_iter()
            .find(|key| pattern[i..].starts_with(key.token()))
        {
            Some(key) => {
                let end = i + key.token().len();
                segments.push(Segment { key, start: i, end });
                i = end;
            }
            None => {
                i += pattern[i..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }

    segments
}

/// Renders `value` into `pattern`, zero-padding every numeric component
/// to its token's width. The result has the same length and layout as
/// the pattern, so segment offsets stay valid.
pub fn render(value: NaiveDateTime, pattern: &str) -> String {
    let mut out = pattern.to_owned();
    // Equal widths keep later offsets stable while replacing in order
    for segment in parse_pattern(pattern) {
        out.replace_range(segment.start..segment.end, &component_text(segment.key, value));
    }
    out
}

fn component_text(key: SegmentKey, value: NaiveDateTime) -> String {
    match key {
        SegmentKey::Month => format!("{:02}", value.month()),
        SegmentKey::Day => format!("{:02}", value.day()),
        SegmentKey::Year => format!("{:04}", value.year()),
        SegmentKey::Hour24 => format!("{:02}", value.hour()),
        SegmentKey::Hour12 => format!("{:02}", normalize_12h(value.hour())),
        SegmentKey::Minute => format!("{:02}", value.minute()),
        SegmentKey::Second => format!("{:02}", value.second()),
        SegmentKey::Millisecond => format!("{:03}", millis_of(value)),
        SegmentKey::AmPm => String::from(if value.hour() < 12 { "AM" } else { "PM" }),
    }
}

/// Maps a 24-hour value onto the 12-hour dial: 0 and 12 both read "12".
const fn normalize_12h(hour: u32) -> u32 {
    if hour == 0 || hour == 12 { 12 } else { hour % 12 }
}

fn millis_of(value: NaiveDateTime) -> u32 {
    // Leap-second nanos exceed the millisecond field; clamp them away
    (value.nanosecond() / 1_000_000).min(999)
}

/// One discrete keyboard-driven edit, applied to the active segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    /// A typed digit, 0-9.
    Digit(u8),
    /// Arrow up: wrap-increment, or toggle AM/PM.
    Increment,
    /// Arrow down: wrap-decrement, or toggle AM/PM.
    Decrement,
    /// Page down: jump to the minimum (year: current year), then advance.
    JumpMin,
    /// Page up: jump to the maximum (year: current year), then advance.
    JumpMax,
    /// Home.
    FirstSegment,
    /// End.
    LastSegment,
    /// Arrow left, wrapping.
    PrevSegment,
    /// Arrow right, wrapping.
    NextSegment,
    /// Blank the segment; cascades to the previous one if already blank.
    Backspace,
    /// Blank the segment; cascades to the next one if already blank.
    Delete,
    /// The `a` key on the AM/PM segment.
    SetAm,
    /// The `p` key on the AM/PM segment.
    SetPm,
}

/// Resolution result of a field buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FieldValue {
    /// The buffer equals the raw pattern: intentionally empty.
    Cleared,
    /// Some, but not all, segments are filled in.
    Invalid,
    /// Every segment resolved; the composed date-time.
    Valid(NaiveDateTime),
}

/// The segmented-field editing state machine: a text buffer, its
/// segments, and the active-segment cursor.
#[derive(Debug, Clone)]
pub struct FieldEngine<C = SystemClock> {
    pattern: String,
    segments: Vec<Segment>,
    buffer: String,
    active: usize,
    clock: C,
}

impl FieldEngine<SystemClock> {
    pub fn new(pattern: &str) -> Self {
        Self::with_clock(pattern, SystemClock)
    }

    /// An engine over the default `MM/DD/YYYY` pattern.
    pub fn default_pattern() -> Self {
        Self::new(DEFAULT_PATTERN)
    }
}

impl<C: Clock> FieldEngine<C> {
    /// Builds an engine with an injected clock; the buffer starts as the
    /// raw pattern (all placeholders).
    pub fn with_clock(pattern: &str, clock: C) -> Self {
        Self {
            pattern: pattern.to_owned(),
            segments: parse_pattern(pattern),
            buffer: pattern.to_owned(),
            active: 0,
            clock,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn active_segment(&self) -> Option<&Segment> {
        self.segments.get(self.active)
    }

    pub fn active_key(&self) -> Option<SegmentKey> {
        self.active_segment().map(|s| s.key)
    }

    /// Byte span the host input should show as selected.
    pub fn selection_span(&self) -> Option<(usize, usize)> {
        self.active_segment().map(|s| (s.start, s.end))
    }

    /// Whether the buffer still equals the untouched pattern.
    pub fn is_placeholder(&self) -> bool {
        self.buffer == self.pattern
    }

    /// Focus entry: selection jumps to the first segment.
    pub fn focus(&mut self) {
        self.active = 0;
    }

    /// Moves the active segment to the one covering byte `offset`,
    /// e.g. after a mouse click inside the host input.
    pub fn select_at(&mut self, offset: usize) {
        let index = self
            .segments
            .iter()
            .rposition(|s| s.start <= offset)
            .unwrap_or(0);
        self.active = index;
    }

    /// Resets the buffer to the raw pattern.
    pub fn clear(&mut self) {
        self.buffer = self.pattern.clone();
    }

    /// Rebinds the engine to `value`, re-rendering the buffer. The active
    /// segment survives the rewrite, re-resolved by key. A `None` value
    /// leaves the buffer as typed.
    pub fn set_value(&mut self, value: Option<NaiveDateTime>) {
        let Some(value) = value else {
            if self.buffer.is_empty() {
                self.buffer = self.pattern.clone();
            }
            return;
        };

        let rendered = render(value, &self.pattern);
        if rendered != self.buffer {
            let key = self.active_key();
            self.buffer = rendered;
            if let Some(key) = key {
                if let Some(index) = self.segments.iter().position(|s| s.key == key) {
                    self.active = index;
                }
            }
        }
    }

    /// Applies one edit operation. With no segments in the pattern every
    /// operation is a no-op.
    pub fn apply(&mut self, op: EditOp) {
        if self.segments.is_empty() {
            return;
        }

        match op {
            EditOp::Digit(digit) => self.digit(digit),
            EditOp::Increment => self.step(true),
            EditOp::Decrement => self.step(false),
            EditOp::JumpMin => self.jump(false),
            EditOp::JumpMax => self.jump(true),
            EditOp::FirstSegment => self.active = 0,
            EditOp::LastSegment => self.active = self.segments.len() - 1,
            EditOp::PrevSegment => {
                self.active = (self.active + self.segments.len() - 1) % self.segments.len();
            }
            EditOp::NextSegment => self.active = (self.active + 1) % self.segments.len(),
            EditOp::Backspace => self.delete_toward(true),
            EditOp::Delete => self.delete_toward(false),
            EditOp::SetAm => self.set_am_pm("AM"),
            EditOp::SetPm => self.set_am_pm("PM"),
        }
    }

    /// Resolves the buffer into a value. Fields absent from the pattern
    /// are taken from `bound` (the previously committed value), or from
    /// the start of today when there is none.
    pub fn resolve(&self, bound: Option<NaiveDateTime>) -> FieldValue {
        if self.is_placeholder() {
            return FieldValue::Cleared;
        }

        let all_numeric = self
            .segments
            .iter()
            .enumerate()
            .all(|(i, s)| s.key == SegmentKey::AmPm || is_numeric(self.segment_text(i)));
        if !all_numeric {
            return FieldValue::Invalid;
        }

        let base = bound.unwrap_or_else(|| self.clock.today().and_time(NaiveTime::MIN));
        let field = |key: SegmentKey| self.value_by_key(key).unwrap_or_else(|| base_field(key, base));

        let hour = match self.index_of(SegmentKey::AmPm) {
            Some(am_index) => {
                let hour12 = field(SegmentKey::Hour12);
                let is_am = self.segment_text(am_index) != "PM";
                if is_am && hour12 == 12 {
                    // 12:00 AM is 00:00
                    0
                } else if !is_am && hour12 < 12 {
                    hour12 + 12
                } else {
                    hour12
                }
            }
            None => field(SegmentKey::Hour24),
        };

        let date = from_parts(
            field(SegmentKey::Year) as i32,
            i64::from(field(SegmentKey::Month)) - 1,
            i64::from(field(SegmentKey::Day)),
        );
        let time = NaiveTime::from_hms_milli_opt(
            hour,
            field(SegmentKey::Minute),
            field(SegmentKey::Second),
            field(SegmentKey::Millisecond),
        )
        .expect("segment bounds keep time components in range");

        FieldValue::Valid(NaiveDateTime::new(date, time))
    }

    // --- segment text plumbing ---

    fn segment_text(&self, index: usize) -> &str {
        let s = &self.segments[index];
        &self.buffer[s.start..s.end]
    }

    fn segment_value(&self, index: usize) -> Option<u32> {
        let text = self.segment_text(index);
        is_numeric(text).then(|| text.parse().unwrap_or(0))
    }

    fn value_by_key(&self, key: SegmentKey) -> Option<u32> {
        self.index_of(key).and_then(|i| self.segment_value(i))
    }

    fn index_of(&self, key: SegmentKey) -> Option<usize> {
        self.segments.iter().position(|s| s.key == key)
    }

    fn is_blank(&self, index: usize) -> bool {
        self.segment_text(index) == self.segments[index].key.token()
    }

    fn write_text(&mut self, index: usize, text: &str) {
        let s = self.segments[index];
        debug_assert_eq!(text.len(), s.width());
        self.buffer.replace_range(s.start..s.end, text);
    }

    fn write_value(&mut self, index: usize, value: u32) {
        let width = self.segments[index].width();
        self.write_text(index, &format!("{value:0width$}"));
    }

    fn blank(&mut self, index: usize) {
        let token = self.segments[index].key.token();
        self.write_text(index, token);
    }

    /// The active-segment bound actually in force: the day segment
    /// tightens to the real day count once year and month are known.
    fn effective_max(&self, key: SegmentKey) -> u32 {
        if key == SegmentKey::Day {
            if let (Some(year), Some(month)) = (
                self.value_by_key(SegmentKey::Year),
                self.value_by_key(SegmentKey::Month),
            ) {
                if (1..=12).contains(&month) {
                    return days_in_month(year as i32, month);
                }
            }
        }
        key.max_value()
    }

    // --- edit operations ---

    fn digit(&mut self, digit: u8) {
        debug_assert!(digit <= 9);
        let key = self.segments[self.active].key;
        if key == SegmentKey::AmPm {
            return;
        }

        let current = self.segment_text(self.active);
        // Digits enter left to right; a fully numeric segment starts over
        let next = match current.find(|c: char| !c.is_ascii_digit()) {
            None => format!("{digit}{}", &key.token()[1..]),
            Some(pos) => {
                let mut text = current.to_owned();
                text.replace_range(pos..=pos, &digit.to_string());
                text
            }
        };

        // Values past the bound are rejected at the keystroke
        if let Some(value) = is_numeric(&next).then(|| next.parse::<u32>().unwrap_or(0)) {
            if value > self.effective_max(key) {
                return;
            }
        }

        let complete = is_numeric(&next);
        self.write_text(self.active, &next);

        if complete && self.active + 1 < self.segments.len() {
            self.active += 1;
        }
    }

    fn step(&mut self, up: bool) {
        let key = self.segments[self.active].key;
        if key == SegmentKey::AmPm {
            self.toggle_am_pm();
            return;
        }

        let min = key.min_value();
        let n = self.segment_value(self.active).unwrap_or(if up { 0 } else { min });

        // A blank (or zero) year jumps to the current year instead of wrapping
        if n == 0 {
            if let Some(initial) = key.initial_value(&self.clock) {
                self.write_value(self.active, initial);
                return;
            }
        }

        let max = self.effective_max(key);
        let next = if up {
            if n >= max { min } else { n + 1 }
        } else if n <= min {
            max
        } else {
            n - 1
        };

        self.write_value(self.active, next);
    }

    fn jump(&mut self, to_max: bool) {
        let key = self.segments[self.active].key;
        match key {
            SegmentKey::AmPm => {
                self.write_text(self.active, if to_max { "PM" } else { "AM" });
                return;
            }
            SegmentKey::Year => {
                // The year's "bound" jump goes to the current year both ways
                let year = self.clock.now().year().unsigned_abs();
                self.write_value(self.active, year);
            }
            _ => {
                let value = if to_max { self.effective_max(key) } else { key.min_value() };
                self.write_value(self.active, value);
            }
        }
        self.active = (self.active + 1) % self.segments.len();
    }

    fn toggle_am_pm(&mut self) {
        let next = if self.segment_text(self.active) == "AM" { "PM" } else { "AM" };
        self.write_text(self.active, next);
    }

    fn set_am_pm(&mut self, text: &str) {
        if self.segments[self.active].key == SegmentKey::AmPm {
            self.write_text(self.active, text);
        }
    }

    fn delete_toward(&mut self, backward: bool) {
        let index = self.active;
        if self.is_blank(index) {
            let adjacent = if backward {
                index.checked_sub(1)
            } else {
                (index + 1 < self.segments.len()).then_some(index + 1)
            };
            if let Some(adjacent) = adjacent {
                self.blank(adjacent);
                self.active = adjacent;
            }
        }
        self.blank(index);
    }
}

fn is_numeric(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

fn base_field(key: SegmentKey, base: NaiveDateTime) -> u32 {
    match key {
        SegmentKey::Month => base.month(),
        SegmentKey::Day => base.day(),
        SegmentKey::Year => base.year().unsigned_abs(),
        SegmentKey::Hour24 => base.hour(),
        SegmentKey::Hour12 => normalize_12h(base.hour()),
        SegmentKey::Minute => base.minute(),
        SegmentKey::Second => base.second(),
        SegmentKey::Millisecond => millis_of(base),
        SegmentKey::AmPm => 0,
    }
}
