//! Locale-aware formatting and week-structure queries.
//!
//! Formatting delegates to chrono's localized strftime support; week
//! structure (which day a week starts on) comes from an embedded CLDR
//! week-data snapshot keyed by the tag's region subtag.

use chrono::{Datelike, Locale, NaiveDate};

use crate::consts::{PATTERN_PROBE_DATE, SUNDAY_ANCHOR, SUNDAY_FIRST_REGIONS};
use crate::date_math::{first_of_month, set_day};

/// Error resolving a locale tag to concrete locale data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocaleError {
    /// The tag did not match any known locale.
    #[error("unknown locale tag: {0}")]
    UnknownTag(String),
}

/// First day of the week for a locale. Only these two values occur in
/// the supported week data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FirstDay {
    Monday,
    Sunday,
}

impl FirstDay {
    /// ISO-style numbering: 1 for Monday, 7 for Sunday.
    pub const fn number(self) -> u8 {
        match self {
            Self::Monday => 1,
            Self::Sunday => 7,
        }
    }

    pub const fn starts_sunday(self) -> bool {
        matches!(self, Self::Sunday)
    }
}

/// Week structure for a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WeekInfo {
    pub first_day: FirstDay,
    /// Minimum days of the new year the first week must contain.
    pub minimal_days: u8,
}

impl WeekInfo {
    /// The documented default when no week data is available for a tag:
    /// Sunday-first with a one-day minimum.
    pub const FALLBACK: Self = Self {
        first_day: FirstDay::Sunday,
        minimal_days: 1,
    };
}

/// One weekday column header: localized names plus the weekday's index
/// (0 = Sunday .. 6 = Saturday).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WeekdayLabel {
    pub short: String,
    pub long: String,
    pub day_index: u32,
}

/// Parses a BCP-47 tag ("en-US", "lt-LT") into chrono locale data.
/// Underscore separators are accepted as well.
pub fn parse_tag(tag: &str) -> Result<Locale, LocaleError> {
    let normalized = tag.trim().replace('-', "_");
    Locale::try_from(normalized.as_str()).map_err(|_| LocaleError::UnknownTag(tag.to_owned()))
}

/// Three-tier locale resolution: an explicit tag wins, then a configured
/// application-wide fallback, then the system locale (`LANG`). Tags that
/// fail to resolve fall through to the next tier; the final default is
/// POSIX (English names).
pub fn resolve_locale(explicit: Option<&str>, configured: Option<&str>) -> (String, Locale) {
    let system = system_tag();

    for tag in [explicit, configured, system.as_deref()].into_iter().flatten() {
        match parse_tag(tag) {
            Ok(locale) => return (tag.trim().replace('_', "-"), locale),
            Err(err) => log::debug!("locale tier skipped: {err}"),
        }
    }

    log::debug!("no locale tier resolved, using POSIX");
    (String::new(), Locale::POSIX)
}

/// The system locale tag from `LANG`, stripped of encoding and modifier
/// suffixes ("en_US.UTF-8" -> "en_US").
fn system_tag() -> Option<String> {
    let lang = std::env::var("LANG").ok()?;
    let tag = lang.split(['.', '@']).next().unwrap_or_default();
    (!tag.is_empty() && tag != "C" && tag != "POSIX").then(|| tag.to_owned())
}

/// Locale-bound formatting for calendar headers and labels.
#[derive(Debug, Clone)]
pub struct LocaleFormat {
    tag: String,
    locale: Locale,
}

impl LocaleFormat {
    /// Binds to an explicit tag, falling back through the configured and
    /// system tiers if the tag is unknown.
    pub fn new(tag: &str) -> Self {
        Self::from_config(Some(tag), None)
    }

    /// Binds using the full three-tier lookup.
    pub fn from_config(explicit: Option<&str>, configured: Option<&str>) -> Self {
        let (tag, locale) = resolve_locale(explicit, configured);
        Self { tag, locale }
    }

    /// The tag that actually resolved; empty when the POSIX default was used.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn month_name_long(&self, date: NaiveDate) -> String {
        date.format_localized("%B", self.locale).to_string()
    }

    pub fn month_name_short(&self, date: NaiveDate) -> String {
        date.format_localized("%b", self.locale).to_string()
    }

    /// Month-and-year header label, e.g. "August 2024".
    pub fn month_and_year(&self, date: NaiveDate) -> String {
        date.format_localized("%B %Y", self.locale).to_string()
    }

    pub fn weekday_name_short(&self, date: NaiveDate) -> String {
        date.format_localized("%a", self.locale).to_string()
    }

    pub fn weekday_name_long(&self, date: NaiveDate) -> String {
        date.format_localized("%A", self.locale).to_string()
    }

    /// The seven weekday column headers, ordered from this locale's
    /// first day of the week.
    pub fn weekdays(&self) -> Vec<WeekdayLabel> {
        let (y, m, d) = SUNDAY_ANCHOR;
        let sunday = set_day(first_of_month(y, m), i64::from(d));
        let first_day = i64::from(self.week_info().first_day.number());

        (0..7)
            .map(|i| {
                let date = set_day(sunday, i64::from(d) + i + first_day);
                WeekdayLabel {
                    short: self.weekday_name_short(date),
                    long: self.weekday_name_long(date),
                    day_index: date.weekday().num_days_from_sunday(),
                }
            })
            .collect()
    }

    /// Week structure for the bound tag. Tags without a region subtag, or
    /// with a region absent from the embedded week data, get
    /// [`WeekInfo::FALLBACK`] (Sunday-first) rather than an error.
    pub fn week_info(&self) -> WeekInfo {
        match region_subtag(&self.tag) {
            Some(region) if SUNDAY_FIRST_REGIONS.contains(&region) => WeekInfo {
                first_day: FirstDay::Sunday,
                minimal_days: 1,
            },
            Some(_) => WeekInfo {
                first_day: FirstDay::Monday,
                minimal_days: 4,
            },
            None => WeekInfo::FALLBACK,
        }
    }

    /// First day of the week for the bound tag.
    pub fn first_day_of_week(&self) -> FirstDay {
        self.week_info().first_day
    }

    /// Derives a `YYYY`/`MM`/`DD` template from how this locale renders
    /// 2023-04-15 numerically.
    ///
    /// This is pattern sniffing: it only works for locales whose short
    /// date format uses Latin digits and literally contains "2023", "04"
    /// and "15" as substrings. Locales outside that set mis-derive; the
    /// limitation is inherited by design and not worked around.
    pub fn short_date_pattern(&self) -> String {
        let (y, m, d) = PATTERN_PROBE_DATE;
        let probe = set_day(first_of_month(y, m), i64::from(d));
        let formatted = probe.format_localized("%x", self.locale).to_string();

        formatted
            .replacen("2023", "YYYY", 1)
            .replacen("04", "MM", 1)
            .replacen("15", "DD", 1)
    }
}

/// Extracts the uppercase two-letter region subtag, if any.
fn region_subtag(tag: &str) -> Option<&str> {
    tag.split('-')
        .find(|part| part.len() == 2 && part.chars().all(|c| c.is_ascii_uppercase()))
}
