//! Canonical date labels for scraped event dates.
//!
//! # Responsibility
//! - Resolve heterogeneous date strings into one calendar date when possible.
//! - Render short (`Feb 21, 2026`) and long (`Saturday, February 21, 2026`)
//!   labels for cards and detail pages.
//!
//! # Invariants
//! - Resolution is UTC-based; the calendar day never depends on the local
//!   timezone of the running machine.
//! - Interpretation never fails. Unreadable input is passed through unchanged.
//! - Impossible calendar days (`2026-02-30`, `31 Feb 2026`) are never rolled
//!   over into the next month; they fall through and end up as raw text.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};

/// Label shown when an event has no date at all.
pub const DATE_TBA: &str = "Date TBA";

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const NAIVE_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
const OFFSET_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid iso date regex"));
static ISO_TIMESTAMP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}T").expect("valid iso timestamp regex"));
static DAY_MONTH_YEAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d{1,2})\s+(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\s+(\d{4})")
        .expect("valid day-month-year regex")
});
static MONTH_DAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(January|February|March|April|May|June|July|August|September|October|November|December)\s+(\d{1,2})\b",
    )
    .expect("valid month-day regex")
});
static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}").expect("valid year regex"));

/// Display-ready interpretation of a raw event date field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateLabel {
    /// No date was provided.
    Tba,
    /// The input resolved to a UTC calendar date.
    Calendar(NaiveDate),
    /// The input could not be read; carried through verbatim.
    Raw(String),
}

impl DateLabel {
    /// Short card label, e.g. `Feb 21, 2026`.
    pub fn short(&self) -> String {
        match self {
            Self::Tba => DATE_TBA.to_string(),
            Self::Calendar(date) => date.format("%b %d, %Y").to_string(),
            Self::Raw(raw) => raw.clone(),
        }
    }

    /// Detail-page label, e.g. `Saturday, February 21, 2026`.
    ///
    /// Labels without a calendar date render exactly like [`DateLabel::short`].
    pub fn long(&self) -> String {
        match self {
            Self::Calendar(date) => date.format("%A, %B %-d, %Y").to_string(),
            other => other.short(),
        }
    }

    /// Returns the resolved calendar date, if any.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Calendar(date) => Some(*date),
            _ => None,
        }
    }

    /// Returns whether the event falls on `today` or later.
    ///
    /// Unresolved labels count as upcoming so that events with unreadable
    /// dates are kept rather than hidden.
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.calendar_date().map_or(true, |date| date >= today)
    }
}

impl Display for DateLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.short())
    }
}

/// Interprets a raw date field using the current UTC year for year-less
/// `Month D` fragments.
pub fn interpret_date(raw: Option<&str>) -> DateLabel {
    interpret_date_with_year(raw, Utc::now().year())
}

/// Interprets a raw date field.
///
/// Resolution order, first match wins:
/// 1. empty or absent -> [`DateLabel::Tba`]
/// 2. strict `YYYY-MM-DD`
/// 3. `YYYY-MM-DDThh:mm...` timestamps (offsets converted to UTC, naive
///    timestamps read as UTC)
/// 4. `D Mon YYYY` anywhere in the text
/// 5. `Month D` anywhere in the text; year from the first 4-digit run, else
///    `fallback_year`
/// 6. anything else -> [`DateLabel::Raw`]
///
/// A step whose pattern matches but names an impossible calendar day falls
/// through to the next step.
pub fn interpret_date_with_year(raw: Option<&str>, fallback_year: i32) -> DateLabel {
    let Some(raw) = raw else {
        return DateLabel::Tba;
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return DateLabel::Tba;
    }

    let resolved = parse_iso_date(trimmed)
        .or_else(|| parse_iso_timestamp(trimmed))
        .or_else(|| parse_day_month_year(trimmed))
        .or_else(|| parse_month_day(trimmed, fallback_year));

    match resolved {
        Some(date) => DateLabel::Calendar(date),
        None => DateLabel::Raw(raw.to_string()),
    }
}

fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    if !ISO_DATE_RE.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn parse_iso_timestamp(value: &str) -> Option<NaiveDate> {
    if !ISO_TIMESTAMP_RE.is_match(value) {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc).date_naive());
    }
    for format in OFFSET_TIMESTAMP_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(value, format) {
            return Some(parsed.with_timezone(&Utc).date_naive());
        }
    }
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|parsed| parsed.date())
}

fn parse_day_month_year(value: &str) -> Option<NaiveDate> {
    let caps = DAY_MONTH_YEAR_RE.captures(value)?;
    let day: u32 = caps.get(1)?.as_str().parse().ok()?;
    let month = month_number(&MONTH_ABBREVIATIONS, caps.get(2)?.as_str())?;
    let year: i32 = caps.get(3)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_month_day(value: &str, fallback_year: i32) -> Option<NaiveDate> {
    let caps = MONTH_DAY_RE.captures(value)?;
    let month = month_number(&MONTH_NAMES, caps.get(1)?.as_str())?;
    let day: u32 = caps.get(2)?.as_str().parse().ok()?;
    let year = YEAR_RE
        .find(value)
        .and_then(|m| m.as_str().parse::<i32>().ok())
        .unwrap_or(fallback_year);
    NaiveDate::from_ymd_opt(year, month, day)
}

fn month_number(table: &[&str; 12], name: &str) -> Option<u32> {
    let lowered = name.to_ascii_lowercase();
    table
        .iter()
        .position(|candidate| *candidate == lowered)
        .and_then(|index| u32::try_from(index + 1).ok())
}

#[cfg(test)]
mod tests {
    use super::{interpret_date, interpret_date_with_year, DateLabel};
    use chrono::NaiveDate;

    fn short(raw: &str) -> String {
        interpret_date_with_year(Some(raw), 2026).short()
    }

    #[test]
    fn empty_input_is_tba() {
        assert_eq!(interpret_date(None).short(), "Date TBA");
        assert_eq!(interpret_date(Some("")).short(), "Date TBA");
        assert_eq!(interpret_date(Some("   ")), DateLabel::Tba);
    }

    #[test]
    fn strict_iso_date_formats_with_padded_day() {
        assert_eq!(short("2026-02-21"), "Feb 21, 2026");
        assert_eq!(short("2026-03-05"), "Mar 05, 2026");
    }

    #[test]
    fn timestamp_with_offset_is_read_in_utc() {
        assert_eq!(short("2026-02-21T10:00:00Z"), "Feb 21, 2026");
        assert_eq!(short("2026-02-21T23:30:00-05:00"), "Feb 22, 2026");
        assert_eq!(short("2026-02-21T01:00:00+05:30"), "Feb 20, 2026");
    }

    #[test]
    fn naive_timestamp_keeps_its_calendar_day() {
        assert_eq!(short("2026-02-21T18:30"), "Feb 21, 2026");
        assert_eq!(short("2026-02-21T18:30:15.250"), "Feb 21, 2026");
    }

    #[test]
    fn day_month_year_fragment_is_found_anywhere() {
        assert_eq!(short("Sat, 21 feb 2026 - Sun, 22 Feb 2026"), "Feb 21, 2026");
        assert_eq!(short("Starts 7 OCT 2025 at the venue"), "Oct 07, 2025");
    }

    #[test]
    fn month_day_fragment_takes_year_from_text_or_fallback() {
        assert_eq!(short("February 21 - 23, 2027"), "Feb 21, 2027");
        assert_eq!(
            interpret_date_with_year(Some("Every march 3 at noon"), 2031).short(),
            "Mar 03, 2031"
        );
    }

    #[test]
    fn unrecognized_input_passes_through_unchanged() {
        assert_eq!(short("whenever"), "whenever");
        assert_eq!(
            interpret_date(Some("  every weekend ")),
            DateLabel::Raw("  every weekend ".to_string())
        );
    }

    #[test]
    fn impossible_calendar_day_falls_through() {
        assert_eq!(short("2026-02-30"), "2026-02-30");
        assert_eq!(short("31 Feb 2026"), "31 Feb 2026");
    }

    #[test]
    fn long_label_spells_weekday_and_month() {
        let label = interpret_date(Some("2026-02-21"));
        assert_eq!(label.long(), "Saturday, February 21, 2026");
        assert_eq!(DateLabel::Tba.long(), "Date TBA");
    }

    #[test]
    fn upcoming_check_keeps_unreadable_dates() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 21).unwrap();
        assert!(interpret_date(Some("2026-02-21")).is_upcoming(today));
        assert!(!interpret_date(Some("2026-02-20")).is_upcoming(today));
        assert!(interpret_date(Some("whenever")).is_upcoming(today));
        assert!(DateLabel::Tba.is_upcoming(today));
    }
}
