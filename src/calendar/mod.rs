pub mod grid;

use chrono::{DateTime, Datelike, Months, NaiveDate, TimeZone, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

// ─── CalendarDate ─────────────────────────────────────────────────────────────

/// A calendar day with no time component. Equality and ordering are on
/// (year, month, day).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn from_naive(date: NaiveDate) -> Self { Self(date) }

    pub fn from_utc(dt: DateTime<Utc>) -> Self { Self(dt.date_naive()) }

    /// Normalizes to UTC first, so 2024-03-10T01:00+02:00 is 2024-03-09.
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Self(dt.with_timezone(&Utc).date_naive())
    }

    pub fn today() -> Self { Self::from_utc(Utc::now()) }

    pub fn year(&self)    -> i32     { self.0.year() }
    pub fn month(&self)   -> u32     { self.0.month() }
    pub fn day(&self)     -> u32     { self.0.day() }
    pub fn weekday(&self) -> Weekday { self.0.weekday() }
    pub fn naive(&self)   -> NaiveDate { self.0 }

    pub fn year_month(&self) -> YearMonth { YearMonth::of(*self) }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self { Self(date) }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for CalendarDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| Error::InvalidDate(s.to_owned()))
    }
}

// ─── YearMonth ────────────────────────────────────────────────────────────────

/// A (year, month) pair, stored as the first day of that month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    pub fn of(date: CalendarDate) -> Self {
        // Day 1 of any representable date's month is always representable.
        Self(date.0 - chrono::Days::new(u64::from(date.0.day0())))
    }

    pub fn year(&self)  -> i32 { self.0.year() }
    pub fn month(&self) -> u32 { self.0.month() }

    pub fn first_day(&self) -> CalendarDate { CalendarDate(self.0) }

    pub fn days_in_month(&self) -> u32 { days_in_month(self.year(), self.month()) }

    /// The following month, `None` past the end of the representable range.
    pub fn succ(&self) -> Option<Self> {
        self.0.checked_add_months(Months::new(1)).map(Self)
    }

    /// The preceding month, `None` before the start of the representable range.
    pub fn pred(&self) -> Option<Self> {
        self.0.checked_sub_months(Months::new(1)).map(Self)
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    pub fn day(&self, day: u32) -> Option<CalendarDate> {
        self.0.with_day(day).map(CalendarDate)
    }

    /// Every day of the month in ascending order.
    pub fn days(&self) -> impl Iterator<Item = CalendarDate> {
        self.0.iter_days().take(self.days_in_month() as usize).map(CalendarDate)
    }

    /// Formats day 1 of the month with a chrono strftime pattern. Patterns
    /// chrono can't render for a date (unknown or time-of-day specifiers) fail.
    pub fn format(&self, pattern: &str) -> Result<String, Error> {
        use std::fmt::Write;
        let mut out = String::new();
        write!(out, "{}", self.0.format(pattern))
            .map_err(|_| Error::InvalidHeaderFormat(pattern.to_owned()))?;
        Ok(out)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for YearMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || Error::InvalidYearMonth(s.to_owned());
        let (y, m) = s.trim().split_once('-').ok_or_else(bad)?;
        let year:  i32 = y.parse().map_err(|_| bad())?;
        let month: u32 = m.parse().map_err(|_| bad())?;
        YearMonth::new(year, month).ok_or_else(bad)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = Error;
    fn try_from(s: String) -> Result<Self, Self::Error> { s.parse() }
}

impl From<YearMonth> for String {
    fn from(ym: YearMonth) -> String { ym.to_string() }
}

// ─── CalendarContext ──────────────────────────────────────────────────────────

/// Immutable calendar settings shared by the grid generator, the selection
/// controller and the picker. The zone is always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarContext {
    pub week_start: Weekday,
    pub today:      CalendarDate,
}

impl CalendarContext {
    /// Captures today's UTC date once.
    pub fn new(week_start: Weekday) -> Self {
        Self { week_start, today: CalendarDate::today() }
    }

    pub fn with_today(mut self, today: CalendarDate) -> Self {
        self.today = today;
        self
    }

    /// Column (0..7) of `date` in a week beginning on `week_start`.
    pub fn weekday_index(&self, date: CalendarDate) -> u32 {
        (date.weekday().num_days_from_monday() + 7 - self.week_start.num_days_from_monday()) % 7
    }
}

impl Default for CalendarContext {
    fn default() -> Self { Self::new(Weekday::Sun) }
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11        => 30,
        2 if is_leap_year(year) => 29,
        2                     => 28,
        _                     => 31,
    }
}
