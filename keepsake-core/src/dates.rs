use anyhow::{Result, anyhow};
use chrono::{DateTime, Datelike, Days, Months, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// A calendar month, the unit the calendar and the month view work in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    first: NaiveDate,
}

impl YearMonth {
    /// `None` for a month outside 1..=12 or outside chrono's date range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(self) -> i32 {
        self.first.year()
    }

    /// 1-based month (January is 1).
    pub fn month(self) -> u32 {
        self.first.month()
    }

    pub fn first_day(self) -> NaiveDate {
        self.first
    }

    pub fn last_day(self) -> NaiveDate {
        self.first
            .with_day(self.days_in_month())
            .unwrap_or(self.first)
    }

    pub fn days_in_month(self) -> u32 {
        match self.month() {
            4 | 6 | 9 | 11 => 30,
            2 if NaiveDate::from_ymd_opt(self.year(), 2, 29).is_some() => 29,
            2 => 28,
            _ => 31,
        }
    }

    /// The following month, `None` past the last representable date.
    pub fn next(self) -> Option<Self> {
        self.first.checked_add_months(Months::new(1)).map(Self::of)
    }

    /// The preceding month, `None` before the first representable date.
    pub fn previous(self) -> Option<Self> {
        self.first.checked_sub_months(Months::new(1)).map(Self::of)
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for YearMonth {
    type Err = anyhow::Error;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| anyhow!("expected YYYY-MM, got '{s}'"))?;
        let year: i32 = year.parse()?;
        let month: u32 = month.parse()?;
        Self::new(year, month).ok_or_else(|| anyhow!("'{s}' is not a valid month"))
    }
}

/// Number of calendar days from `start` to `end` (negative when `end` is earlier).
pub fn diff_days(start: NaiveDate, end: NaiveDate) -> i64 {
    end.signed_duration_since(start).num_days()
}

/// Monday-to-Sunday week containing `date`, both ends inclusive.
///
/// Clamped to chrono's date range at its two ends.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let from_monday = u64::from(date.weekday().num_days_from_monday());
    let start = date
        .checked_sub_days(Days::new(from_monday))
        .unwrap_or(NaiveDate::MIN);
    let end = start
        .checked_add_days(Days::new(6))
        .unwrap_or(NaiveDate::MAX);
    (start, end)
}

/// Reads the calendar date out of a data-file date value.
///
/// Accepts `YYYY-MM-DD` and RFC 3339 timestamps; for a timestamp the date part
/// as written is kept, so no time zone can shift it to a neighbouring day.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.naive_local().date())
}
