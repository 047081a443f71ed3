//! Calendar keys for velocity windows
//!
//! Daily limits are scoped by UTC calendar date and weekly limits by ISO-8601
//! week. Both keys are derived from the attempt timestamp after normalizing it
//! to UTC, so a load at `2021-01-01T01:00:00+05:00` counts towards
//! 2020-12-31.
//!
//! ISO weeks start on Monday and week 1 is the week holding the year's first
//! Thursday. The week-year therefore differs from the calendar year around
//! New Year: 2020-12-31 through 2021-01-03 all belong to `2020-W53`.

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use std::fmt;

/// UTC calendar date of a load attempt, displayed as `YYYY-MM-DD`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Date key of a UTC timestamp
    pub fn from_time(time: &DateTime<Utc>) -> Self {
        DateKey(time.date_naive())
    }

    /// ISO week this date belongs to
    pub fn week(&self) -> WeekKey {
        let iso = self.0.iso_week();
        WeekKey {
            year: iso.year(),
            week: iso.week(),
        }
    }

    pub fn is_monday(&self) -> bool {
        self.0.weekday() == Weekday::Mon
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        DateKey(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// ISO-8601 week-year and week number, displayed as `YYYY-Www`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeekKey {
    year: i32,
    week: u32,
}

impl WeekKey {
    /// ISO week of a UTC timestamp
    pub fn from_time(time: &DateTime<Utc>) -> Self {
        DateKey::from_time(time).week()
    }

    /// ISO week-year, which may differ from the calendar year
    pub fn year(&self) -> i32 {
        self.year
    }

    /// ISO week number (1..=53)
    pub fn week(&self) -> u32 {
        self.week
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-W{:02}", self.year, self.week)
    }
}
