//! Week arithmetic.
//!
//! Weeks start on Monday. Week numbers follow ISO 8601: week 1 is the week
//! containing the year's first Thursday, so late-December days can belong to
//! week 1 of the next year and early-January days to the last week of the
//! previous one.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};

const DAYS_PER_WEEK: i64 = 7;

/// An ISO week together with its week-based year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoWeek {
    pub year: i32,
    pub week: u32,
}

/// Formats as the `{year}-{week}` path segment used by the booking API.
impl fmt::Display for IsoWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.week)
    }
}

/// Monday = 0 .. Sunday = 6
pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_monday() as usize
}

/// Shift `date` by `days` (may be negative).
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// Shift `date` by `weeks` whole weeks, or `None` outside chrono's date range.
pub fn checked_add_weeks(date: NaiveDate, weeks: i64) -> Option<NaiveDate> {
    let days = weeks.checked_mul(DAYS_PER_WEEK)?;
    date.checked_add_signed(Duration::try_days(days)?)
}

/// The Monday at or before `date`. Sunday belongs to the week that started
/// six days earlier.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    add_days(date, -(weekday_index(date) as i64))
}

/// The seven days of the week starting at `anchor`.
pub fn week_days(anchor: NaiveDate) -> [NaiveDate; 7] {
    std::array::from_fn(|i| add_days(anchor, i as i64))
}

/// ISO-8601 week of `date`.
pub fn iso_week(date: NaiveDate) -> IsoWeek {
    let thursday = add_days(date, 3 - weekday_index(date) as i64);
    let first_thursday = first_thursday_of(thursday.year());
    let days_between = (thursday - first_thursday).num_days();

    IsoWeek {
        year: thursday.year(),
        week: 1 + (days_between / DAYS_PER_WEEK) as u32,
    }
}

/// ISO-8601 week number of `date`.
pub fn iso_week_number(date: NaiveDate) -> u32 {
    iso_week(date).week
}

fn first_thursday_of(year: i32) -> NaiveDate {
    let jan_first = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN);
    // Thursday is index 3 when Monday is 0
    let offset = (3 + DAYS_PER_WEEK - weekday_index(jan_first) as i64) % DAYS_PER_WEEK;
    add_days(jan_first, offset)
}
