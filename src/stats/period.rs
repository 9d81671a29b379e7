//! Calendar-month periods and inclusive date ranges.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize, Serializer};

use crate::errors::{Result, StatsError};

/// Short date format accepted for range bounds.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar month, keyed as `YYYY_MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthPeriod {
    pub year: i32,
    pub month: u32,
}

impl MonthPeriod {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn key(&self) -> String {
        self.to_string()
    }

    /// True when the timestamp falls in this month.
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        timestamp.year() == self.year && timestamp.month() == self.month
    }

    fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}_{:02}", self.year, self.month)
    }
}

impl Serialize for MonthPeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parses a `YYYY-MM-DD` bound.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|err| StatsError::InvalidRange(format!("`{}` is not a valid date: {}", raw, err)))
}

/// One period per calendar month touched by `[start, end]`, oldest first.
pub fn month_periods(start: &str, end: &str) -> Result<Vec<MonthPeriod>> {
    month_periods_between(parse_date(start)?, parse_date(end)?)
}

pub fn month_periods_between(start: NaiveDate, end: NaiveDate) -> Result<Vec<MonthPeriod>> {
    if end < start {
        return Err(StatsError::InvalidRange(format!(
            "range end {} precedes start {}",
            end, start
        )));
    }
    let last = MonthPeriod::of(end);
    let mut current = MonthPeriod::of(start);
    let mut periods = Vec::new();
    while current <= last {
        periods.push(current);
        current = current.next();
    }
    Ok(periods)
}

pub fn month_key_of(timestamp: NaiveDateTime) -> String {
    MonthPeriod::of(timestamp.date()).key()
}

pub fn belongs_to_period(period: &MonthPeriod, timestamp: NaiveDateTime) -> bool {
    period.contains(timestamp)
}

/// Inclusive date range; a missing bound leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, until: Option<NaiveDate>) -> Result<Self> {
        if let (Some(from), Some(until)) = (from, until) {
            if until < from {
                return Err(StatsError::InvalidRange(format!(
                    "range end {} precedes start {}",
                    until, from
                )));
            }
        }
        Ok(Self { from, until })
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn parse(from: Option<&str>, until: Option<&str>) -> Result<Self> {
        let from = from.map(parse_date).transpose()?;
        let until = until.map(parse_date).transpose()?;
        Self::new(from, until)
    }

    /// `until` covers its whole day, so the upper bound is the next midnight, exclusive.
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        if let Some(from) = self.from {
            if timestamp.date() < from {
                return false;
            }
        }
        match self.until {
            Some(until) => timestamp.date() <= until,
            None => true,
        }
    }

    pub fn months(&self) -> Result<Vec<MonthPeriod>> {
        match (self.from, self.until) {
            (Some(from), Some(until)) => month_periods_between(from, until),
            _ => Err(StatsError::InvalidRange(
                "monthly series need both a start and an end date".into(),
            )),
        }
    }
}
