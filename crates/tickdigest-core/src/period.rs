//! Time window resolution: symbolic recency periods to concrete date ranges.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A symbolic recency window used to bound news retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    LastDay,
    LastWeek,
    LastMonth,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::LastDay, Period::LastWeek, Period::LastMonth];

    /// Number of days subtracted from "now" to get the start of the window.
    ///
    /// A "month" is a fixed 28 days, not a calendar month.
    #[must_use]
    pub const fn offset_days(self) -> i64 {
        match self {
            Period::LastDay => 1,
            Period::LastWeek => 7,
            Period::LastMonth => 28,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::LastDay => write!(f, "day"),
            Period::LastWeek => write!(f, "week"),
            Period::LastMonth => write!(f, "month"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown period \"{0}\" (expected day, week, or month)")]
pub struct PeriodParseError(pub String);

impl FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "1d" | "last_day" => Ok(Period::LastDay),
            "week" | "7d" | "last_week" => Ok(Period::LastWeek),
            "month" | "28d" | "last_month" => Ok(Period::LastMonth),
            other => Err(PeriodParseError(other.to_string())),
        }
    }
}

/// Inclusive calendar date range `[from, to]`.
///
/// Only [`resolve`] builds one, so `from <= to` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    #[must_use]
    pub fn from(&self) -> NaiveDate {
        self.from
    }

    #[must_use]
    pub fn to(&self) -> NaiveDate {
        self.to
    }

    /// `from` formatted as ISO-8601 (`YYYY-MM-DD`).
    #[must_use]
    pub fn from_iso(&self) -> String {
        self.from.format("%Y-%m-%d").to_string()
    }

    /// `to` formatted as ISO-8601 (`YYYY-MM-DD`).
    #[must_use]
    pub fn to_iso(&self) -> String {
        self.to.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.from_iso(), self.to_iso())
    }
}

/// Resolve `period` against the reference instant `now`.
///
/// `to` is the calendar date of `now` and `from` is the calendar date of
/// `now - offset_days`.
#[must_use]
pub fn resolve(period: Period, now: DateTime<Utc>) -> DateRange {
    let start = now - Duration::days(period.offset_days());
    DateRange {
        from: start.date_naive(),
        to: now.date_naive(),
    }
}
