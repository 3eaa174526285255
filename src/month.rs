//! Calendar month scopes and the date ranges used to select records by month.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::{Date, Month};

use crate::Error;

/// Selects how the exclusive upper bound of a month's date range is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum MonthBound {
    /// The range ends at the first day of the following month.
    #[default]
    Calendar,

    /// The range ends at day 31 of the month when that date exists, otherwise
    /// at the first day of the following month.
    ///
    /// Records dated on the 31st are excluded from their own month under this
    /// policy.
    #[value(name = "literal-day-31")]
    LiteralDay31,
}

/// A half-open range of dates, `start <= date < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// The first date in the range.
    pub start: Date,
    /// The first date after the range.
    pub end: Date,
}

/// A calendar month in a specific year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthScope {
    first_day: Date,
}

impl MonthScope {
    /// Create a month scope for `month` (1-12) of `year`.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] if `month` is not in 1-12 or `year` is
    /// outside the supported date range.
    pub fn new(year: i32, month: u8) -> Result<Self, Error> {
        let invalid_month = || Error::InvalidMonth(format!("{year}-{month}"));

        let calendar_month = Month::try_from(month).map_err(|_| invalid_month())?;
        let first_day =
            Date::from_calendar_date(year, calendar_month, 1).map_err(|_| invalid_month())?;

        Ok(Self { first_day })
    }

    /// The month containing `date`.
    pub fn containing(date: Date) -> Self {
        Self {
            first_day: date.replace_day(1).unwrap_or(date),
        }
    }

    /// Parse a month scope from the raw `year` and `month` query parameters.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] if either value is missing, not a number,
    /// or out of range.
    pub fn parse(year: Option<&str>, month: Option<&str>) -> Result<Self, Error> {
        let (Some(year_text), Some(month_text)) = (year, month) else {
            return Err(Error::InvalidMonth(format!(
                "{}-{}",
                year.unwrap_or_default(),
                month.unwrap_or_default()
            )));
        };

        let invalid_month = || Error::InvalidMonth(format!("{year_text}-{month_text}"));
        let year = year_text.trim().parse().map_err(|_| invalid_month())?;
        let month = month_text.trim().parse().map_err(|_| invalid_month())?;

        Self::new(year, month)
    }

    /// The year of the month.
    pub fn year(self) -> i32 {
        self.first_day.year()
    }

    /// The month of the year, from 1 (January) to 12 (December).
    pub fn month(self) -> u8 {
        u8::from(self.first_day.month())
    }

    /// The first day of the month.
    pub fn first_day(self) -> Date {
        self.first_day
    }

    /// The month `months` away from this one, rolling over year boundaries.
    ///
    /// Returns `None` if the result is outside the supported date range.
    pub fn offset(self, months: i32) -> Option<Self> {
        let index = self
            .year()
            .checked_mul(12)?
            .checked_add(i32::from(self.month()) - 1)?
            .checked_add(months)?;
        let year = index.div_euclid(12);
        let month = (index.rem_euclid(12) + 1) as u8;

        Self::new(year, month).ok()
    }

    /// The month before this one.
    pub fn previous(self) -> Self {
        self.offset(-1).unwrap_or(self)
    }

    /// The month after this one.
    pub fn next(self) -> Self {
        self.offset(1).unwrap_or(self)
    }

    /// The dates selected by this month under `bound`.
    pub fn date_range(self, bound: MonthBound) -> DateRange {
        let start = self.first_day;
        let first_of_next_month = self
            .offset(1)
            .map(MonthScope::first_day)
            .unwrap_or(Date::MAX);

        let end = match bound {
            MonthBound::Calendar => first_of_next_month,
            MonthBound::LiteralDay31 => start.replace_day(31).unwrap_or(first_of_next_month),
        };

        DateRange { start, end }
    }

    /// The query parameters that select this month, e.g. `year=2024&month=5`.
    pub fn to_query_string(self) -> String {
        format!("year={}&month={}", self.year(), self.month())
    }
}

impl Display for MonthScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// The `year` and `month` query parameters that select a month.
///
/// The values are kept as text so that malformed values can be reported as
/// [Error::InvalidMonth] instead of a generic query rejection.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthQuery {
    /// The year, e.g. "2024".
    pub year: Option<String>,
    /// The month of the year, e.g. "5".
    pub month: Option<String>,
}

impl MonthQuery {
    /// Whether neither parameter was given.
    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.month.is_none()
    }

    /// The month selected by the query.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] if either parameter is missing or malformed.
    pub fn scope(&self) -> Result<MonthScope, Error> {
        MonthScope::parse(self.year.as_deref(), self.month.as_deref())
    }
}

impl From<MonthScope> for MonthQuery {
    fn from(scope: MonthScope) -> Self {
        Self {
            year: Some(scope.year().to_string()),
            month: Some(scope.month().to_string()),
        }
    }
}
