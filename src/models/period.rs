//! Payroll period model.
//!
//! A payslip covers exactly one calendar month, written `YYYY-MM` on the wire.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar month identifying one payroll run.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Period;
/// use std::str::FromStr;
///
/// let period = Period::from_str("2025-03").unwrap();
/// assert_eq!(period.year(), 2025);
/// assert_eq!(period.month(), 3);
/// assert_eq!(period.to_string(), "2025-03");
/// assert!(Period::from_str("2025-13").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    first_day: NaiveDate,
}

/// Error returned when text is not a `YYYY-MM` year-month.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a valid year-month (expected YYYY-MM)")]
pub struct InvalidPeriod(pub String);

impl Period {
    /// Returns the period for the given year and month, if the month exists.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// The calendar month, 1 to 12.
    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// The first day of the month, used to pick the rate table in force.
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }
}

impl FromStr for Period {
    type Err = InvalidPeriod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidPeriod(s.to_string());

        // chrono accepts single-digit months, the wire format does not
        let bytes = s.as_bytes();
        if bytes.len() != 7
            || bytes[4] != b'-'
            || !bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || b.is_ascii_digit())
        {
            return Err(invalid());
        }

        NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
            .map(|first_day| Self { first_day })
            .map_err(|_| invalid())
    }
}

impl TryFrom<String> for Period {
    type Error = InvalidPeriod;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}
