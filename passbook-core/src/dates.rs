//! Date helpers: month abbreviations, statement periods and year inheritance.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PassbookError;

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

static HEADER_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\b\d{1,2}(?:/\d{1,2}/|\s*(?:JAN|FEB|MAR|APR|MAY|JUN|JUL|AUG|SEP|OCT|NOV|DEC)[A-Z]*\s*)",
        r"((?:19|20)\d{2})\b"
    ))
    .expect("header date regex")
});

static NAME_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\D)((?:19|20)\d{2})(?:\D|$)").expect("name year regex"));

/// Map a three-letter month abbreviation (any case) to 1..=12.
pub fn month_from_abbrev(s: &str) -> Option<u32> {
    let s = s.trim();
    if s.len() != 3 {
        return None;
    }
    let upper = s.to_ascii_uppercase();
    MONTHS
        .iter()
        .position(|m| *m == upper)
        .map(|i| i as u32 + 1)
}

/// Month token as printed on a row: either numeric (`05`) or an abbreviation (`May`).
pub fn parse_month(token: &str) -> Option<u32> {
    let token = token.trim();
    if token.chars().all(|c| c.is_ascii_digit()) {
        let m: u32 = token.parse().ok()?;
        return (1..=12).contains(&m).then_some(m);
    }
    month_from_abbrev(token)
}

/// The (year, month) a statement closes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementPeriod {
    pub year: i32,
    pub month: u32,
}

impl StatementPeriod {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }
}

impl FromStr for StatementPeriod {
    type Err = PassbookError;

    /// Accepts `YYYY-MM` or `YYYY/MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PassbookError::InvalidPeriod(s.to_string());
        let (y, m) = s.trim().split_once(['-', '/']).ok_or_else(invalid)?;
        let year: i32 = y.parse().map_err(|_| invalid())?;
        let month: u32 = m.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

impl fmt::Display for StatementPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Where a year comes from when a row only prints day and month.
///
/// Priority: `detected` (statement header or file name), then `period`,
/// then `default`. With a period, months later than the closing month
/// belong to the year before whichever year won (a January statement
/// listing December rows).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearContext {
    pub detected: Option<i32>,
    pub period: Option<StatementPeriod>,
    pub default: Option<i32>,
}

impl YearContext {
    pub fn with_default(year: i32) -> Self {
        Self {
            default: Some(year),
            ..Self::default()
        }
    }

    pub fn year_for_month(&self, month: u32) -> Option<i32> {
        let Some(period) = self.period else {
            return self.detected.or(self.default);
        };
        let closing = self.detected.unwrap_or(period.year);
        Some(if month > period.month {
            closing - 1
        } else {
            closing
        })
    }

    pub fn resolve(&self, day: u32, month: u32, year: Option<i32>) -> Option<NaiveDate> {
        let year = year.or_else(|| self.year_for_month(month))?;
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

/// First full date (`dd/mm/yyyy` or `dd Mon yyyy`) in statement header text.
pub fn detect_year(text: &str) -> Option<i32> {
    HEADER_DATE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// A standalone four-digit year in a file name, e.g. `pbb_2025-05.txt`.
pub fn detect_year_in_name(name: &str) -> Option<i32> {
    NAME_YEAR
        .captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
