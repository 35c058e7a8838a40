//! Calendar-month arithmetic for report periods.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

const MIN_YEAR: i32 = 1970;
const MAX_YEAR: i32 = 9998;

/// A calendar month, stored as its first day.
///
/// Years are bounded to `1970..=9998` at construction so month arithmetic
/// never leaves chrono's representable range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TargetMonth(NaiveDate);

impl TargetMonth {
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidMonth`] if `month` is not in `1..=12` or the
    /// year is outside the supported range.
    pub fn new(year: i32, month: u32) -> Result<Self, CoreError> {
        let invalid = || CoreError::InvalidMonth(format!("{year:04}-{month:02}"));
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(invalid());
        }
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .ok_or_else(invalid)
    }

    /// Parse a strict `YYYY-MM` string.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidMonth`] for any other shape.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let invalid = || CoreError::InvalidMonth(raw.to_string());
        let (year_part, month_part) = raw.trim().split_once('-').ok_or_else(invalid)?;
        let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if year_part.len() != 4
            || month_part.len() != 2
            || !all_digits(year_part)
            || !all_digits(month_part)
        {
            return Err(invalid());
        }
        let year = year_part.parse::<i32>().map_err(|_| invalid())?;
        let month = month_part.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }

    #[must_use]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    #[must_use]
    pub fn month(self) -> u32 {
        self.0.month()
    }

    #[must_use]
    pub fn first_day(self) -> NaiveDate {
        self.0
    }

    #[must_use]
    pub fn last_day(self) -> NaiveDate {
        self.next().0.pred_opt().unwrap_or(self.0)
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.checked_add_months(Months::new(1)).unwrap_or(self.0))
    }

    #[must_use]
    pub fn previous(self) -> Self {
        Self(self.0.checked_sub_months(Months::new(1)).unwrap_or(self.0))
    }

    /// Half-open `[first day 00:00 UTC, first day of next month 00:00 UTC)` interval.
    #[must_use]
    pub fn range(self) -> MonthRange {
        MonthRange {
            month: self,
            start: midnight_utc(self.0),
            end: midnight_utc(self.next().0),
        }
    }

    /// The rolling report window: two prior months plus this one, oldest first.
    #[must_use]
    pub fn window(self) -> [TargetMonth; 3] {
        let prev = self.previous();
        [prev.previous(), prev, self]
    }

    /// Long label, e.g. `September 2026`.
    #[must_use]
    pub fn label(self) -> String {
        self.0.format("%B %Y").to_string()
    }

    /// Short label for chart axes and table headers, e.g. `Sep 2026`.
    #[must_use]
    pub fn short_label(self) -> String {
        self.0.format("%b %Y").to_string()
    }
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

impl std::fmt::Display for TargetMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl std::str::FromStr for TargetMonth {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TargetMonth {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TargetMonth> for String {
    fn from(value: TargetMonth) -> Self {
        value.to_string()
    }
}

/// The half-open time interval covered by one [`TargetMonth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    month: TargetMonth,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl MonthRange {
    #[must_use]
    pub fn month(&self) -> TargetMonth {
        self.month
    }

    /// Inclusive start.
    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Exclusive end: the first instant of the next month.
    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }

    /// Last calendar day in the range, used for follower snapshots.
    #[must_use]
    pub fn last_day(&self) -> NaiveDate {
        self.month.last_day()
    }
}
