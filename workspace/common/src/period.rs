use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Value accepted in place of a month or year meaning "no restriction".
pub const ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    #[error("Invalid month: {0}")]
    InvalidMonth(String),
    #[error("Invalid year: {0}")]
    InvalidYear(String),
}

/// Reporting window selected by the month/year filters of the statistics pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ReportPeriod {
    /// Whole history.
    AllTime,
    Year(i32),
    Month { year: i32, month: u32 },
    /// The same calendar month across every year.
    MonthOfEveryYear(u32),
}

impl ReportPeriod {
    /// Parses the `month` / `year` query values. Missing, empty and `"all"` values
    /// leave that part unrestricted. Months may carry a leading zero (`"01"`).
    pub fn parse(month: Option<&str>, year: Option<&str>) -> Result<Self, PeriodError> {
        let month = match normalize(month) {
            None => None,
            Some(raw) => match raw.parse::<u32>() {
                Ok(m) if (1..=12).contains(&m) => Some(m),
                _ => return Err(PeriodError::InvalidMonth(raw.to_string())),
            },
        };

        let year = match normalize(year) {
            None => None,
            Some(raw) => match raw.parse::<i32>() {
                Ok(y) if (1..=9999).contains(&y) => Some(y),
                _ => return Err(PeriodError::InvalidYear(raw.to_string())),
            },
        };

        Ok(match (month, year) {
            (None, None) => ReportPeriod::AllTime,
            (None, Some(year)) => ReportPeriod::Year(year),
            (Some(month), Some(year)) => ReportPeriod::Month { year, month },
            (Some(month), None) => ReportPeriod::MonthOfEveryYear(month),
        })
    }

    /// Half-open `[start, end)` date range for bounded periods.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match *self {
            ReportPeriod::Year(year) => {
                let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
                let end = NaiveDate::from_ymd_opt(year + 1, 1, 1)?;
                Some((start, end))
            }
            ReportPeriod::Month { year, month } => {
                let start = NaiveDate::from_ymd_opt(year, month, 1)?;
                let end = if month == 12 {
                    NaiveDate::from_ymd_opt(year + 1, 1, 1)?
                } else {
                    NaiveDate::from_ymd_opt(year, month + 1, 1)?
                };
                Some((start, end))
            }
            ReportPeriod::AllTime | ReportPeriod::MonthOfEveryYear(_) => None,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            ReportPeriod::AllTime => true,
            ReportPeriod::MonthOfEveryYear(month) => date.month() == month,
            _ => match self.date_range() {
                Some((start, end)) => date >= start && date < end,
                None => false,
            },
        }
    }
}

fn normalize(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(ALL))
}
