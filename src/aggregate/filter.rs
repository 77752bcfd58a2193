//! Month selection shared by the daily and hour-of-day aggregators.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::plant::calendar;
use crate::plant::types::Reading;

/// Restricts a reading sequence to one month before aggregating.
///
/// Two month rules exist and the caller picks one explicitly:
/// - [`MonthFilter::YearMonth`] matches the full `YYYY-MM` key, so January
///   2025 and January 2026 are different months.
/// - [`MonthFilter::CalendarMonth`] matches the month number only and pools
///   that month across every year in the data.
///
/// Readings without a parseable timestamp never match a month filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthFilter {
    /// No filtering ("all time").
    #[default]
    All,
    /// Exact `YYYY-MM` month key.
    YearMonth(String),
    /// Month number `1..=12`, across all years.
    CalendarMonth(u8),
}

/// Rejected month filter value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MonthFilterError {
    /// Not a `YYYY-MM` key.
    #[error("invalid month key \"{0}\", expected YYYY-MM")]
    MonthKey(String),
    /// Month number outside `1..=12`.
    #[error("calendar month must be in 1..=12, got {0}")]
    CalendarMonth(u8),
    /// Both filters supplied at once.
    #[error("month and calendar month filters are mutually exclusive")]
    Conflict,
}

impl MonthFilter {
    /// Builds a `YYYY-MM` filter, validating the key shape.
    ///
    /// # Errors
    ///
    /// Returns [`MonthFilterError::MonthKey`] for anything but `YYYY-MM`.
    pub fn year_month(key: &str) -> Result<Self, MonthFilterError> {
        if calendar::is_month_key(key) {
            Ok(Self::YearMonth(key.to_string()))
        } else {
            Err(MonthFilterError::MonthKey(key.to_string()))
        }
    }

    /// Builds a month-number filter.
    ///
    /// # Errors
    ///
    /// Returns [`MonthFilterError::CalendarMonth`] outside `1..=12`.
    pub fn calendar_month(month: u8) -> Result<Self, MonthFilterError> {
        if (1..=12).contains(&month) {
            Ok(Self::CalendarMonth(month))
        } else {
            Err(MonthFilterError::CalendarMonth(month))
        }
    }

    /// Resolves an optional pair of month options (as given on a command line
    /// or query string) into one filter.
    ///
    /// # Errors
    ///
    /// Returns an error if either value is malformed or both are present.
    pub fn from_options(
        year_month: Option<&str>,
        calendar_month: Option<u8>,
    ) -> Result<Self, MonthFilterError> {
        match (year_month, calendar_month) {
            (Some(_), Some(_)) => Err(MonthFilterError::Conflict),
            (Some(key), None) => Self::year_month(key),
            (None, Some(month)) => Self::calendar_month(month),
            (None, None) => Ok(Self::All),
        }
    }

    /// Returns `true` if `reading` falls inside the selected month.
    pub fn matches(&self, reading: &Reading) -> bool {
        match self {
            Self::All => true,
            Self::YearMonth(key) => reading.month_key() == Some(key.as_str()),
            Self::CalendarMonth(month) => {
                reading.timestamp.as_deref().and_then(calendar::month_number) == Some(*month)
            }
        }
    }

    /// Iterates the readings that pass the filter, in input order.
    pub fn apply<'a>(&'a self, readings: &'a [Reading]) -> impl Iterator<Item = &'a Reading> + 'a {
        readings.iter().filter(move |r| self.matches(r))
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all time"),
            Self::YearMonth(key) => write!(f, "{key}"),
            Self::CalendarMonth(month) => write!(f, "month {month} (all years)"),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = MonthFilterError;

    /// Parses `all`, `YYYY-MM`, or a bare month number `1..=12`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        match s.parse::<u8>() {
            Ok(month) => Self::calendar_month(month),
            Err(_) => Self::year_month(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readings() -> Vec<Reading> {
        vec![
            Reading::at("2025-01-05 10:00:00"),
            Reading::at("2025-02-05 10:00:00"),
            Reading::at("2026-01-05 10:00:00"),
            Reading::default(),
        ]
    }

    #[test]
    fn all_keeps_everything() {
        assert_eq!(MonthFilter::All.apply(&readings()).count(), 4);
    }

    #[test]
    fn year_month_is_exact() {
        let f = MonthFilter::year_month("2025-01").unwrap();
        let rs = readings();
        let kept: Vec<_> = f.apply(&rs).collect();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].day_key(), Some("2025-01-05"));
    }

    #[test]
    fn calendar_month_spans_years() {
        let f = MonthFilter::calendar_month(1).unwrap();
        assert_eq!(f.apply(&readings()).count(), 2);
    }

    #[test]
    fn invalid_values_rejected() {
        assert_eq!(
            MonthFilter::year_month("2025-1"),
            Err(MonthFilterError::MonthKey("2025-1".to_string()))
        );
        assert_eq!(
            MonthFilter::calendar_month(13),
            Err(MonthFilterError::CalendarMonth(13))
        );
        assert_eq!(
            MonthFilter::from_options(Some("2025-01"), Some(1)),
            Err(MonthFilterError::Conflict)
        );
    }

    #[test]
    fn parses_from_str() {
        assert_eq!("all".parse::<MonthFilter>(), Ok(MonthFilter::All));
        assert_eq!("3".parse::<MonthFilter>(), Ok(MonthFilter::CalendarMonth(3)));
        assert_eq!(
            "2025-03".parse::<MonthFilter>(),
            Ok(MonthFilter::YearMonth("2025-03".to_string()))
        );
        assert!("March".parse::<MonthFilter>().is_err());
    }
}
